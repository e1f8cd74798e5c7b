use crate::ast::{Text, Word};
use crate::error::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Pipe,       // |
    PipeAmp,    // |& (unsupported; lexed for a clearer parse error)
    AndAnd,     // &&
    OrOr,       // ||
    Semi,       // ;
    SemiSemi,   // ;; (case terminator)
    Amp,        // &
    LParen,     // (
    RParen,     // )
    LBrace,     // {
    RBrace,     // }
    Less,       // <
    Great,      // >
    DGreat,     // >>
    DLess,      // <<
    DLessDash,  // <<-
    LessAnd,    // <&
    GreatAnd,   // >&
    LessGreat,  // <>
    Clobber,    // >|
    TLess,      // <<<
    AndGreat,   // &>
    DParenOpen, // ((
}

impl Operator {
    pub fn text(self) -> &'static str {
        use Operator::*;
        match self {
            Pipe => "|",
            PipeAmp => "|&",
            AndAnd => "&&",
            OrOr => "||",
            Semi => ";",
            SemiSemi => ";;",
            Amp => "&",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            Less => "<",
            Great => ">",
            DGreat => ">>",
            DLess => "<<",
            DLessDash => "<<-",
            LessAnd => "<&",
            GreatAnd => ">&",
            LessGreat => "<>",
            Clobber => ">|",
            TLess => "<<<",
            AndGreat => "&>",
            DParenOpen => "((",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Word(Word),
    Op(Operator),
    Newline,
    /// A resolved heredoc body, emitted immediately after the `Newline`
    /// token that triggered its collection, one per pending heredoc request
    /// in the order those requests were made. The parser matches these back
    /// to the `<<`/`<<-` redirection that asked for them positionally.
    HereDocBody(Text),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

pub const KEYWORDS: &[&str] = &[
    "if", "then", "elif", "else", "fi", "for", "in", "do", "done", "while", "until", "case",
    "esac", "function", "!", "{", "}", "[[", "]]",
];

/// Returns the literal text of a word token if it consists entirely of a
/// single unquoted literal run (the only shape a reserved word can take).
pub fn as_bare_literal(word: &Word) -> Option<String> {
    use crate::ast::{TextUnit, WordUnit};
    let mut s = String::new();
    for unit in &word.units {
        match unit {
            WordUnit::Unquoted(TextUnit::Literal(c)) => s.push(*c),
            _ => return None,
        }
    }
    Some(s)
}
