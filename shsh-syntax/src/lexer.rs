//! Character-cursor lexer. Unlike the teacher's `yash-syntax` lexer, this one
//! is a plain synchronous cursor over an owned `Vec<char>` — there is no
//! `Future`/`Input` trait to poll, since the executor never suspends.

use crate::ast::{Text, TextUnit, Word, WordUnit};
use crate::error::{LexError, Position};
use crate::token::{Operator, Token, TokenKind};

struct PendingHereDoc {
    delimiter: String,
    quoted: bool,
    remove_tabs: bool,
    /// Index into the token stream of the `DLess`/`DLessDash` operator that
    /// requested this heredoc; the parser matches bodies back to redirections
    /// by position of occurrence (heredocs are filled in left-to-right).
    content: Option<Text>,
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

const BLANK: [char; 2] = [' ', '\t'];

fn is_word_boundary(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '|' | '&' | ';' | '<' | '>' | '(' | ')'
    )
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn position(&self) -> Position {
        self.position_at(self.pos)
    }

    fn position_at(&self, index: usize) -> Position {
        let mut line = 0;
        let mut col = 0;
        for &c in &self.chars[..index.min(self.chars.len())] {
            if c == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        Position {
            offset: index,
            line,
            column: col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_blanks_and_comment(&mut self) {
        loop {
            while matches!(self.peek(), Some(c) if BLANK.contains(&c)) {
                self.pos += 1;
            }
            if self.peek() == Some('#') {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Tokenizes the whole source, resolving heredoc bodies as they are
    /// encountered after their terminating newline. This is the function
    /// backing both `parse` and the public `tokenize` entry point.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut pending: Vec<PendingHereDoc> = Vec::new();
        loop {
            self.skip_blanks_and_comment();
            let start = self.position();
            match self.peek() {
                None => break,
                Some('\n') => {
                    self.pos += 1;
                    tokens.push(Token {
                        kind: TokenKind::Newline,
                        position: start,
                    });
                    self.collect_heredocs(&mut pending, &mut tokens)?;
                    pending.clear();
                }
                Some(c) if is_operator_start(c) => {
                    let op = self.lex_operator()?;
                    if matches!(op, Operator::DLess | Operator::DLessDash) {
                        self.skip_blanks_and_comment();
                        let delim_start = self.pos;
                        let word = self.lex_word()?.ok_or(LexError::UnterminatedHereDoc {
                            position: start,
                            delimiter: String::new(),
                        })?;
                        // A quoted (any part) delimiter disables expansion in
                        // the heredoc body; quote markers are already folded
                        // into literal characters by `lex_text_run`, so we
                        // detect this from the raw source span instead.
                        let quoted = self.chars[delim_start..self.pos]
                            .iter()
                            .any(|&c| c == '\'' || c == '"');
                        let delimiter = crate::token::as_bare_literal(&word)
                            .unwrap_or_else(|| render_word_literally(&word));
                        pending.push(PendingHereDoc {
                            delimiter,
                            quoted,
                            remove_tabs: op == Operator::DLessDash,
                            content: None,
                        });
                    }
                    tokens.push(Token {
                        kind: TokenKind::Op(op),
                        position: start,
                    });
                }
                Some(_) => {
                    let word = self
                        .lex_word()?
                        .expect("non-boundary character must start a word");
                    tokens.push(Token {
                        kind: TokenKind::Word(word),
                        position: start,
                    });
                }
            }
        }
        if !pending.is_empty() {
            self.collect_heredocs(&mut pending, &mut tokens)?;
        }
        Ok(tokens)
    }

    fn collect_heredocs(
        &mut self,
        pending: &mut [PendingHereDoc],
        tokens: &mut Vec<Token>,
    ) -> Result<(), LexError> {
        for stub in pending.iter_mut() {
            if stub.content.is_some() {
                continue;
            }
            let body_start = self.position();
            let mut text = Text::default();
            loop {
                let line_start = self.pos;
                while !matches!(self.peek(), None | Some('\n')) {
                    self.pos += 1;
                }
                let mut line: String = self.chars[line_start..self.pos].iter().collect();
                let at_eof = self.peek().is_none();
                if !at_eof {
                    self.pos += 1; // consume the newline
                }
                if stub.remove_tabs {
                    line = line.trim_start_matches('\t').to_string();
                }
                if line == stub.delimiter {
                    break;
                }
                if at_eof {
                    return Err(LexError::UnterminatedHereDoc {
                        position: self.position(),
                        delimiter: stub.delimiter.clone(),
                    });
                }
                if stub.quoted {
                    for c in line.chars() {
                        text.0.push(TextUnit::Literal(c));
                    }
                } else {
                    let mut sub = Lexer::new(&line);
                    sub.lex_text_run(&mut text, |_| false)?;
                }
                text.0.push(TextUnit::Literal('\n'));
            }
            tokens.push(Token {
                kind: TokenKind::HereDocBody(text.clone()),
                position: body_start,
            });
            stub.content = Some(text);
        }
        Ok(())
    }

    fn lex_operator(&mut self) -> Result<Operator, LexError> {
        let c = self.advance().unwrap();
        let op = match c {
            '|' => {
                if self.eat('|') {
                    Operator::OrOr
                } else if self.eat('&') {
                    Operator::PipeAmp
                } else {
                    Operator::Pipe
                }
            }
            '&' => {
                if self.eat('&') {
                    Operator::AndAnd
                } else if self.eat('>') {
                    Operator::AndGreat
                } else {
                    Operator::Amp
                }
            }
            ';' => {
                if self.eat(';') {
                    Operator::SemiSemi
                } else {
                    Operator::Semi
                }
            }
            '(' => {
                if self.eat('(') {
                    Operator::DParenOpen
                } else {
                    Operator::LParen
                }
            }
            ')' => Operator::RParen,
            '{' => Operator::LBrace,
            '}' => Operator::RBrace,
            '<' => {
                if self.eat('<') {
                    if self.eat('<') {
                        Operator::TLess
                    } else if self.eat('-') {
                        Operator::DLessDash
                    } else {
                        Operator::DLess
                    }
                } else if self.eat('&') {
                    Operator::LessAnd
                } else if self.eat('>') {
                    Operator::LessGreat
                } else {
                    Operator::Less
                }
            }
            '>' => {
                if self.eat('>') {
                    Operator::DGreat
                } else if self.eat('&') {
                    Operator::GreatAnd
                } else if self.eat('|') {
                    Operator::Clobber
                } else {
                    Operator::Great
                }
            }
            other => unreachable!("lex_operator called on non-operator char {other:?}"),
        };
        Ok(op)
    }

    /// Lexes one word (a maximal run of word-parts), or returns `None` at a
    /// boundary/EOF. Unlike the generic `lex_text_run` used for nested
    /// sub-words, this preserves quote structure: a single-quoted or
    /// double-quoted run becomes its own `WordUnit` rather than being folded
    /// into plain literal characters, since expansion (word splitting,
    /// globbing) must later tell whether a given stretch of the word was
    /// quoted.
    fn lex_word(&mut self) -> Result<Option<Word>, LexError> {
        let start = self.position();
        if self.peek().is_none() || is_word_boundary(self.peek().unwrap()) {
            return Ok(None);
        }
        let mut word = Word::new(start);
        let mut run = Text::default();
        macro_rules! flush_run {
            () => {
                for unit in run.0.drain(..) {
                    word.units.push(WordUnit::Unquoted(unit));
                }
            };
        }
        loop {
            match self.peek() {
                None => break,
                Some(c) if is_word_boundary(c) => break,
                Some('\'') => {
                    flush_run!();
                    let qstart = self.position();
                    self.pos += 1;
                    let mut literal = String::new();
                    loop {
                        match self.advance() {
                            Some('\'') => break,
                            Some(c) => literal.push(c),
                            None => {
                                return Err(LexError::UnterminatedSingleQuote { position: qstart })
                            }
                        }
                    }
                    word.units.push(WordUnit::SingleQuote(literal));
                }
                Some('"') => {
                    flush_run!();
                    let qstart = self.position();
                    self.pos += 1;
                    let mut inner = Text::default();
                    loop {
                        match self.peek() {
                            Some('"') => {
                                self.pos += 1;
                                break;
                            }
                            None => {
                                return Err(LexError::UnterminatedDoubleQuote { position: qstart })
                            }
                            Some('\\') => {
                                self.pos += 1;
                                match self.advance() {
                                    Some(c @ ('"' | '\\' | '$' | '`')) => {
                                        inner.0.push(TextUnit::Literal(c))
                                    }
                                    Some('\n') => {}
                                    Some(c) => {
                                        inner.0.push(TextUnit::Literal('\\'));
                                        inner.0.push(TextUnit::Literal(c));
                                    }
                                    None => inner.0.push(TextUnit::Literal('\\')),
                                }
                            }
                            Some('$') => self.lex_dollar(&mut inner)?,
                            Some('`') => self.lex_backquote(&mut inner)?,
                            Some(c) => {
                                self.pos += 1;
                                inner.0.push(TextUnit::Literal(c));
                            }
                        }
                    }
                    word.units.push(WordUnit::DoubleQuote(inner));
                }
                _ => {
                    let before = run.0.len();
                    self.lex_text_run_step(&mut run)?;
                    if run.0.len() == before {
                        // is_word_boundary already filtered out boundary
                        // chars, and the quote cases above are handled
                        // separately, so a step always makes progress here.
                        break;
                    }
                }
            }
        }
        flush_run!();
        Ok(Some(word))
    }

    /// Lexes exactly one text unit of an *unquoted* run (a literal char
    /// possibly involving `$`/backquote/`~` expansion) and appends it to
    /// `text`. Stops without consuming on a quote character so `lex_word`
    /// can switch into quote-preserving handling.
    fn lex_text_run_step(&mut self, text: &mut Text) -> Result<(), LexError> {
        match self.peek() {
            None | Some('\'') | Some('"') => {}
            Some('\\') => {
                self.pos += 1;
                match self.advance() {
                    Some('\n') => {}
                    Some(c) => text.0.push(TextUnit::Literal(c)),
                    None => text.0.push(TextUnit::Literal('\\')),
                }
            }
            Some('$') => self.lex_dollar(text)?,
            Some('`') => self.lex_backquote(text)?,
            Some('~') if text.0.is_empty() => {
                self.pos += 1;
                let mut name = String::new();
                while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
                    name.push(self.advance().unwrap());
                }
                text.0.push(TextUnit::Tilde(name));
            }
            Some(c) => {
                self.pos += 1;
                text.0.push(TextUnit::Literal(c));
            }
        }
        Ok(())
    }

    /// Consumes a run of text honoring quoting until `is_boundary` matches an
    /// unquoted character (or input ends). Quoted sections are represented
    /// inline as literal characters here; `fold_quotes` re-groups the raw
    /// word into `WordUnit::SingleQuote`/`DoubleQuote` for faithfulness, but
    /// heredoc bodies call this directly and keep the flat `Text`.
    fn lex_text_run(
        &mut self,
        text: &mut Text,
        is_boundary: impl Fn(char) -> bool,
    ) -> Result<(), LexError> {
        loop {
            match self.peek() {
                None => break,
                Some(c) if is_boundary(c) => break,
                Some('\\') => {
                    self.pos += 1;
                    match self.advance() {
                        Some('\n') => {} // line continuation: produces nothing
                        Some(c) => text.0.push(TextUnit::Literal(c)),
                        None => text.0.push(TextUnit::Literal('\\')),
                    }
                }
                Some('\'') => {
                    let start = self.position();
                    self.pos += 1;
                    loop {
                        match self.advance() {
                            Some('\'') => break,
                            Some(c) => text.0.push(TextUnit::Literal(c)),
                            None => return Err(LexError::UnterminatedSingleQuote { position: start }),
                        }
                    }
                }
                Some('"') => {
                    let start = self.position();
                    self.pos += 1;
                    loop {
                        match self.peek() {
                            Some('"') => {
                                self.pos += 1;
                                break;
                            }
                            None => return Err(LexError::UnterminatedDoubleQuote { position: start }),
                            Some('\\') => {
                                self.pos += 1;
                                match self.advance() {
                                    Some(c @ ('"' | '\\' | '$' | '`')) => {
                                        text.0.push(TextUnit::Literal(c))
                                    }
                                    Some('\n') => {}
                                    Some(c) => {
                                        text.0.push(TextUnit::Literal('\\'));
                                        text.0.push(TextUnit::Literal(c));
                                    }
                                    None => text.0.push(TextUnit::Literal('\\')),
                                }
                            }
                            Some('$') => self.lex_dollar(text)?,
                            Some('`') => self.lex_backquote(text)?,
                            Some(c) => {
                                self.pos += 1;
                                text.0.push(TextUnit::Literal(c));
                            }
                        }
                    }
                }
                Some('$') => self.lex_dollar(text)?,
                Some('`') => self.lex_backquote(text)?,
                Some('~') if text.0.is_empty() => {
                    self.pos += 1;
                    let mut name = String::new();
                    while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
                        name.push(self.advance().unwrap());
                    }
                    text.0.push(TextUnit::Tilde(name));
                }
                Some(c) => {
                    self.pos += 1;
                    text.0.push(TextUnit::Literal(c));
                }
            }
        }
        Ok(())
    }

    fn lex_dollar(&mut self, text: &mut Text) -> Result<(), LexError> {
        let start = self.position();
        self.pos += 1; // consume '$'
        match self.peek() {
            Some('(') if self.peek_at(1) == Some('(') => {
                self.pos += 2;
                let expr = self.lex_balanced_parens(start, true)?;
                text.0.push(TextUnit::Arithmetic(Word::from_literal(
                    expr.trim(),
                    start,
                )));
            }
            Some('(') => {
                self.pos += 1;
                let inner = self.lex_balanced_parens(start, false)?;
                let list = crate::parser::Parser::parse_source(&inner).map_err(|e| match e {
                    crate::error::ParseError::Lex(e) => e,
                    _ => LexError::UnterminatedCommandSubstitution { position: start },
                })?;
                text.0.push(TextUnit::CommandSubst(list));
            }
            Some('{') => {
                self.pos += 1;
                let param = self.lex_braced_param(start)?;
                text.0.push(TextUnit::BracedParam(param));
            }
            Some(c) if c.is_ascii_digit() => {
                self.pos += 1;
                text.0.push(TextUnit::RawParam(crate::ast::ParamName::Positional(
                    c.to_digit(10).unwrap(),
                )));
            }
            Some(c) if matches!(c, '@' | '*' | '#' | '?' | '!' | '$' | '-' | '0') => {
                self.pos += 1;
                text.0.push(TextUnit::RawParam(crate::ast::ParamName::Special(c)));
            }
            Some(c) if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
                    name.push(self.advance().unwrap());
                }
                text.0
                    .push(TextUnit::RawParam(crate::ast::ParamName::Variable(name)));
            }
            _ => {
                // Bare `$` with nothing recognizable following: literal.
                text.0.push(TextUnit::Literal('$'));
            }
        }
        Ok(())
    }

    fn lex_braced_param(
        &mut self,
        start: Position,
    ) -> Result<crate::ast::BracedParam, LexError> {
        use crate::ast::{BracedParam, ExpansionMode, Modifier, ParamName};
        let length = self.eat('#');
        let mut name_str = String::new();
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            name_str.push(self.advance().unwrap());
        }
        if name_str.is_empty() {
            if let Some(c) = self.peek() {
                if matches!(c, '@' | '*' | '#' | '?' | '!' | '$' | '-') {
                    name_str.push(c);
                    self.pos += 1;
                }
            }
        }
        let name = if let Ok(n) = name_str.parse::<u32>() {
            ParamName::Positional(n)
        } else if name_str.chars().count() == 1
            && matches!(name_str.chars().next(), Some('@' | '*' | '#' | '?' | '!' | '$' | '-'))
        {
            ParamName::Special(name_str.chars().next().unwrap())
        } else {
            ParamName::Variable(name_str)
        };

        let mut mode = ExpansionMode::Single;
        let mut index = None;
        if self.peek() == Some('[') {
            self.pos += 1;
            if self.peek() == Some('@') {
                self.pos += 1;
                mode = ExpansionMode::Multiple;
            } else {
                let mut idx_text = Text::default();
                self.lex_text_run(&mut idx_text, |c| c == ']')?;
                let mut w = Word::new(start);
                for u in idx_text.0 {
                    w.units.push(WordUnit::Unquoted(u));
                }
                index = Some(Box::new(w));
            }
            if !self.eat(']') {
                return Err(LexError::UnterminatedParameterExpansion { position: start });
            }
        }

        let modifier = if length && self.peek() == Some('}') {
            Modifier::Length
        } else {
            self.lex_modifier(start)?
        };

        if !self.eat('}') {
            return Err(LexError::UnterminatedParameterExpansion { position: start });
        }

        Ok(BracedParam {
            name,
            index,
            modifier,
            mode,
        })
    }

    fn lex_modifier(&mut self, start: Position) -> Result<crate::ast::Modifier, LexError> {
        use crate::ast::{Modifier, TrimLength, TrimSide, Trim};
        let word_until_brace = |lexer: &mut Self| -> Result<Word, LexError> {
            let mut text = Text::default();
            lexer.lex_text_run(&mut text, |c| c == '}')?;
            let mut w = Word::new(start);
            for u in text.0 {
                w.units.push(WordUnit::Unquoted(u));
            }
            Ok(w)
        };
        match self.peek() {
            Some('}') | None => Ok(Modifier::None),
            Some(':') => {
                self.pos += 1;
                match self.peek() {
                    Some('-') => {
                        self.pos += 1;
                        Ok(Modifier::UseDefault { colon: true, word: word_until_brace(self)? })
                    }
                    Some('=') => {
                        self.pos += 1;
                        Ok(Modifier::AssignDefault { colon: true, word: word_until_brace(self)? })
                    }
                    Some('+') => {
                        self.pos += 1;
                        Ok(Modifier::UseAlternative { colon: true, word: word_until_brace(self)? })
                    }
                    Some('?') => {
                        self.pos += 1;
                        Ok(Modifier::Error { colon: true, word: word_until_brace(self)? })
                    }
                    _ => {
                        let offset = word_until_colon_or_brace(self, start)?;
                        let length = if self.eat(':') {
                            Some(word_until_brace(self)?)
                        } else {
                            None
                        };
                        Ok(Modifier::Substring { offset, length })
                    }
                }
            }
            Some('-') => {
                self.pos += 1;
                Ok(Modifier::UseDefault { colon: false, word: word_until_brace(self)? })
            }
            Some('=') => {
                self.pos += 1;
                Ok(Modifier::AssignDefault { colon: false, word: word_until_brace(self)? })
            }
            Some('+') => {
                self.pos += 1;
                Ok(Modifier::UseAlternative { colon: false, word: word_until_brace(self)? })
            }
            Some('?') => {
                self.pos += 1;
                Ok(Modifier::Error { colon: false, word: word_until_brace(self)? })
            }
            Some('#') => {
                self.pos += 1;
                let length = if self.eat('#') {
                    TrimLength::Longest
                } else {
                    TrimLength::Shortest
                };
                Ok(Modifier::Trim(Trim {
                    side: TrimSide::Prefix,
                    length,
                    pattern: word_until_brace(self)?,
                }))
            }
            Some('%') => {
                self.pos += 1;
                let length = if self.eat('%') {
                    TrimLength::Longest
                } else {
                    TrimLength::Shortest
                };
                Ok(Modifier::Trim(Trim {
                    side: TrimSide::Suffix,
                    length,
                    pattern: word_until_brace(self)?,
                }))
            }
            Some('/') => {
                self.pos += 1;
                let all = self.eat('/');
                let mut pattern_text = Text::default();
                self.lex_text_run(&mut pattern_text, |c| c == '/' || c == '}')?;
                let mut pattern = Word::new(start);
                for u in pattern_text.0 {
                    pattern.units.push(WordUnit::Unquoted(u));
                }
                let replacement = if self.eat('/') {
                    word_until_brace(self)?
                } else {
                    Word::new(start)
                };
                Ok(Modifier::Replace { all, pattern, replacement })
            }
            Some('^') => {
                self.pos += 1;
                if self.eat('^') {
                    Ok(Modifier::UpperAll)
                } else {
                    Ok(Modifier::UpperFirst)
                }
            }
            Some(',') => {
                self.pos += 1;
                if self.eat(',') {
                    Ok(Modifier::LowerAll)
                } else {
                    Ok(Modifier::LowerFirst)
                }
            }
            Some(_) => Ok(Modifier::None),
        }
    }

    fn lex_backquote(&mut self, text: &mut Text) -> Result<(), LexError> {
        let start = self.position();
        self.pos += 1;
        let mut inner = String::new();
        loop {
            match self.advance() {
                Some('`') => break,
                Some('\\') => match self.advance() {
                    Some(c @ ('`' | '\\' | '$')) => inner.push(c),
                    Some(c) => {
                        inner.push('\\');
                        inner.push(c);
                    }
                    None => return Err(LexError::UnterminatedBackquote { position: start }),
                },
                Some(c) => inner.push(c),
                None => return Err(LexError::UnterminatedBackquote { position: start }),
            }
        }
        let list = crate::parser::Parser::parse_source(&inner)
            .map_err(|_| LexError::UnterminatedBackquote { position: start })?;
        text.0.push(TextUnit::CommandSubst(list));
        Ok(())
    }

    /// Consumes text up to (and including) the balanced closing paren(s),
    /// returning the inner text. `arithmetic` expects `))`.
    fn lex_balanced_parens(&mut self, start: Position, arithmetic: bool) -> Result<String, LexError> {
        let mut depth = 1i32;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(if arithmetic {
                        LexError::UnterminatedArithmeticExpansion { position: start }
                    } else {
                        LexError::UnterminatedCommandSubstitution { position: start }
                    })
                }
                Some('(') => {
                    depth += 1;
                    out.push(self.advance().unwrap());
                }
                Some(')') => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        if arithmetic {
                            if self.eat(')') {
                                return Ok(out);
                            } else {
                                out.push(')');
                                depth += 1;
                                continue;
                            }
                        }
                        return Ok(out);
                    }
                    out.push(')');
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }
    }

}

fn word_until_colon_or_brace(lexer: &mut Lexer, start: Position) -> Result<Word, LexError> {
    let mut text = Text::default();
    lexer.lex_text_run(&mut text, |c| c == ':' || c == '}')?;
    let mut w = Word::new(start);
    for u in text.0 {
        w.units.push(WordUnit::Unquoted(u));
    }
    Ok(w)
}

/// `{` and `}` are deliberately excluded: they are reserved words (grouping
/// command delimiters) only when they form a whole word by themselves, which
/// the parser detects via `as_bare_literal`, and are otherwise ordinary word
/// characters used by brace expansion (`pre{a,b}post`).
fn is_operator_start(c: char) -> bool {
    matches!(c, '|' | '&' | ';' | '(' | ')' | '<' | '>')
}

fn render_word_literally(word: &Word) -> String {
    use crate::ast::{TextUnit, WordUnit};
    let mut s = String::new();
    for unit in &word.units {
        match unit {
            WordUnit::Unquoted(TextUnit::Literal(c)) => s.push(*c),
            WordUnit::SingleQuote(lit) => s.push_str(lit),
            _ => {}
        }
    }
    s
}

/// Tokenizes `source` into a flat token stream, per the public `tokenize`
/// host-API entry point. Heredoc bodies are resolved in-line and are
/// attached to their requesting redirection during parsing rather than
/// carried in the token stream, since `Token` itself has no redirection
/// shape.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
