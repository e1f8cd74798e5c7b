use crate::error::ArithError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Number(i64),
    Ident(String),
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    Not,
    BitNot,
    PlusPlus,
    MinusMinus,
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AndEq,
    OrEq,
    XorEq,
    ShlEq,
    ShrEq,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    Question,
    Colon,
    Comma,
    LParen,
    RParen,
}

pub fn tokenize(src: &str) -> Result<Vec<Token>, ArithError> {
    let chars: Vec<char> = src.chars().collect();
    let mut i = 0;
    let mut out = Vec::new();
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\n' => i += 1,
            '0'..='9' => {
                let start = i;
                if c == '0' && matches!(chars.get(i + 1), Some('x') | Some('X')) {
                    i += 2;
                    let hstart = i;
                    while matches!(chars.get(i), Some(c) if c.is_ascii_hexdigit()) {
                        i += 1;
                    }
                    let text: String = chars[hstart..i].iter().collect();
                    let n = i64::from_str_radix(&text, 16)
                        .map_err(|_| ArithError::Syntax(format!("bad hex literal near `{text}`")))?;
                    out.push(Token::Number(n));
                } else {
                    while matches!(chars.get(i), Some(c) if c.is_ascii_digit()) {
                        i += 1;
                    }
                    let text: String = chars[start..i].iter().collect();
                    if text.starts_with('0') && text.len() > 1 {
                        let n = i64::from_str_radix(&text, 8).map_err(|_| {
                            ArithError::Syntax(format!("bad octal literal near `{text}`"))
                        })?;
                        out.push(Token::Number(n));
                    } else {
                        let n = text
                            .parse()
                            .map_err(|_| ArithError::Syntax(format!("bad literal `{text}`")))?;
                        out.push(Token::Number(n));
                    }
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while matches!(chars.get(i), Some(c) if c.is_alphanumeric() || *c == '_') {
                    i += 1;
                }
                out.push(Token::Ident(chars[start..i].iter().collect()));
            }
            '+' => {
                i += 1;
                if chars.get(i) == Some(&'+') {
                    i += 1;
                    out.push(Token::PlusPlus);
                } else if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::PlusEq);
                } else {
                    out.push(Token::Plus);
                }
            }
            '-' => {
                i += 1;
                if chars.get(i) == Some(&'-') {
                    i += 1;
                    out.push(Token::MinusMinus);
                } else if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::MinusEq);
                } else {
                    out.push(Token::Minus);
                }
            }
            '*' => {
                i += 1;
                if chars.get(i) == Some(&'*') {
                    i += 1;
                    out.push(Token::StarStar);
                } else if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::StarEq);
                } else {
                    out.push(Token::Star);
                }
            }
            '/' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::SlashEq);
                } else {
                    out.push(Token::Slash);
                }
            }
            '%' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::PercentEq);
                } else {
                    out.push(Token::Percent);
                }
            }
            '!' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::NotEq);
                } else {
                    out.push(Token::Not);
                }
            }
            '~' => {
                i += 1;
                out.push(Token::BitNot);
            }
            '=' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::EqEq);
                } else {
                    out.push(Token::Eq);
                }
            }
            '<' => {
                i += 1;
                if chars.get(i) == Some(&'<') {
                    i += 1;
                    if chars.get(i) == Some(&'=') {
                        i += 1;
                        out.push(Token::ShlEq);
                    } else {
                        out.push(Token::Shl);
                    }
                } else if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::Le);
                } else {
                    out.push(Token::Lt);
                }
            }
            '>' => {
                i += 1;
                if chars.get(i) == Some(&'>') {
                    i += 1;
                    if chars.get(i) == Some(&'=') {
                        i += 1;
                        out.push(Token::ShrEq);
                    } else {
                        out.push(Token::Shr);
                    }
                } else if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::Ge);
                } else {
                    out.push(Token::Gt);
                }
            }
            '&' => {
                i += 1;
                if chars.get(i) == Some(&'&') {
                    i += 1;
                    out.push(Token::AndAnd);
                } else if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::AndEq);
                } else {
                    out.push(Token::Amp);
                }
            }
            '|' => {
                i += 1;
                if chars.get(i) == Some(&'|') {
                    i += 1;
                    out.push(Token::OrOr);
                } else if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::OrEq);
                } else {
                    out.push(Token::Pipe);
                }
            }
            '^' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    i += 1;
                    out.push(Token::XorEq);
                } else {
                    out.push(Token::Caret);
                }
            }
            '?' => {
                i += 1;
                out.push(Token::Question);
            }
            ':' => {
                i += 1;
                out.push(Token::Colon);
            }
            ',' => {
                i += 1;
                out.push(Token::Comma);
            }
            '(' => {
                i += 1;
                out.push(Token::LParen);
            }
            ')' => {
                i += 1;
                out.push(Token::RParen);
            }
            '$' => {
                // `$name` is accepted as an alternate spelling of `name`
                // inside `$((...))` bodies some callers pass through
                // unstripped; skip it and lex the following identifier.
                i += 1;
            }
            other => {
                return Err(ArithError::Syntax(format!("unexpected character `{other}`")))
            }
        }
    }
    Ok(out)
}
