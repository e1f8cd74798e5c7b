//! Lexer and recursive-descent parser for the shell language: turns source
//! text into the [`ast`] types, with no awareness of environment, execution,
//! or the virtual filesystem.

pub mod ast;
pub mod error;
mod lexer;
mod parser;
pub mod token;

pub use ast::{List, Word};
pub use error::{LexError, ParseError, Position};
pub use token::{Token, TokenKind};

/// Splits `source` into a token stream, including resolved heredoc bodies.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    lexer::tokenize(source)
}

/// Parses a complete script (or command-substitution body) into a [`List`].
pub fn parse(source: &str) -> Result<List, ParseError> {
    parser::Parser::parse_source(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Command, TextUnit, WordUnit};

    #[test]
    fn tokenizes_simple_pipeline() {
        let tokens = tokenize("echo hi | cat\n").unwrap();
        assert!(tokens.len() >= 5);
    }

    #[test]
    fn parses_simple_command() {
        let list = parse("echo hello world\n").unwrap();
        assert_eq!(list.0.len(), 1);
        let pipeline = &list.0[0].and_or.first;
        assert_eq!(pipeline.commands.len(), 1);
        match &pipeline.commands[0] {
            Command::Simple(cmd) => assert_eq!(cmd.words.len(), 3),
            _ => panic!("expected a simple command"),
        }
    }

    #[test]
    fn parses_pipeline_and_and_or() {
        let list = parse("true && echo yes || echo no\n").unwrap();
        assert_eq!(list.0.len(), 1);
        assert_eq!(list.0[0].and_or.rest.len(), 2);
    }

    #[test]
    fn parses_if_statement() {
        let list = parse("if true; then echo a; else echo b; fi\n").unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Compound(full) => match &full.command {
                crate::ast::CompoundCommand::If { clauses, else_part } => {
                    assert_eq!(clauses.len(), 1);
                    assert!(else_part.is_some());
                }
                other => panic!("expected an if command, got {other:?}"),
            },
            other => panic!("expected a compound command, got {other:?}"),
        }
    }

    #[test]
    fn parses_for_loop() {
        let list = parse("for x in a b c; do echo $x; done\n").unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Compound(full) => match &full.command {
                crate::ast::CompoundCommand::For { name, words, .. } => {
                    assert_eq!(name, "x");
                    assert_eq!(words.as_ref().unwrap().len(), 3);
                }
                other => panic!("expected a for command, got {other:?}"),
            },
            other => panic!("expected a compound command, got {other:?}"),
        }
    }

    #[test]
    fn parses_assignment_prefix() {
        let list = parse("FOO=bar echo $FOO\n").unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Simple(cmd) => {
                assert_eq!(cmd.assigns.len(), 1);
                assert_eq!(cmd.assigns[0].name, "FOO");
                assert_eq!(cmd.words.len(), 1);
            }
            _ => panic!("expected a simple command"),
        }
    }

    #[test]
    fn preserves_single_quote_structure() {
        let list = parse("echo 'a b'\n").unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Simple(cmd) => {
                assert!(cmd.words[1]
                    .units
                    .iter()
                    .any(|u| matches!(u, WordUnit::SingleQuote(s) if s == "a b")));
            }
            _ => panic!("expected a simple command"),
        }
    }

    #[test]
    fn quoted_heredoc_delimiter_suppresses_expansion() {
        let list = parse("cat <<'EOF'\n$unused\nEOF\n").unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Simple(cmd) => {
                let redir = &cmd.redirs[0];
                match &redir.body {
                    crate::ast::RedirBody::HereDoc(hd) => {
                        assert!(hd.quoted);
                        assert!(hd
                            .content
                            .0
                            .iter()
                            .all(|u| matches!(u, TextUnit::Literal(_))));
                    }
                    _ => panic!("expected a heredoc body"),
                }
            }
            _ => panic!("expected a simple command"),
        }
    }

    #[test]
    fn rejects_empty_command() {
        assert!(parse(";\n").is_err());
    }

    #[test]
    fn bracket_test_command_does_not_panic_lexer() {
        let list = parse("[ -f x ]\n").unwrap();
        assert_eq!(list.0.len(), 1);
    }

    #[test]
    fn parses_array_literal_assignment() {
        let list = parse("arr=(a b c)\n").unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Simple(cmd) => {
                assert_eq!(cmd.assigns.len(), 1);
                assert_eq!(cmd.assigns[0].name, "arr");
                match &cmd.assigns[0].value {
                    crate::ast::AssignValue::Array(words) => assert_eq!(words.len(), 3),
                    other => panic!("expected an array value, got {other:?}"),
                }
                assert!(cmd.words.is_empty());
            }
            _ => panic!("expected a simple command"),
        }
    }

    #[test]
    fn array_literal_assignment_spans_newlines() {
        let list = parse("arr=(\n  a\n  b\n)\n").unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Simple(cmd) => match &cmd.assigns[0].value {
                crate::ast::AssignValue::Array(words) => assert_eq!(words.len(), 2),
                other => panic!("expected an array value, got {other:?}"),
            },
            _ => panic!("expected a simple command"),
        }
    }

    #[test]
    fn brace_expansion_word_stays_literal() {
        let list = parse("echo pre{a,b}post\n").unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Simple(cmd) => {
                let rendered: String = cmd.words[1]
                    .units
                    .iter()
                    .filter_map(|u| match u {
                        WordUnit::Unquoted(TextUnit::Literal(c)) => Some(*c),
                        _ => None,
                    })
                    .collect();
                assert_eq!(rendered, "pre{a,b}post");
            }
            _ => panic!("expected a simple command"),
        }
    }
}
