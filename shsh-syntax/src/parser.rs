//! Recursive-descent parser turning a token stream into a [`List`] AST.

use crate::ast::*;
use crate::error::{ParseError, Position};
use crate::lexer::Lexer;
use crate::token::{as_bare_literal, Operator, Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Parses a whole script or command-substitution body in one call; this
    /// is the function the lexer calls recursively for `$(...)`/backquotes,
    /// and the one the crate root exposes as the public `parse` entry point.
    pub fn parse_source(source: &str) -> Result<List, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        let mut parser = Parser::new(tokens);
        let list = parser.parse_list(&[])?;
        parser.skip_newlines();
        if let Some(tok) = parser.peek() {
            return Err(ParseError::UnexpectedToken {
                position: tok.position,
                expected: "end of input".into(),
                found: describe(tok),
            });
        }
        Ok(list)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn position(&self) -> Position {
        self.peek()
            .map(|t| t.position)
            .unwrap_or_else(|| self.tokens.last().map(|t| t.position).unwrap_or_default())
    }

    fn advance(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek_kind(), Some(TokenKind::Newline)) {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while matches!(
            self.peek_kind(),
            Some(TokenKind::Newline) | Some(TokenKind::HereDocBody(_))
        ) {
            self.pos += 1;
        }
    }

    fn is_op(&self, op: Operator) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Op(o)) if *o == op)
    }

    fn eat_op(&mut self, op: Operator) -> bool {
        if self.is_op(op) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn bare_word_is(&self, s: &str) -> bool {
        match self.peek_kind() {
            Some(TokenKind::Word(w)) => as_bare_literal(w).as_deref() == Some(s),
            _ => false,
        }
    }

    fn eat_bare_word(&mut self, s: &str) -> bool {
        if self.bare_word_is(s) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_bare_word(&mut self, s: &str) -> Result<(), ParseError> {
        if self.eat_bare_word(s) {
            Ok(())
        } else {
            let pos = self.position();
            Err(self.unexpected(pos, format!("`{s}`")))
        }
    }

    fn unexpected(&self, position: Position, expected: String) -> ParseError {
        match self.peek() {
            Some(tok) => ParseError::UnexpectedToken {
                position,
                expected,
                found: describe(tok),
            },
            None => ParseError::UnexpectedEof { position, expected },
        }
    }

    /// Parses a `List` (sequence of items), stopping before any token whose
    /// bare-word text is in `terminators`, or at end of input.
    fn parse_list(&mut self, terminators: &[&str]) -> Result<List, ParseError> {
        let mut items = Vec::new();
        loop {
            self.skip_separators();
            if self.peek().is_none() || self.at_terminator(terminators) {
                break;
            }
            let and_or = self.parse_and_or_list()?;
            let separator = if self.eat_op(Operator::Semi) {
                Some(Separator::Semicolon)
            } else if self.eat_op(Operator::Amp) {
                Some(Separator::Async)
            } else {
                None
            };
            items.push(Item { and_or, separator });
            if matches!(self.peek_kind(), Some(TokenKind::Newline)) {
                continue;
            }
            if separator.is_none() {
                break;
            }
        }
        Ok(List(items))
    }

    fn at_terminator(&self, terminators: &[&str]) -> bool {
        terminators.iter().any(|t| self.bare_word_is(t))
    }

    fn parse_and_or_list(&mut self) -> Result<AndOrList, ParseError> {
        let first = self.parse_pipeline()?;
        let mut rest = Vec::new();
        loop {
            let op = if self.eat_op(Operator::AndAnd) {
                AndOr::And
            } else if self.eat_op(Operator::OrOr) {
                AndOr::Or
            } else {
                break;
            };
            self.skip_newlines();
            rest.push((op, self.parse_pipeline()?));
        }
        Ok(AndOrList { first, rest })
    }

    fn parse_pipeline(&mut self) -> Result<Pipeline, ParseError> {
        let negation = self.eat_bare_word("!");
        let mut commands = vec![self.parse_command()?];
        while self.eat_op(Operator::Pipe) {
            self.skip_newlines();
            commands.push(self.parse_command()?);
        }
        Ok(Pipeline { commands, negation })
    }

    fn parse_command(&mut self) -> Result<Command, ParseError> {
        if self.is_op(Operator::LParen) {
            return self.parse_compound_as_command();
        }
        if self.bare_word_is("{") {
            return self.parse_compound_as_command();
        }
        if self.bare_word_is("if")
            || self.bare_word_is("for")
            || self.bare_word_is("while")
            || self.bare_word_is("until")
            || self.bare_word_is("case")
            || self.bare_word_is("[[")
        {
            return self.parse_compound_as_command();
        }
        if self.is_op(Operator::DParenOpen) {
            return self.parse_compound_as_command();
        }
        if self.bare_word_is("function") {
            return self.parse_function_definition(true);
        }
        // `name()` function definition: word immediately followed by `()`.
        if let Some(TokenKind::Word(_)) = self.peek_kind() {
            if matches!(self.tokens.get(self.pos + 1).map(|t| &t.kind), Some(TokenKind::Op(Operator::LParen)))
                && matches!(self.tokens.get(self.pos + 2).map(|t| &t.kind), Some(TokenKind::Op(Operator::RParen)))
            {
                return self.parse_function_definition(false);
            }
        }
        self.parse_simple_command().map(Command::Simple)
    }

    fn parse_function_definition(&mut self, has_keyword: bool) -> Result<Command, ParseError> {
        let pos = self.position();
        if has_keyword {
            self.expect_bare_word("function")?;
        }
        let name = match self.advance() {
            Some(Token { kind: TokenKind::Word(w), .. }) => {
                as_bare_literal(&w).ok_or_else(|| ParseError::InvalidAssignment {
                    position: pos,
                    name: "<function name>".into(),
                })?
            }
            _ => return Err(self.unexpected(pos, "function name".into())),
        };
        if self.eat_op(Operator::LParen) {
            if !self.eat_op(Operator::RParen) {
                let p = self.position();
                return Err(self.unexpected(p, "`)`".into()));
            }
        }
        self.skip_newlines();
        let body = self.parse_full_compound_command()?;
        Ok(Command::Function(FunctionDefinition {
            has_keyword,
            name,
            body: Box::new(body),
        }))
    }

    fn parse_compound_as_command(&mut self) -> Result<Command, ParseError> {
        self.parse_full_compound_command().map(Command::Compound)
    }

    fn parse_full_compound_command(&mut self) -> Result<FullCompoundCommand, ParseError> {
        let command = self.parse_compound_command()?;
        let redirs = self.parse_redirs()?;
        Ok(FullCompoundCommand { command, redirs })
    }

    fn parse_compound_command(&mut self) -> Result<CompoundCommand, ParseError> {
        let pos = self.position();
        if self.eat_op(Operator::LParen) {
            let list = self.parse_list(&[])?;
            self.expect_rparen()?;
            return Ok(CompoundCommand::Subshell(list));
        }
        if self.eat_bare_word("{") {
            let list = self.parse_list(&["}"])?;
            self.expect_bare_word("}")?;
            return Ok(CompoundCommand::Grouping(list));
        }
        if self.eat_op(Operator::DParenOpen) {
            let expr = self.parse_arithmetic_command_body(pos)?;
            return Ok(CompoundCommand::Arithmetic(expr));
        }
        if self.eat_bare_word("[[") {
            let mut words = Vec::new();
            loop {
                if self.bare_word_is("]]") {
                    break;
                }
                match self.advance() {
                    Some(Token { kind: TokenKind::Word(w), .. }) => words.push(w),
                    // `&&`, `||`, `!`, `(`, `)`, `<`, `>` are all meaningful
                    // inside `[[ ]]`; keep them as literal word tokens for
                    // the conditional-expression evaluator to re-interpret.
                    Some(Token { kind: TokenKind::Op(op), position }) => {
                        words.push(Word::from_literal(op.text(), position))
                    }
                    _ => return Err(self.unexpected(self.position(), "`]]`".into())),
                }
            }
            self.expect_bare_word("]]")?;
            return Ok(CompoundCommand::Conditional(words));
        }
        if self.eat_bare_word("if") {
            return self.parse_if();
        }
        if self.eat_bare_word("for") {
            return self.parse_for();
        }
        if self.eat_bare_word("while") {
            let condition = self.parse_list(&["do"])?;
            self.expect_bare_word("do")?;
            let body = self.parse_list(&["done"])?;
            self.expect_bare_word("done")?;
            return Ok(CompoundCommand::While { condition, body });
        }
        if self.eat_bare_word("until") {
            let condition = self.parse_list(&["do"])?;
            self.expect_bare_word("do")?;
            let body = self.parse_list(&["done"])?;
            self.expect_bare_word("done")?;
            return Ok(CompoundCommand::Until { condition, body });
        }
        if self.eat_bare_word("case") {
            return self.parse_case();
        }
        Err(self.unexpected(pos, "a command".into()))
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        if self.eat_op(Operator::RParen) {
            Ok(())
        } else {
            let pos = self.position();
            Err(self.unexpected(pos, "`)`".into()))
        }
    }

    /// `((expr))` is lexed as `DParenOpen` followed by ordinary words up to
    /// the matching `RParen RParen`; we splice the words' literal text back
    /// into one arithmetic source string.
    fn parse_arithmetic_command_body(&mut self, pos: Position) -> Result<Word, ParseError> {
        let mut text = String::new();
        let mut depth = 1i32;
        loop {
            match self.advance() {
                Some(Token { kind: TokenKind::Op(Operator::LParen), .. }) => {
                    depth += 1;
                    text.push('(');
                }
                Some(Token { kind: TokenKind::Op(Operator::RParen), .. }) => {
                    depth -= 1;
                    if depth == 0 {
                        if self.eat_op(Operator::RParen) {
                            return Ok(Word::from_literal(text.trim(), pos));
                        }
                        depth += 1;
                        text.push(')');
                        continue;
                    }
                    text.push(')');
                }
                Some(Token { kind: TokenKind::Word(w), .. }) => {
                    text.push_str(&render_word_source(&w));
                    text.push(' ');
                }
                Some(Token { kind: TokenKind::Newline, .. })
                | Some(Token { kind: TokenKind::HereDocBody(_), .. }) => {}
                Some(Token { kind: TokenKind::Op(op), position }) => {
                    text.push_str(op.text());
                    let _ = position;
                }
                None => return Err(ParseError::UnexpectedEof { position: pos, expected: "`))`".into() }),
            }
        }
    }

    fn parse_if(&mut self) -> Result<CompoundCommand, ParseError> {
        let mut clauses = Vec::new();
        let condition = self.parse_list(&["then"])?;
        self.expect_bare_word("then")?;
        let body = self.parse_list(&["elif", "else", "fi"])?;
        clauses.push(ElifThen { condition, body });
        while self.eat_bare_word("elif") {
            let condition = self.parse_list(&["then"])?;
            self.expect_bare_word("then")?;
            let body = self.parse_list(&["elif", "else", "fi"])?;
            clauses.push(ElifThen { condition, body });
        }
        let else_part = if self.eat_bare_word("else") {
            Some(self.parse_list(&["fi"])?)
        } else {
            None
        };
        self.expect_bare_word("fi")?;
        Ok(CompoundCommand::If { clauses, else_part })
    }

    fn parse_for(&mut self) -> Result<CompoundCommand, ParseError> {
        let pos = self.position();
        let name = match self.advance() {
            Some(Token { kind: TokenKind::Word(w), .. }) => {
                as_bare_literal(&w).ok_or_else(|| ParseError::InvalidAssignment {
                    position: pos,
                    name: "<for variable>".into(),
                })?
            }
            _ => return Err(self.unexpected(pos, "a variable name".into())),
        };
        self.skip_separators();
        let words = if self.eat_bare_word("in") {
            let mut words = Vec::new();
            loop {
                match self.peek_kind() {
                    Some(TokenKind::Word(_)) => {
                        if let Some(Token { kind: TokenKind::Word(w), .. }) = self.advance() {
                            words.push(w);
                        }
                    }
                    _ => break,
                }
            }
            self.eat_op(Operator::Semi);
            self.skip_separators();
            Some(words)
        } else {
            self.eat_op(Operator::Semi);
            self.skip_separators();
            None
        };
        self.expect_bare_word("do")?;
        let body = self.parse_list(&["done"])?;
        self.expect_bare_word("done")?;
        Ok(CompoundCommand::For { name, words, body })
    }

    fn parse_case(&mut self) -> Result<CompoundCommand, ParseError> {
        let pos = self.position();
        let subject = match self.advance() {
            Some(Token { kind: TokenKind::Word(w), .. }) => w,
            _ => return Err(self.unexpected(pos, "a word".into())),
        };
        self.skip_separators();
        self.expect_bare_word("in")?;
        self.skip_separators();
        let mut items = Vec::new();
        while !self.bare_word_is("esac") {
            let _ = self.eat_op(Operator::LParen);
            let mut patterns = vec![self.expect_word("a case pattern")?];
            while self.eat_op(Operator::Pipe) {
                patterns.push(self.expect_word("a case pattern")?);
            }
            self.expect_rparen_or_word(")")?;
            self.skip_separators();
            let body = self.parse_list(&["esac"])?;
            items.push(CaseItem { patterns, body });
            self.eat_op(Operator::SemiSemi);
            self.skip_separators();
        }
        self.expect_bare_word("esac")?;
        Ok(CompoundCommand::Case { subject, items })
    }

    fn expect_rparen_or_word(&mut self, s: &str) -> Result<(), ParseError> {
        if self.eat_op(Operator::RParen) {
            return Ok(());
        }
        let pos = self.position();
        Err(self.unexpected(pos, format!("`{s}`")))
    }

    fn expect_word(&mut self, what: &str) -> Result<Word, ParseError> {
        match self.advance() {
            Some(Token { kind: TokenKind::Word(w), .. }) => Ok(w),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.position,
                expected: what.into(),
                found: describe(&tok),
            }),
            None => Err(ParseError::UnexpectedEof {
                position: self.position(),
                expected: what.into(),
            }),
        }
    }

    fn parse_simple_command(&mut self) -> Result<SimpleCommand, ParseError> {
        let mut assigns = Vec::new();
        let mut words = Vec::new();
        let mut redirs = Vec::new();
        loop {
            match self.try_parse_redir()? {
                Some(r) => {
                    redirs.push(r);
                    continue;
                }
                None => {}
            }
            match self.peek().cloned() {
                Some(Token { kind: TokenKind::Word(w), .. }) => {
                    if words.is_empty() {
                        if let Some(assign) = self.try_as_array_assignment(&w)? {
                            assigns.push(assign);
                            continue;
                        }
                        if let Some(assign) = self.try_as_assignment(&w) {
                            self.pos += 1;
                            assigns.push(assign);
                            continue;
                        }
                    }
                    if let Some(Token { kind: TokenKind::Word(w), .. }) = self.advance() {
                        words.push(w);
                    }
                }
                _ => break,
            }
        }
        if assigns.is_empty() && words.is_empty() && redirs.is_empty() {
            return Err(ParseError::EmptyCommand {
                position: self.position(),
            });
        }
        Ok(SimpleCommand {
            assigns,
            words,
            redirs,
        })
    }

    fn try_as_assignment(&self, word: &Word) -> Option<Assign> {
        let literal_prefix = word_literal_prefix(word);
        let eq = literal_prefix.find('=')?;
        if eq == 0 {
            return None;
        }
        let name = &literal_prefix[..eq];
        if !is_valid_name(name) {
            return None;
        }
        // Only a purely-literal `name=` prefix is treated as an assignment;
        // the remainder of the word (after stripping `name=`) becomes the
        // value, reusing the original word's later units verbatim.
        let value_word = strip_prefix_chars(word, eq + 1);
        Some(Assign {
            name: name.to_string(),
            value: AssignValue::Scalar(value_word),
            position: word.position,
        })
    }

    /// Recognizes `name=(word...)` array-literal assignments. Only fires
    /// when the whole word is the bare literal `name=` (no expansions
    /// glued onto the `=`) immediately followed by `(`, distinguishing it
    /// from a scalar assignment whose value happens to start with a
    /// parenthesis-free subshell word.
    fn try_as_array_assignment(&mut self, word: &Word) -> Result<Option<Assign>, ParseError> {
        let literal_prefix = word_literal_prefix(word);
        let Some(eq) = literal_prefix.find('=') else {
            return Ok(None);
        };
        if eq == 0 {
            return Ok(None);
        }
        let name = literal_prefix[..eq].to_string();
        if !is_valid_name(&name) {
            return Ok(None);
        }
        if !word_is_pure_literal(word, &format!("{name}=")) {
            return Ok(None);
        }
        if !matches!(self.tokens.get(self.pos + 1).map(|t| &t.kind), Some(TokenKind::Op(Operator::LParen))) {
            return Ok(None);
        }
        self.pos += 2; // consume `name=` and `(`
        let mut elements = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat_op(Operator::RParen) {
                break;
            }
            match self.advance() {
                Some(Token { kind: TokenKind::Word(w), .. }) => elements.push(w),
                Some(tok) => {
                    return Err(ParseError::UnexpectedToken {
                        position: tok.position,
                        expected: "`)`".into(),
                        found: describe(&tok),
                    })
                }
                None => {
                    return Err(ParseError::UnexpectedEof {
                        position: self.position(),
                        expected: "`)`".into(),
                    })
                }
            }
        }
        Ok(Some(Assign {
            name,
            value: AssignValue::Array(elements),
            position: word.position,
        }))
    }

    fn try_parse_redir(&mut self) -> Result<Option<Redir>, ParseError> {
        let (fd, op_pos) = match self.peek_kind() {
            Some(TokenKind::Word(w)) => match fd_prefix(w) {
                Some(fd) if self.next_is_redir_op() => (Some(fd), self.position()),
                _ => return Ok(None),
            },
            Some(TokenKind::Op(op)) if is_redir_operator(*op) => (None, self.position()),
            _ => return Ok(None),
        };
        if fd.is_some() {
            self.pos += 1; // consume the fd-prefix word
        }
        let op = match self.advance() {
            Some(Token { kind: TokenKind::Op(op), .. }) => op,
            _ => return Err(self.unexpected(op_pos, "a redirection operator".into())),
        };
        let redir_op = match op {
            Operator::Less => RedirOp::FileIn,
            Operator::Great => RedirOp::FileOut,
            Operator::DGreat => RedirOp::FileAppend,
            Operator::Clobber => RedirOp::FileClobber,
            Operator::LessGreat => RedirOp::FileInOut,
            Operator::LessAnd => RedirOp::DupIn,
            Operator::GreatAnd => RedirOp::DupOut,
            Operator::DLess | Operator::DLessDash => {
                let delim_word = self.expect_word("a heredoc delimiter")?;
                let delimiter = as_bare_literal(&delim_word).unwrap_or_else(|| word_literal_prefix(&delim_word));
                let quoted = word_has_quote_unit(&delim_word);
                let body = self.take_next_heredoc_body()?;
                return Ok(Some(Redir {
                    fd,
                    op: if op == Operator::DLessDash {
                        RedirOp::HereDocTabs
                    } else {
                        RedirOp::HereDoc
                    },
                    body: RedirBody::HereDoc(HereDoc {
                        delimiter,
                        quoted,
                        remove_tabs: op == Operator::DLessDash,
                        content: body,
                    }),
                }));
            }
            Operator::TLess => RedirOp::HereString, // `<<<word`
            Operator::AndGreat => RedirOp::FileOut, // `&>file`: stdout+stderr, approximated at the executor layer
            other => return Err(self.unexpected(op_pos, format!("unsupported redirection `{}`", other.text()))),
        };
        let operand = self.expect_word("a redirection target")?;
        Ok(Some(Redir {
            fd,
            op: redir_op,
            body: RedirBody::Normal { operand },
        }))
    }

    fn next_is_redir_op(&self) -> bool {
        matches!(
            self.tokens.get(self.pos + 1).map(|t| &t.kind),
            Some(TokenKind::Op(op)) if is_redir_operator(*op)
        )
    }

    /// Heredoc bodies are emitted by the lexer as `HereDocBody` tokens
    /// immediately following the physical line's `Newline`; they are
    /// resolved in the same left-to-right order their `<<`/`<<-` operators
    /// were requested, so the parser can simply pull the next one whenever
    /// it has finished building that redirection node's siblings up through
    /// the newline. To keep the recursive-descent structure simple, the
    /// lookup instead scans forward from the current position for the
    /// nearest unconsumed `HereDocBody` token and removes it from the
    /// stream, which is equivalent for well-formed input.
    fn take_next_heredoc_body(&mut self) -> Result<Text, ParseError> {
        if let Some(idx) = self.tokens[self.pos..]
            .iter()
            .position(|t| matches!(t.kind, TokenKind::HereDocBody(_)))
        {
            let token = self.tokens.remove(self.pos + idx);
            if let TokenKind::HereDocBody(text) = token.kind {
                return Ok(text);
            }
        }
        Err(ParseError::UnexpectedEof {
            position: self.position(),
            expected: "heredoc body".into(),
        })
    }

    fn parse_redirs(&mut self) -> Result<Vec<Redir>, ParseError> {
        let mut redirs = Vec::new();
        while let Some(r) = self.try_parse_redir()? {
            redirs.push(r);
        }
        Ok(redirs)
    }
}

fn describe(tok: &Token) -> String {
    match &tok.kind {
        TokenKind::Word(w) => as_bare_literal(w).unwrap_or_else(|| "<word>".into()),
        TokenKind::Op(op) => op.text().to_string(),
        TokenKind::Newline => "newline".into(),
        TokenKind::HereDocBody(_) => "<heredoc body>".into(),
    }
}

fn is_redir_operator(op: Operator) -> bool {
    matches!(
        op,
        Operator::Less
            | Operator::Great
            | Operator::DGreat
            | Operator::Clobber
            | Operator::LessGreat
            | Operator::LessAnd
            | Operator::GreatAnd
            | Operator::DLess
            | Operator::DLessDash
            | Operator::TLess
            | Operator::AndGreat
    )
}

/// Extracts a leading run of ASCII digits from a word's literal prefix, used
/// to recognize `2>`-style fd-prefixed redirections.
fn fd_prefix(word: &Word) -> Option<u32> {
    let prefix = word_literal_prefix(word);
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Renders the literal, unquoted-only prefix of a word (stops at the first
/// non-literal unit), used for assignment/fd-prefix recognition which by
/// POSIX rule only ever look at unquoted leading characters.
fn word_literal_prefix(word: &Word) -> String {
    let mut s = String::new();
    for unit in &word.units {
        match unit {
            WordUnit::Unquoted(TextUnit::Literal(c)) => s.push(*c),
            _ => break,
        }
    }
    s
}

/// True when `word` is made up entirely of unquoted literal characters
/// spelling exactly `expected` — used to tell a bare `name=` assignment
/// prefix apart from one with trailing expansions glued on.
fn word_is_pure_literal(word: &Word, expected: &str) -> bool {
    let mut s = String::new();
    for unit in &word.units {
        match unit {
            WordUnit::Unquoted(TextUnit::Literal(c)) => s.push(*c),
            _ => return false,
        }
    }
    s == expected
}

fn word_has_quote_unit(word: &Word) -> bool {
    word.units
        .iter()
        .any(|u| matches!(u, WordUnit::SingleQuote(_) | WordUnit::DoubleQuote(_)))
}

fn is_valid_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Returns a copy of `word` with the first `skip` *unquoted-literal*
/// characters removed from its front (used to strip the `name=` prefix off
/// an assignment word while preserving any expansions that follow it).
fn strip_prefix_chars(word: &Word, skip: usize) -> Word {
    let mut remaining = skip;
    let mut units = Vec::new();
    for unit in &word.units {
        if remaining == 0 {
            units.push(unit.clone());
            continue;
        }
        match unit {
            WordUnit::Unquoted(TextUnit::Literal(_)) => {
                remaining -= 1;
            }
            _ => units.push(unit.clone()),
        }
    }
    Word {
        units,
        position: word.position,
    }
}

/// Renders a word back to approximate source text, used only to splice
/// `((...))` arithmetic command bodies (which the lexer hands to the parser
/// as ordinary words) into one arithmetic source string.
fn render_word_source(word: &Word) -> String {
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
