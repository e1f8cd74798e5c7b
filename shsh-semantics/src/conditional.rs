//! Evaluates `[[ ... ]]` conditional expressions (§4.5). The parser keeps
//! `[[ ]]` tokens as plain words rather than a nested grammar (see
//! `shsh-syntax`'s `CompoundCommand::Conditional`), so this module is a
//! small recursive-descent expression parser of its own, one precedence
//! level per bash's documented `[[ ]]` grammar: `||` over `&&` over `!`
//! over a parenthesized/unary/binary primary.

use shsh_syntax::ast::Word;
use shsh_syntax::token::as_bare_literal;

use crate::expand;
use crate::state::{BuiltinRegistry, State};

const UNARY_FILE_OPS: &[&str] = &[
    "-e", "-f", "-d", "-L", "-h", "-s", "-r", "-w", "-x", "-p", "-S", "-b", "-c", "-u", "-g", "-k", "-O", "-G",
];
const UNARY_STRING_OPS: &[&str] = &["-z", "-n"];
const UNARY_VAR_OPS: &[&str] = &["-v"];
const BINARY_OPS: &[&str] = &[
    "=", "==", "!=", "<", ">", "=~", "-eq", "-ne", "-lt", "-le", "-gt", "-ge", "-nt", "-ot", "-ef",
];

struct Cursor<'a> {
    words: &'a [Word],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek_literal(&self) -> Option<String> {
        self.words.get(self.pos).and_then(as_bare_literal)
    }

    fn peek_word(&self) -> Option<&'a Word> {
        self.words.get(self.pos)
    }

    fn advance_word(&mut self) -> Result<&'a Word, String> {
        let w = self.words.get(self.pos).ok_or("`[[`: unexpected end of expression")?;
        self.pos += 1;
        Ok(w)
    }

    fn eat_literal(&mut self, s: &str) -> bool {
        if self.peek_literal().as_deref() == Some(s) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_literal(&mut self, s: &str) -> Result<(), String> {
        if self.eat_literal(s) {
            Ok(())
        } else {
            Err(format!("`[[`: expected `{s}`"))
        }
    }
}

/// Evaluates a whole `[[ ... ]]` body to its truth value.
pub fn eval(state: &mut State, registry: &BuiltinRegistry, words: &[Word]) -> Result<bool, String> {
    let mut cursor = Cursor { words, pos: 0 };
    let result = parse_or(state, registry, &mut cursor)?;
    if cursor.pos != cursor.words.len() {
        return Err("`[[`: trailing tokens after expression".to_string());
    }
    Ok(result)
}

fn parse_or(state: &mut State, registry: &BuiltinRegistry, cur: &mut Cursor) -> Result<bool, String> {
    let mut acc = parse_and(state, registry, cur)?;
    while cur.eat_literal("||") {
        let rhs = parse_and(state, registry, cur)?;
        acc = acc || rhs;
    }
    Ok(acc)
}

fn parse_and(state: &mut State, registry: &BuiltinRegistry, cur: &mut Cursor) -> Result<bool, String> {
    let mut acc = parse_not(state, registry, cur)?;
    while cur.eat_literal("&&") {
        let rhs = parse_not(state, registry, cur)?;
        acc = acc && rhs;
    }
    Ok(acc)
}

fn parse_not(state: &mut State, registry: &BuiltinRegistry, cur: &mut Cursor) -> Result<bool, String> {
    if cur.eat_literal("!") {
        Ok(!parse_not(state, registry, cur)?)
    } else {
        parse_primary(state, registry, cur)
    }
}

fn parse_primary(state: &mut State, registry: &BuiltinRegistry, cur: &mut Cursor) -> Result<bool, String> {
    if cur.eat_literal("(") {
        let inner = parse_or(state, registry, cur)?;
        cur.expect_literal(")")?;
        return Ok(inner);
    }

    if let Some(lit) = cur.peek_literal() {
        if UNARY_FILE_OPS.contains(&lit.as_str())
            || UNARY_STRING_OPS.contains(&lit.as_str())
            || UNARY_VAR_OPS.contains(&lit.as_str())
        {
            cur.pos += 1;
            let operand_word = cur.advance_word()?;
            let operand = expand::expand_assignment_value(state, registry, operand_word)
                .map_err(|e| e.to_string())?;
            return Ok(eval_unary(state, &lit, &operand));
        }
    }

    let lhs_word = cur.advance_word()?;
    if let Some(op) = cur.peek_literal() {
        if BINARY_OPS.contains(&op.as_str()) {
            cur.pos += 1;
            let rhs_word = cur.advance_word()?;
            return eval_binary(state, registry, &op, lhs_word, rhs_word);
        }
    }
    let s = expand::expand_assignment_value(state, registry, lhs_word).map_err(|e| e.to_string())?;
    Ok(!s.is_empty())
}

fn eval_unary(state: &State, op: &str, operand: &str) -> bool {
    match op {
        "-e" => state.env.fs.exists(&state.env.cwd, operand),
        "-f" => state.env.fs.is_file(&state.env.cwd, operand),
        "-d" => state.env.fs.is_dir(&state.env.cwd, operand),
        "-L" | "-h" => state.env.fs.is_symlink(&state.env.cwd, operand),
        "-s" => state
            .env
            .fs
            .stat(&state.env.cwd, operand)
            .map(|s| s.size > 0)
            .unwrap_or(false),
        // No permission model in the virtual filesystem; existence is the
        // closest available approximation (recorded in DESIGN.md).
        "-r" | "-w" | "-x" => state.env.fs.exists(&state.env.cwd, operand),
        "-z" => operand.is_empty(),
        "-n" => !operand.is_empty(),
        "-v" => state.env.vars.get(operand).is_some(),
        _ => false,
    }
}

fn eval_binary(
    state: &mut State,
    registry: &BuiltinRegistry,
    op: &str,
    lhs_word: &Word,
    rhs_word: &Word,
) -> Result<bool, String> {
    match op {
        "=" | "==" | "!=" => {
            let lhs = expand::expand_assignment_value(state, registry, lhs_word).map_err(|e| e.to_string())?;
            let pattern = expand::expand_pattern(state, registry, rhs_word).map_err(|e| e.to_string())?;
            let matched = shsh_fnmatch::matches(&pattern, &lhs).map_err(|e| e.to_string())?;
            Ok(if op == "!=" { !matched } else { matched })
        }
        "<" | ">" => {
            let lhs = expand::expand_assignment_value(state, registry, lhs_word).map_err(|e| e.to_string())?;
            let rhs = expand::expand_assignment_value(state, registry, rhs_word).map_err(|e| e.to_string())?;
            Ok(if op == "<" { lhs < rhs } else { lhs > rhs })
        }
        "=~" => {
            let lhs = expand::expand_assignment_value(state, registry, lhs_word).map_err(|e| e.to_string())?;
            let rhs = expand::expand_assignment_value(state, registry, rhs_word).map_err(|e| e.to_string())?;
            let re = regex::Regex::new(&rhs).map_err(|e| e.to_string())?;
            Ok(re.is_match(&lhs))
        }
        "-eq" | "-ne" | "-lt" | "-le" | "-gt" | "-ge" => {
            let lhs = expand::expand_assignment_value(state, registry, lhs_word).map_err(|e| e.to_string())?;
            let rhs = expand::expand_assignment_value(state, registry, rhs_word).map_err(|e| e.to_string())?;
            let l = shsh_arith::coerce(Some(&lhs));
            let r = shsh_arith::coerce(Some(&rhs));
            Ok(match op {
                "-eq" => l == r,
                "-ne" => l != r,
                "-lt" => l < r,
                "-le" => l <= r,
                "-gt" => l > r,
                "-ge" => l >= r,
                _ => unreachable!(),
            })
        }
        "-nt" | "-ot" => {
            let lhs = expand::expand_assignment_value(state, registry, lhs_word).map_err(|e| e.to_string())?;
            let rhs = expand::expand_assignment_value(state, registry, rhs_word).map_err(|e| e.to_string())?;
            let lm = state.env.fs.stat(&state.env.cwd, &lhs).map(|s| s.mtime);
            let rm = state.env.fs.stat(&state.env.cwd, &rhs).map(|s| s.mtime);
            Ok(match (lm, rm, op) {
                (Ok(l), Ok(r), "-nt") => l > r,
                (Ok(l), Ok(r), "-ot") => l < r,
                (Ok(_), Err(_), "-nt") => true,
                (Err(_), Ok(_), "-ot") => true,
                _ => false,
            })
        }
        "-ef" => {
            let lhs = expand::expand_assignment_value(state, registry, lhs_word).map_err(|e| e.to_string())?;
            let rhs = expand::expand_assignment_value(state, registry, rhs_word).map_err(|e| e.to_string())?;
            let l = state.env.fs.resolve(&state.env.cwd, &lhs);
            let r = state.env.fs.resolve(&state.env.cwd, &rhs);
            Ok(matches!((l, r), (Ok(l), Ok(r)) if l == r))
        }
        _ => Err(format!("`[[`: unsupported operator `{op}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shsh_env::{Env, Options};
    use shsh_syntax::ast::Command;

    fn words_from_script(src: &str) -> Vec<Word> {
        let list = shsh_syntax::parse(src).unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Compound(fc) => match &fc.command {
                shsh_syntax::ast::CompoundCommand::Conditional(words) => words.clone(),
                _ => panic!("expected conditional"),
            },
            _ => panic!("expected compound command"),
        }
    }

    fn state() -> State {
        State::new(Env::new(Options::new()))
    }

    #[test]
    fn string_equality_glob() {
        let mut s = state();
        let registry = BuiltinRegistry::new();
        let words = words_from_script("[[ abc = a* ]]\n");
        assert!(eval(&mut s, &registry, &words).unwrap());
    }

    #[test]
    fn string_inequality() {
        let mut s = state();
        let registry = BuiltinRegistry::new();
        let words = words_from_script("[[ abc != abc ]]\n");
        assert!(!eval(&mut s, &registry, &words).unwrap());
    }

    #[test]
    fn integer_comparison() {
        let mut s = state();
        let registry = BuiltinRegistry::new();
        let words = words_from_script("[[ 5 -gt 3 ]]\n");
        assert!(eval(&mut s, &registry, &words).unwrap());
    }

    #[test]
    fn and_or_negation() {
        let mut s = state();
        let registry = BuiltinRegistry::new();
        let words = words_from_script("[[ -z \"\" && ! -z x ]]\n");
        assert!(eval(&mut s, &registry, &words).unwrap());
    }

    #[test]
    fn file_existence_test() {
        let options = Options::new().with_file("/home/user/a.txt", "1");
        let mut s = State::new(Env::new(options));
        let registry = BuiltinRegistry::new();
        let words = words_from_script("[[ -f /home/user/a.txt ]]\n");
        assert!(eval(&mut s, &registry, &words).unwrap());
    }

    #[test]
    fn regex_match() {
        let mut s = state();
        let registry = BuiltinRegistry::new();
        let words = words_from_script("[[ foo123 =~ [0-9]+ ]]\n");
        assert!(eval(&mut s, &registry, &words).unwrap());
    }

    #[test]
    fn dash_v_tests_whether_a_variable_is_set() {
        let mut s = state();
        s.env.vars.set_scalar("X", "anything").ok();
        let registry = BuiltinRegistry::new();
        assert!(eval(&mut s, &registry, &words_from_script("[[ -v X ]]\n")).unwrap());
        assert!(!eval(&mut s, &registry, &words_from_script("[[ -v Y ]]\n")).unwrap());
    }
}
