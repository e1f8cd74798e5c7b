//! Glob-style pattern matching shared by pathname expansion, `case`, the
//! parameter-expansion trim/replace modifiers, and the `[[ = ]]` conditional
//! operator.
//!
//! Patterns support `*` (any run, including empty), `?` (exactly one
//! character), and bracket expressions `[...]`/`[!...]`/`[^...]` with ranges
//! (`a-z`) and a literal `]` as the first character of the set. There is no
//! POSIX character-class (`[:alpha:]`) support; none of the callers in this
//! crate's consumers need it.

use std::fmt;

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("unterminated bracket expression in pattern `{pattern}`")]
    UnterminatedBracket { pattern: String },
}

/// Compiles `pattern` into a [`regex::Regex`] matching the same strings a
/// shell glob would, anchored to match the whole input.
///
/// `pattern` is translated to an equivalent regex rather than matched by a
/// hand-rolled automaton, mirroring how the teacher crate builds pathname
/// patterns out of `regex`/`regex-syntax` building blocks instead of writing
/// a bespoke glob matcher.
pub fn translate(pattern: &str, anchored: Anchor) -> Result<String, PatternError> {
    let mut out = String::from("(?s)");
    if matches!(anchored, Anchor::Both | Anchor::Start) {
        out.push('^');
    }
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push_str(".*");
                i += 1;
            }
            '?' => {
                out.push('.');
                i += 1;
            }
            '[' => {
                let (frag, next) = translate_bracket(&chars, i, pattern)?;
                out.push_str(&frag);
                i = next;
            }
            '\\' if i + 1 < chars.len() => {
                out.push_str(&regex::escape(&chars[i + 1].to_string()));
                i += 2;
            }
            c => {
                out.push_str(&regex::escape(&c.to_string()));
                i += 1;
            }
        }
    }
    if matches!(anchored, Anchor::Both | Anchor::End) {
        out.push('$');
    }
    Ok(out)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Used for `case` patterns and `[[ = ]]`: the whole subject must match.
    Both,
    /// Used for `#`/`##` prefix-strip: match must begin at the string start,
    /// but may end anywhere; the caller picks the matched length.
    Start,
    /// Used for `%`/`%%` suffix-strip.
    End,
}

fn translate_bracket(
    chars: &[char],
    start: usize,
    pattern: &str,
) -> Result<(String, usize), PatternError> {
    let mut i = start + 1;
    let mut negate = false;
    if matches!(chars.get(i), Some('!') | Some('^')) {
        negate = true;
        i += 1;
    }
    let set_start = i;
    // A literal `]` right after `[` or `[!`/`[^` is part of the set, not the
    // closing bracket.
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while i < chars.len() && chars[i] != ']' {
        i += 1;
    }
    if i >= chars.len() {
        return Err(PatternError::UnterminatedBracket {
            pattern: pattern.to_string(),
        });
    }
    let set: String = chars[set_start..i].iter().collect();
    let mut frag = String::from("[");
    if negate {
        frag.push('^');
    }
    for c in set.chars() {
        if matches!(c, '\\' | '^' | ']') {
            frag.push('\\');
        }
        frag.push(c);
    }
    frag.push(']');
    Ok((frag, i + 1))
}

/// A compiled glob pattern.
pub struct Pattern {
    regex: regex::Regex,
    source: String,
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern").field("source", &self.source).finish()
    }
}

impl Pattern {
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let re = translate(pattern, Anchor::Both)?;
        Ok(Pattern {
            regex: regex::Regex::new(&re).expect("translated glob regex must be valid"),
            source: pattern.to_string(),
        })
    }

    pub fn matches(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Convenience one-shot match, for callers (like `case`) that compile a
/// pattern once per use.
pub fn matches(pattern: &str, subject: &str) -> Result<bool, PatternError> {
    Ok(Pattern::compile(pattern)?.matches(subject))
}

/// Finds the shortest (or longest) prefix of `subject` matched by `pattern`,
/// returning the byte length of the match, for `${var#pattern}`/`${var##pattern}`.
pub fn match_prefix_len(
    pattern: &str,
    subject: &str,
    longest: bool,
) -> Result<Option<usize>, PatternError> {
    let re_src = translate(pattern, Anchor::Start);
    let re_src = match re_src {
        Ok(s) => s,
        Err(e) => return Err(e),
    };
    let re = regex::Regex::new(&re_src).expect("translated glob regex must be valid");
    let mut best: Option<usize> = None;
    for m in re.find_iter(subject) {
        if m.start() != 0 {
            continue;
        }
        let len = m.end();
        best = Some(match best {
            Some(cur) if longest => cur.max(len),
            Some(cur) if !longest => cur.min(len),
            _ => len,
        });
        if !longest {
            break;
        }
    }
    Ok(best)
}

/// Finds the shortest (or longest) suffix of `subject` matched by `pattern`,
/// returning the byte offset the match starts at, for `%`/`%%`.
pub fn match_suffix_start(
    pattern: &str,
    subject: &str,
    longest: bool,
) -> Result<Option<usize>, PatternError> {
    let re_src = translate(pattern, Anchor::End)?;
    let re = regex::Regex::new(&re_src).expect("translated glob regex must be valid");
    let mut best: Option<usize> = None;
    for m in re.find_iter(subject) {
        if m.end() != subject.len() {
            continue;
        }
        let start = m.start();
        best = Some(match best {
            Some(cur) if longest => cur.min(start),
            Some(cur) if !longest => cur.max(start),
            _ => start,
        });
    }
    Ok(best)
}

/// Returns the byte range of the first (for `/`) match of `pattern` anywhere
/// in `subject`, used by `${var/pattern/repl}`.
pub fn find_first(pattern: &str, subject: &str) -> Result<Option<(usize, usize)>, PatternError> {
    let re_src = format!("(?s){}", translate_unanchored(pattern)?);
    let re = regex::Regex::new(&re_src).expect("translated glob regex must be valid");
    Ok(re.find(subject).map(|m| (m.start(), m.end())))
}

fn translate_unanchored(pattern: &str) -> Result<String, PatternError> {
    // Strip the `(?s)^...$` wrapper `translate` adds for `Anchor::Both`; we
    // want the bare body for a `find`-anywhere search.
    let anchored = translate(pattern, Anchor::Both)?;
    Ok(anchored
        .trim_start_matches("(?s)")
        .trim_start_matches('^')
        .trim_end_matches('$')
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_any_run() {
        assert!(matches("a*c", "abbbc").unwrap());
        assert!(matches("a*c", "ac").unwrap());
        assert!(!matches("a*c", "abd").unwrap());
    }

    #[test]
    fn question_matches_one_char() {
        assert!(matches("a?c", "abc").unwrap());
        assert!(!matches("a?c", "ac").unwrap());
    }

    #[test]
    fn bracket_set_and_negation() {
        assert!(matches("[abc]", "b").unwrap());
        assert!(!matches("[!abc]", "b").unwrap());
        assert!(matches("[!abc]", "d").unwrap());
        assert!(matches("[a-z]", "m").unwrap());
    }

    #[test]
    fn literal_bracket_first_char() {
        assert!(matches("[]a]", "]").unwrap());
    }

    #[test]
    fn prefix_strip_shortest_vs_longest() {
        let shortest = match_prefix_len("*/", "a/b/c", false).unwrap();
        let longest = match_prefix_len("*/", "a/b/c", true).unwrap();
        assert_eq!(shortest, Some(2));
        assert_eq!(longest, Some(4));
    }

    #[test]
    fn suffix_strip_shortest_vs_longest() {
        let shortest = match_suffix_start("/*", "a/b/c", false).unwrap();
        let longest = match_suffix_start("/*", "a/b/c", true).unwrap();
        assert_eq!(shortest, Some(3));
        assert_eq!(longest, Some(1));
    }

    #[test]
    fn find_first_anywhere() {
        let (s, e) = find_first("b*d", "xxbyyydxx").unwrap().unwrap();
        assert_eq!(&"xxbyyydxx"[s..e], "byyyd");
    }

    #[test]
    fn unterminated_bracket_errors() {
        assert!(matches("[abc", "a").is_err());
    }
}
