//! Brace expansion (§4.4 step 1): purely syntactic, operating on the word's
//! unit list before any variable/command/arithmetic substitution runs.
//! `{a,b,c}` and numeric/single-letter `{m..n[..step]}` ranges are
//! recognized only among *unquoted* literal characters — a quoted brace or
//! comma never participates, matching the parser's existing rule that
//! `pre{a,b}post` stays untouched until this stage runs.

use shsh_syntax::ast::{TextUnit, Word, WordUnit};

fn is_lit(unit: &WordUnit, c: char) -> bool {
    matches!(unit, WordUnit::Unquoted(TextUnit::Literal(ch)) if *ch == c)
}

/// Renders a unit slice to plain text if (and only if) every unit is an
/// unquoted literal character; used to recognize the `{m..n}` range form,
/// which by construction can only ever be plain text.
fn literal_text(units: &[WordUnit]) -> Option<String> {
    let mut s = String::new();
    for u in units {
        match u {
            WordUnit::Unquoted(TextUnit::Literal(c)) => s.push(*c),
            _ => return None,
        }
    }
    Some(s)
}

fn literal_units(s: &str) -> Vec<WordUnit> {
    s.chars()
        .map(|c| WordUnit::Unquoted(TextUnit::Literal(c)))
        .collect()
}

enum RangeEndpoint {
    Int(i64),
    Char(char),
}

fn try_range(inner: &[WordUnit]) -> Option<Vec<Vec<WordUnit>>> {
    let text = literal_text(inner)?;
    let parts: Vec<&str> = text.split("..").collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }
    let step: i64 = if parts.len() == 3 {
        parts[2].parse().ok()?
    } else {
        1
    };
    if step == 0 {
        return None;
    }
    let (start, end) = (parse_endpoint(parts[0])?, parse_endpoint(parts[1])?);
    let values: Vec<String> = match (start, end) {
        (RangeEndpoint::Int(a), RangeEndpoint::Int(b)) => {
            let step = if a > b { -step.abs() } else { step.abs() };
            int_range(a, b, step).into_iter().map(|n| n.to_string()).collect()
        }
        (RangeEndpoint::Char(a), RangeEndpoint::Char(b)) => {
            let a = a as i64;
            let b = b as i64;
            let step = if a > b { -step.abs() } else { step.abs() };
            int_range(a, b, step)
                .into_iter()
                .filter_map(|n| char::from_u32(n as u32))
                .map(|c| c.to_string())
                .collect()
        }
        _ => return None,
    };
    Some(values.into_iter().map(|v| literal_units(&v)).collect())
}

fn parse_endpoint(s: &str) -> Option<RangeEndpoint> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(RangeEndpoint::Int(n));
    }
    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_none() && c.is_ascii_alphabetic() {
        return Some(RangeEndpoint::Char(c));
    }
    None
}

fn int_range(a: i64, b: i64, step: i64) -> Vec<i64> {
    let mut out = Vec::new();
    let mut cur = a;
    if step > 0 {
        while cur <= b {
            out.push(cur);
            cur += step;
        }
    } else {
        while cur >= b {
            out.push(cur);
            cur += step;
        }
    }
    out
}

fn split_top_level_commas(inner: &[WordUnit]) -> Vec<&[WordUnit]> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, u) in inner.iter().enumerate() {
        if is_lit(u, '{') {
            depth += 1;
        } else if is_lit(u, '}') {
            depth -= 1;
        } else if depth == 0 && is_lit(u, ',') {
            out.push(&inner[start..i]);
            start = i + 1;
        }
    }
    out.push(&inner[start..]);
    out
}

/// Expands brace groups in `units`, returning one unit-list per resulting
/// word (at least one, the original, if no brace group qualifies).
pub fn brace_expand(units: &[WordUnit]) -> Vec<Vec<WordUnit>> {
    for i in 0..units.len() {
        if !is_lit(&units[i], '{') {
            continue;
        }
        let mut depth = 1i32;
        let mut j = i + 1;
        let mut top_commas = false;
        while j < units.len() {
            if is_lit(&units[j], '{') {
                depth += 1;
            } else if is_lit(&units[j], '}') {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            } else if depth == 1 && is_lit(&units[j], ',') {
                top_commas = true;
            }
            j += 1;
        }
        if j >= units.len() {
            // Unbalanced: not a brace group, treat the rest literally.
            break;
        }
        let inner = &units[i + 1..j];
        let alternatives: Option<Vec<Vec<WordUnit>>> = if top_commas {
            Some(
                split_top_level_commas(inner)
                    .into_iter()
                    .map(|s| s.to_vec())
                    .collect(),
            )
        } else {
            try_range(inner)
        };
        if let Some(alts) = alternatives {
            let prefix = &units[..i];
            let suffix = &units[j + 1..];
            let mut results = Vec::new();
            for alt in alts {
                let mut combined = prefix.to_vec();
                combined.extend(alt);
                combined.extend(suffix.to_vec());
                results.extend(brace_expand(&combined));
            }
            return results;
        }
        // `{...}` with neither a comma nor a valid range: not a brace
        // expansion here, but a later `{` further along the word might
        // still qualify, so keep scanning instead of giving up entirely.
    }
    vec![units.to_vec()]
}

pub fn brace_expand_word(word: &Word) -> Vec<Word> {
    brace_expand(&word.units)
        .into_iter()
        .map(|units| Word {
            units,
            position: word.position,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shsh_syntax::parse;
    use shsh_syntax::ast::Command;

    fn word_from_script(src: &str) -> Word {
        let list = parse(src).unwrap();
        let pipeline = &list.0[0].and_or.first;
        match &pipeline.commands[0] {
            Command::Simple(cmd) => cmd.words[1].clone(),
            _ => panic!("expected simple command"),
        }
    }

    fn render(word: &Word) -> String {
        word.units
            .iter()
            .map(|u| match u {
                WordUnit::Unquoted(TextUnit::Literal(c)) => c.to_string(),
                _ => String::new(),
            })
            .collect()
    }

    #[test]
    fn comma_list_expands() {
        let word = word_from_script("echo pre{a,b,c}post\n");
        let expanded = brace_expand_word(&word);
        let rendered: Vec<String> = expanded.iter().map(render).collect();
        assert_eq!(rendered, vec!["preapost", "prebpost", "precpost"]);
    }

    #[test]
    fn numeric_range_expands() {
        let word = word_from_script("echo {1..5}\n");
        let expanded = brace_expand_word(&word);
        let rendered: Vec<String> = expanded.iter().map(render).collect();
        assert_eq!(rendered, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn numeric_range_with_step() {
        let word = word_from_script("echo {0..10..2}\n");
        let expanded = brace_expand_word(&word);
        let rendered: Vec<String> = expanded.iter().map(render).collect();
        assert_eq!(rendered, vec!["0", "2", "4", "6", "8", "10"]);
    }

    #[test]
    fn letter_range_expands() {
        let word = word_from_script("echo {a..e}\n");
        let expanded = brace_expand_word(&word);
        let rendered: Vec<String> = expanded.iter().map(render).collect();
        assert_eq!(rendered, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn no_comma_or_range_stays_literal() {
        let word = word_from_script("echo {foo}\n");
        let expanded = brace_expand_word(&word);
        assert_eq!(expanded.len(), 1);
        assert_eq!(render(&expanded[0]), "{foo}");
    }
}
