//! Pure path-string normalization, independent of the VFS arena: `resolve_path`
//! never touches inodes, so it cannot fail on a missing entry — symlink
//! traversal is a VFS concern handled in `vfs::Fs::resolve`.

/// Joins `input` against `cwd` if `input` is relative, then normalizes `.`
/// and `..` segments and collapses repeated `/`, returning a canonical
/// absolute path string. This does not consult the filesystem, so `..`
/// above an existing directory is resolved lexically (matching how the
/// shell's `cd`/`pwd` track a logical path rather than a device-relative
/// one).
pub fn resolve_path(cwd: &str, input: &str) -> String {
    let absolute = if input.starts_with('/') {
        input.to_string()
    } else {
        format!("{}/{}", cwd.trim_end_matches('/'), input)
    };
    normalize(&absolute)
}

/// Normalizes an already-absolute path string.
pub fn normalize(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                stack.pop();
            }
            s => stack.push(s),
        }
    }
    if stack.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", stack.join("/"))
    }
}

/// Splits an absolute, normalized path into its parent directory and final
/// component name. Returns `None` for the root (which has no parent).
pub fn split_parent(path: &str) -> Option<(String, String)> {
    if path == "/" {
        return None;
    }
    let trimmed = path.trim_end_matches('/');
    let idx = trimmed.rfind('/')?;
    let parent = if idx == 0 { "/" } else { &trimmed[..idx] };
    let name = &trimmed[idx + 1..];
    Some((parent.to_string(), name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dot_and_dotdot() {
        assert_eq!(normalize("/a/./b/../c"), "/a/c");
        assert_eq!(normalize("/a//b///c"), "/a/b/c");
        assert_eq!(normalize("/../a"), "/a");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn resolves_relative_to_cwd() {
        assert_eq!(resolve_path("/home/user", "foo"), "/home/user/foo");
        assert_eq!(resolve_path("/home/user", "../x"), "/home/x");
        assert_eq!(resolve_path("/home/user", "/abs/path"), "/abs/path");
    }

    #[test]
    fn splits_parent_and_name() {
        assert_eq!(split_parent("/a/b"), Some(("/a".into(), "b".into())));
        assert_eq!(split_parent("/a"), Some(("/".into(), "a".into())));
        assert_eq!(split_parent("/"), None);
    }
}
