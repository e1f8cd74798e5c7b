//! In-memory filesystem: an arena of inodes addressed by opaque `slab` ids,
//! with directories holding child ids rather than child references. There
//! are no parent back-pointers (`..` is resolved by re-walking from the
//! root), so there is no ownership cycle to reason about and subshell
//! isolation is just `Fs::clone()` (the arena is plain data).

use std::fmt;
use std::rc::Rc;

use slab::Slab;

use crate::error::FsError;
use crate::path::{normalize, resolve_path, split_parent};

const SYMLINK_LOOP_LIMIT: usize = 40;

pub type InodeId = usize;

/// A thunk that produces a file's bytes lazily at read time. Memoization (if
/// any) is the caller's responsibility — the VFS re-invokes the thunk on
/// every read.
pub type ContentAdapter = Rc<dyn Fn() -> Vec<u8>>;

#[derive(Clone)]
pub enum FileBody {
    Bytes(Vec<u8>),
    Adapter(ContentAdapter),
}

impl fmt::Debug for FileBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileBody::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            FileBody::Adapter(_) => f.write_str("Adapter(..)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FileNode {
    pub body: FileBody,
    pub mtime: i64,
}

#[derive(Clone, Debug, Default)]
pub struct DirNode {
    /// Ordered so directory iteration (and thus `ls`-style output) is
    /// deterministic and matches insertion order, per §4.6.
    pub entries: Vec<(String, InodeId)>,
}

impl DirNode {
    fn get(&self, name: &str) -> Option<InodeId> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, id)| *id)
    }

    fn insert(&mut self, name: String, id: InodeId) {
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = id;
        } else {
            self.entries.push((name, id));
        }
    }

    fn remove(&mut self, name: &str) -> Option<InodeId> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }
}

#[derive(Clone, Debug)]
pub enum INode {
    File(FileNode),
    Directory(DirNode),
    Symlink { target: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
    Symlink,
}

#[derive(Clone, Debug)]
pub struct Stat {
    pub kind: NodeKind,
    pub size: usize,
    pub mtime: i64,
}

#[derive(Clone, Debug)]
pub struct Fs {
    arena: Slab<INode>,
    root: InodeId,
}

impl Fs {
    pub fn new() -> Self {
        let mut arena = Slab::new();
        let root = arena.insert(INode::Directory(DirNode::default()));
        Fs { arena, root }
    }

    fn node(&self, id: InodeId) -> &INode {
        &self.arena[id]
    }

    fn node_mut(&mut self, id: InodeId) -> &mut INode {
        &mut self.arena[id]
    }

    /// Resolves `path` to an inode id, following symlinks along the way
    /// (including a trailing symlink), bounded by [`SYMLINK_LOOP_LIMIT`].
    pub fn resolve(&self, cwd: &str, path: &str) -> Result<InodeId, FsError> {
        self.resolve_inner(cwd, path, true, 0)
    }

    /// Like [`Fs::resolve`] but does not follow a trailing symlink (the
    /// `lstat` / `unlink` / `rename`-source behavior).
    pub fn resolve_no_follow_last(&self, cwd: &str, path: &str) -> Result<InodeId, FsError> {
        self.resolve_inner(cwd, path, false, 0)
    }

    fn resolve_inner(
        &self,
        cwd: &str,
        path: &str,
        follow_last: bool,
        depth: usize,
    ) -> Result<InodeId, FsError> {
        if depth > SYMLINK_LOOP_LIMIT {
            return Err(FsError::LoopDetected(path.to_string()));
        }
        let absolute = resolve_path(cwd, path);
        let mut current = self.root;
        let segments: Vec<&str> = absolute.split('/').filter(|s| !s.is_empty()).collect();
        for (i, segment) in segments.iter().enumerate() {
            let is_last = i == segments.len() - 1;
            match self.node(current) {
                INode::Directory(dir) => {
                    current = dir
                        .get(segment)
                        .ok_or_else(|| FsError::NotFound(absolute.clone()))?;
                }
                _ => return Err(FsError::NotADirectory(absolute.clone())),
            }
            if let INode::Symlink { target } = self.node(current) {
                if is_last && !follow_last {
                    continue;
                }
                let target = target.clone();
                let parent_path = if i == 0 {
                    "/".to_string()
                } else {
                    format!("/{}", segments[..i].join("/"))
                };
                current = self.resolve_inner(&parent_path, &target, true, depth + 1)?;
            }
        }
        Ok(current)
    }

    fn resolve_parent_dir(&self, cwd: &str, path: &str) -> Result<(InodeId, String, String), FsError> {
        let absolute = normalize(&resolve_path(cwd, path));
        let (parent, name) = split_parent(&absolute)
            .ok_or_else(|| FsError::InvalidPath("cannot modify the root directory".into()))?;
        let parent_id = self.resolve(cwd, &parent)?;
        match self.node(parent_id) {
            INode::Directory(_) => Ok((parent_id, parent, name)),
            _ => Err(FsError::NotADirectory(parent)),
        }
    }

    pub fn stat(&self, cwd: &str, path: &str) -> Result<Stat, FsError> {
        let id = self.resolve(cwd, path)?;
        Ok(self.stat_id(id))
    }

    pub fn lstat(&self, cwd: &str, path: &str) -> Result<Stat, FsError> {
        let id = self.resolve_no_follow_last(cwd, path)?;
        Ok(self.stat_id(id))
    }

    fn stat_id(&self, id: InodeId) -> Stat {
        match self.node(id) {
            INode::File(f) => Stat {
                kind: NodeKind::File,
                size: self.file_len(f),
                mtime: f.mtime,
            },
            INode::Directory(d) => Stat {
                kind: NodeKind::Directory,
                size: d.entries.len(),
                mtime: 0,
            },
            INode::Symlink { target } => Stat {
                kind: NodeKind::Symlink,
                size: target.len(),
                mtime: 0,
            },
        }
    }

    fn file_len(&self, f: &FileNode) -> usize {
        match &f.body {
            FileBody::Bytes(b) => b.len(),
            FileBody::Adapter(a) => a().len(),
        }
    }

    pub fn read_file(&self, cwd: &str, path: &str) -> Result<Vec<u8>, FsError> {
        let id = self.resolve(cwd, path)?;
        match self.node(id) {
            INode::File(f) => Ok(match &f.body {
                FileBody::Bytes(b) => b.clone(),
                FileBody::Adapter(a) => a(),
            }),
            INode::Directory(_) => Err(FsError::IsADirectory(path.to_string())),
            INode::Symlink { .. } => unreachable!("resolve() always follows symlinks"),
        }
    }

    pub fn write_file(
        &mut self,
        cwd: &str,
        path: &str,
        bytes: Vec<u8>,
        append: bool,
        mtime: i64,
    ) -> Result<(), FsError> {
        tracing::debug!(path, len = bytes.len(), append, "vfs write_file");
        match self.resolve(cwd, path) {
            Ok(id) => match self.node_mut(id) {
                INode::File(f) => {
                    let mut existing = match &f.body {
                        FileBody::Bytes(b) if append => b.clone(),
                        _ => Vec::new(),
                    };
                    existing.extend(bytes);
                    f.body = FileBody::Bytes(existing);
                    f.mtime = mtime;
                    Ok(())
                }
                INode::Directory(_) => Err(FsError::IsADirectory(path.to_string())),
                INode::Symlink { .. } => unreachable!(),
            },
            Err(FsError::NotFound(_)) => {
                let (parent_id, _, name) = self.resolve_parent_dir(cwd, path)?;
                let id = self.arena.insert(INode::File(FileNode {
                    body: FileBody::Bytes(bytes),
                    mtime,
                }));
                if let INode::Directory(dir) = self.node_mut(parent_id) {
                    dir.insert(name, id);
                }
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Installs a content-adapter file at `path`, overwriting anything
    /// already there. Used by `Options` to seed dynamic/test-only files.
    pub fn install_adapter(&mut self, path: &str, adapter: ContentAdapter) -> Result<(), FsError> {
        let (parent_id, _, name) = self.resolve_parent_dir("/", path)?;
        let id = self.arena.insert(INode::File(FileNode {
            body: FileBody::Adapter(adapter),
            mtime: 0,
        }));
        if let INode::Directory(dir) = self.node_mut(parent_id) {
            dir.insert(name, id);
        }
        Ok(())
    }

    pub fn mkdir(&mut self, cwd: &str, path: &str) -> Result<(), FsError> {
        tracing::debug!(path, "vfs mkdir");
        let (parent_id, _, name) = self.resolve_parent_dir(cwd, path)?;
        if let INode::Directory(dir) = self.node(parent_id) {
            if dir.get(&name).is_some() {
                return Err(FsError::AlreadyExists(path.to_string()));
            }
        }
        let id = self.arena.insert(INode::Directory(DirNode::default()));
        if let INode::Directory(dir) = self.node_mut(parent_id) {
            dir.insert(name, id);
        }
        Ok(())
    }

    pub fn symlink(&mut self, cwd: &str, target: &str, link_path: &str) -> Result<(), FsError> {
        let (parent_id, _, name) = self.resolve_parent_dir(cwd, link_path)?;
        if let INode::Directory(dir) = self.node(parent_id) {
            if dir.get(&name).is_some() {
                return Err(FsError::AlreadyExists(link_path.to_string()));
            }
        }
        let id = self.arena.insert(INode::Symlink { target: target.to_string() });
        if let INode::Directory(dir) = self.node_mut(parent_id) {
            dir.insert(name, id);
        }
        Ok(())
    }

    pub fn readlink(&self, cwd: &str, path: &str) -> Result<String, FsError> {
        let id = self.resolve_no_follow_last(cwd, path)?;
        match self.node(id) {
            INode::Symlink { target } => Ok(target.clone()),
            _ => Err(FsError::InvalidPath(format!("{path}: not a symlink"))),
        }
    }

    pub fn read_dir(&self, cwd: &str, path: &str) -> Result<Vec<String>, FsError> {
        let id = self.resolve(cwd, path)?;
        match self.node(id) {
            INode::Directory(d) => Ok(d.entries.iter().map(|(n, _)| n.clone()).collect()),
            _ => Err(FsError::NotADirectory(path.to_string())),
        }
    }

    pub fn unlink(&mut self, cwd: &str, path: &str) -> Result<(), FsError> {
        tracing::debug!(path, "vfs unlink");
        let (parent_id, _, name) = self.resolve_parent_dir(cwd, path)?;
        let target_id = match self.node(parent_id) {
            INode::Directory(dir) => dir.get(&name).ok_or_else(|| FsError::NotFound(path.to_string()))?,
            _ => return Err(FsError::NotADirectory(path.to_string())),
        };
        if matches!(self.node(target_id), INode::Directory(_)) {
            return Err(FsError::IsADirectory(path.to_string()));
        }
        if let INode::Directory(dir) = self.node_mut(parent_id) {
            dir.remove(&name);
        }
        self.arena.remove(target_id);
        Ok(())
    }

    pub fn rmdir(&mut self, cwd: &str, path: &str, recursive: bool) -> Result<(), FsError> {
        let (parent_id, _, name) = self.resolve_parent_dir(cwd, path)?;
        let target_id = match self.node(parent_id) {
            INode::Directory(dir) => dir.get(&name).ok_or_else(|| FsError::NotFound(path.to_string()))?,
            _ => return Err(FsError::NotADirectory(path.to_string())),
        };
        match self.node(target_id) {
            INode::Directory(d) if !d.entries.is_empty() && !recursive => {
                return Err(FsError::NotEmpty(path.to_string()));
            }
            INode::Directory(_) => {}
            _ => return Err(FsError::NotADirectory(path.to_string())),
        }
        if recursive {
            self.remove_recursive(target_id);
        } else {
            self.arena.remove(target_id);
        }
        if let INode::Directory(dir) = self.node_mut(parent_id) {
            dir.remove(&name);
        }
        Ok(())
    }

    fn remove_recursive(&mut self, id: InodeId) {
        if let INode::Directory(d) = self.node(id).clone() {
            for (_, child) in d.entries {
                self.remove_recursive(child);
            }
        }
        self.arena.remove(id);
    }

    pub fn rename(&mut self, cwd: &str, from: &str, to: &str) -> Result<(), FsError> {
        tracing::debug!(from, to, "vfs rename");
        let (from_parent, _, from_name) = self.resolve_parent_dir(cwd, from)?;
        let id = match self.node(from_parent) {
            INode::Directory(dir) => dir.get(&from_name).ok_or_else(|| FsError::NotFound(from.to_string()))?,
            _ => return Err(FsError::NotADirectory(from.to_string())),
        };
        let (to_parent, _, to_name) = self.resolve_parent_dir(cwd, to)?;
        if let INode::Directory(dir) = self.node(to_parent) {
            if dir.get(&to_name).is_some() {
                return Err(FsError::AlreadyExists(to.to_string()));
            }
        }
        if let INode::Directory(dir) = self.node_mut(from_parent) {
            dir.remove(&from_name);
        }
        if let INode::Directory(dir) = self.node_mut(to_parent) {
            dir.insert(to_name, id);
        }
        Ok(())
    }

    pub fn exists(&self, cwd: &str, path: &str) -> bool {
        self.resolve(cwd, path).is_ok()
    }

    pub fn is_dir(&self, cwd: &str, path: &str) -> bool {
        matches!(self.stat(cwd, path), Ok(Stat { kind: NodeKind::Directory, .. }))
    }

    pub fn is_file(&self, cwd: &str, path: &str) -> bool {
        matches!(self.stat(cwd, path), Ok(Stat { kind: NodeKind::File, .. }))
    }

    pub fn is_symlink(&self, cwd: &str, path: &str) -> bool {
        matches!(self.lstat(cwd, path), Ok(Stat { kind: NodeKind::Symlink, .. }))
    }

    /// Ensures every directory component of `path` exists, creating missing
    /// ones (like `mkdir -p`), used by `Options` to seed initial files.
    pub fn ensure_dir_all(&mut self, path: &str) -> Result<(), FsError> {
        let mut built = String::new();
        for segment in path.trim_matches('/').split('/') {
            if segment.is_empty() {
                continue;
            }
            built.push('/');
            built.push_str(segment);
            if !self.exists("/", &built) {
                self.mkdir("/", &built)?;
            }
        }
        Ok(())
    }
}

impl Default for Fs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_roundtrip() {
        let mut fs = Fs::new();
        fs.ensure_dir_all("/home/user").unwrap();
        fs.write_file("/", "/home/user/a.txt", b"hello".to_vec(), false, 0)
            .unwrap();
        assert_eq!(fs.read_file("/", "/home/user/a.txt").unwrap(), b"hello");
    }

    #[test]
    fn append_accumulates() {
        let mut fs = Fs::new();
        fs.write_file("/", "/a", b"a".to_vec(), false, 0).unwrap();
        fs.write_file("/", "/a", b"b".to_vec(), true, 0).unwrap();
        assert_eq!(fs.read_file("/", "/a").unwrap(), b"ab");
    }

    #[test]
    fn write_to_directory_is_eisdir() {
        let mut fs = Fs::new();
        fs.mkdir("/", "/d").unwrap();
        assert_eq!(
            fs.write_file("/", "/d", b"x".to_vec(), false, 0),
            Err(FsError::IsADirectory("/d".to_string()))
        );
    }

    #[test]
    fn write_missing_parent_is_enoent() {
        let mut fs = Fs::new();
        assert!(matches!(
            fs.write_file("/", "/missing/a", b"x".to_vec(), false, 0),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn symlink_resolution_follows_target() {
        let mut fs = Fs::new();
        fs.write_file("/", "/real", b"data".to_vec(), false, 0).unwrap();
        fs.symlink("/", "/real", "/link").unwrap();
        assert_eq!(fs.read_file("/", "/link").unwrap(), b"data");
        assert_eq!(fs.lstat("/", "/link").unwrap().kind, NodeKind::Symlink);
        assert_eq!(fs.stat("/", "/link").unwrap().kind, NodeKind::File);
    }

    #[test]
    fn symlink_cycle_is_bounded() {
        let mut fs = Fs::new();
        fs.symlink("/", "/b", "/a").unwrap();
        fs.symlink("/", "/a", "/b").unwrap();
        assert_eq!(fs.resolve("/", "/a"), Err(FsError::LoopDetected("/a".to_string())));
    }

    #[test]
    fn rmdir_requires_recursive_for_nonempty() {
        let mut fs = Fs::new();
        fs.mkdir("/", "/d").unwrap();
        fs.write_file("/", "/d/f", b"x".to_vec(), false, 0).unwrap();
        assert_eq!(fs.rmdir("/", "/d", false), Err(FsError::NotEmpty("/d".to_string())));
        fs.rmdir("/", "/d", true).unwrap();
        assert!(!fs.exists("/", "/d"));
    }

    #[test]
    fn directory_iteration_preserves_insertion_order() {
        let mut fs = Fs::new();
        fs.mkdir("/", "/d").unwrap();
        for name in ["z", "a", "m"] {
            fs.write_file("/", &format!("/d/{name}"), vec![], false, 0).unwrap();
        }
        assert_eq!(fs.read_dir("/", "/d").unwrap(), vec!["z", "a", "m"]);
    }

    #[test]
    fn content_adapter_produces_bytes_at_read_time() {
        let mut fs = Fs::new();
        fs.install_adapter("/dyn", Rc::new(|| b"computed".to_vec())).unwrap();
        assert_eq!(fs.read_file("/", "/dyn").unwrap(), b"computed");
    }

    #[test]
    fn rename_moves_entry() {
        let mut fs = Fs::new();
        fs.write_file("/", "/a", b"x".to_vec(), false, 0).unwrap();
        fs.rename("/", "/a", "/b").unwrap();
        assert!(!fs.exists("/", "/a"));
        assert_eq!(fs.read_file("/", "/b").unwrap(), b"x");
    }
}
