//! Builder-style construction surface for [`crate::Env`], following the
//! options-struct pattern the teacher uses for `System`/`Env` construction
//! instead of a long positional-argument constructor.

use std::collections::HashMap;
use std::rc::Rc;

use crate::opts::{ShellOpt, ShellOpts};
use crate::vfs::ContentAdapter;

/// The content of a seeded file: either fixed bytes or a lazily-evaluated
/// adapter (a "content adapter" in spec terms).
#[derive(Clone)]
pub enum SeedFile {
    Bytes(Vec<u8>),
    Adapter(ContentAdapter),
}

impl From<&str> for SeedFile {
    fn from(s: &str) -> Self {
        SeedFile::Bytes(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for SeedFile {
    fn from(b: Vec<u8>) -> Self {
        SeedFile::Bytes(b)
    }
}

/// A capability granting HTTP egress to an allow-listed set of hosts. No
/// actual HTTP client is wired in by this crate: the teacher's dependency
/// stack carries no HTTP client crate, and real network I/O would
/// contradict the sandbox's no-host-I/O contract. The capability exists so
/// a host embedding this crate can recognize when a script attempts
/// network access and decide how (if at all) to service it out of band;
/// builtins in `shsh-builtin` that would need it report a capability error
/// instead of making a request themselves.
#[derive(Clone, Debug, Default)]
pub struct HttpCapability {
    pub allowed_hosts: Vec<String>,
}

impl HttpCapability {
    pub fn allows(&self, host: &str) -> bool {
        self.allowed_hosts.iter().any(|h| h == host)
    }
}

pub struct Options {
    pub files: HashMap<String, SeedFile>,
    pub env: HashMap<String, String>,
    pub cwd: String,
    pub shell_opts: ShellOpts,
    pub http: Option<HttpCapability>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            files: HashMap::new(),
            env: HashMap::new(),
            cwd: "/home/user".to_string(),
            shell_opts: ShellOpts::empty(),
            http: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<SeedFile>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    pub fn with_opt(mut self, opt: ShellOpt) -> Self {
        self.shell_opts |= opt;
        self
    }

    pub fn with_http(mut self, http: HttpCapability) -> Self {
        self.http = Some(http);
        self
    }
}

pub(crate) fn adapter_from_seed(seed: &SeedFile) -> (Option<Vec<u8>>, Option<ContentAdapter>) {
    match seed {
        SeedFile::Bytes(b) => (Some(b.clone()), None),
        SeedFile::Adapter(a) => (None, Some(Rc::clone(a))),
    }
}
