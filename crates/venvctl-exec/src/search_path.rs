//! The mutable search path (`PATH`) handed to every spawned process.
//!
//! Prepend-only: entries are never removed and repeated prepends keep growing the
//! value. Every read and mutation goes through one mutex; clones share the value.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use venvctl_core::config::{env_keys, set_env_var};

use crate::error::ExecError;

#[derive(Debug, Clone)]
pub struct SearchPath {
    value: Arc<Mutex<OsString>>,
    /// Mirror every prepend into the process environment
    export: bool,
}

impl SearchPath {
    /// The process-wide search path, seeded from `PATH` on first use.
    /// Prepends are exported back into the process environment.
    pub fn process() -> Self {
        static PROCESS: OnceLock<SearchPath> = OnceLock::new();
        PROCESS
            .get_or_init(|| Self {
                value: Arc::new(Mutex::new(env::var_os(env_keys::PATH).unwrap_or_default())),
                export: true,
            })
            .clone()
    }

    /// A private search path that never touches the process environment.
    pub fn isolated(initial: impl Into<OsString>) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial.into())),
            export: false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, OsString> {
        self.value.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn current(&self) -> OsString {
        self.lock().clone()
    }

    pub fn entries(&self) -> Vec<PathBuf> {
        let value = self.lock();
        if value.is_empty() {
            return Vec::new();
        }
        env::split_paths(&*value).collect()
    }

    /// Prepend `dir`, keeping every existing entry after it.
    /// Fails without changing anything when the joined value cannot be built
    /// (e.g. `dir` contains the platform separator).
    pub fn prepend(&self, dir: &Path) -> Result<OsString, ExecError> {
        let mut value = self.lock();
        let mut parts = vec![dir.to_path_buf()];
        if !value.is_empty() {
            parts.extend(env::split_paths(&*value));
        }
        let joined = env::join_paths(parts).map_err(|source| ExecError::SearchPath {
            dir: dir.to_path_buf(),
            source,
        })?;
        if self.export {
            set_env_var(env_keys::PATH, &joined);
        }
        *value = joined.clone();
        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepend_is_cumulative_most_recent_first() {
        let original = env::join_paths(["/usr/bin", "/bin"]).unwrap();
        let sp = SearchPath::isolated(original);
        sp.prepend(Path::new("/a/bin")).unwrap();
        sp.prepend(Path::new("/b/bin")).unwrap();
        sp.prepend(Path::new("/c/bin")).unwrap();
        assert_eq!(
            sp.entries(),
            ["/c/bin", "/b/bin", "/a/bin", "/usr/bin", "/bin"]
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_repeated_prepend_keeps_growing() {
        let sp = SearchPath::isolated("/usr/bin");
        sp.prepend(Path::new("/venv/bin")).unwrap();
        sp.prepend(Path::new("/venv/bin")).unwrap();
        assert_eq!(sp.entries().len(), 3);
    }

    #[test]
    fn test_prepend_on_empty_has_no_trailing_entry() {
        let sp = SearchPath::isolated("");
        sp.prepend(Path::new("/venv/bin")).unwrap();
        assert_eq!(sp.entries(), vec![PathBuf::from("/venv/bin")]);
    }

    #[test]
    fn test_clones_share_value() {
        let sp = SearchPath::isolated("/usr/bin");
        let other = sp.clone();
        other.prepend(Path::new("/x")).unwrap();
        assert_eq!(sp.current(), other.current());
    }

    #[cfg(unix)]
    #[test]
    fn test_prepend_rejects_separator_and_leaves_value() {
        let sp = SearchPath::isolated("/usr/bin");
        let err = sp.prepend(Path::new("/bad:dir")).unwrap_err();
        assert!(matches!(err, ExecError::SearchPath { .. }));
        assert_eq!(sp.current(), OsString::from("/usr/bin"));
    }
}
