use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit code reported when the child's own code is unavailable.
pub const FALLBACK_EXIT_CODE: i32 = 1;

/// Errors returned by process execution.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with code {code}{}", stderr_suffix(.stderr))]
    NonZeroExit {
        command: String,
        code: i32,
        /// Captured stderr, when the run captured it
        stderr: Option<String>,
    },

    #[error("could not determine exit code of `{command}`")]
    UnknownExit {
        command: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("failed to update search path with {}: {source}", .dir.display())]
    SearchPath {
        dir: PathBuf,
        #[source]
        source: std::env::JoinPathsError,
    },
}

impl ExecError {
    /// The child's exit code, or [`FALLBACK_EXIT_CODE`] when there is none.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NonZeroExit { code, .. } => *code,
            _ => FALLBACK_EXIT_CODE,
        }
    }

    /// Captured stderr of a failed run, if any was captured.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::NonZeroExit {
                stderr: Some(s), ..
            } => Some(s.as_str()),
            _ => None,
        }
    }
}

fn stderr_suffix(stderr: &Option<String>) -> String {
    match stderr.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => format!(": {}", s),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_of_non_zero_exit() {
        let err = ExecError::NonZeroExit {
            command: "false".to_string(),
            code: 17,
            stderr: None,
        };
        assert_eq!(err.exit_code(), 17);
        assert_eq!(err.to_string(), "`false` exited with code 17");
    }

    #[test]
    fn test_exit_code_fallback() {
        let err = ExecError::UnknownExit {
            command: "sleep 100".to_string(),
            source: None,
        };
        assert_eq!(err.exit_code(), FALLBACK_EXIT_CODE);

        let err = ExecError::Spawn {
            command: "nope".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_stderr_is_part_of_message() {
        let err = ExecError::NonZeroExit {
            command: "pip install x".to_string(),
            code: 2,
            stderr: Some("  ERROR: no matching distribution\n".to_string()),
        };
        assert_eq!(err.stderr(), Some("  ERROR: no matching distribution\n"));
        assert_eq!(
            err.to_string(),
            "`pip install x` exited with code 2: ERROR: no matching distribution"
        );
    }
}
