//! Shell executor: run a full command line through the platform shell.
//!
//! Child stdout/stderr are inherited so progress output stays visible. The child's
//! termination is normalized into `Ok(())` or an [`ExecError`] carrying the exit code.

use std::process::{Command, ExitStatus};
use std::time::Instant;

use venvctl_core::config::env_keys;
use venvctl_core::observability;

use crate::error::ExecError;
use crate::search_path::SearchPath;

/// `sh -c <line>` (or `cmd /C <line>` on Windows), not yet spawned.
pub fn shell_command(line: &str) -> Command {
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").raw_arg(line);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(line);
        cmd
    }
}

/// Run `line` with the given search path as the child's `PATH`.
///
/// - start failure: `Spawn` (exit code 1)
/// - non-zero exit: `NonZeroExit` with the child's exact code
/// - no exit code (killed by a signal) or failed wait: `UnknownExit` (exit code 1)
pub fn run_shell(line: &str, search_path: &SearchPath) -> Result<(), ExecError> {
    tracing::info!(content = %line, "exec shell string");
    observability::audit_execution_started(line, "shell");
    let started = Instant::now();

    let mut cmd = shell_command(line);
    cmd.env(env_keys::PATH, search_path.current());

    let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
        command: line.to_string(),
        source,
    })?;

    let result = match child.wait() {
        Ok(status) => check_status(line, status, None),
        Err(source) => Err(ExecError::UnknownExit {
            command: line.to_string(),
            source: Some(source),
        }),
    };

    let exit_code = match &result {
        Ok(()) => 0,
        Err(e) => e.exit_code(),
    };
    observability::audit_execution_completed(line, exit_code, started.elapsed().as_millis() as u64);

    if let Err(ref e) = result {
        tracing::error!(exit_code, error = %e, "exec command failed");
    }
    result
}

/// Translate a finished child's status. `stderr` is attached to non-zero exits.
pub(crate) fn check_status(
    command: &str,
    status: ExitStatus,
    stderr: Option<String>,
) -> Result<(), ExecError> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(ExecError::NonZeroExit {
            command: command.to_string(),
            code,
            stderr,
        }),
        None => Err(ExecError::UnknownExit {
            command: command.to_string(),
            source: None,
        }),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn exit_code(result: &Result<(), ExecError>) -> i32 {
        result.as_ref().err().map_or(0, ExecError::exit_code)
    }

    fn search_path() -> SearchPath {
        SearchPath::isolated(std::env::var_os("PATH").unwrap_or_default())
    }

    #[test]
    fn test_exit_zero_is_ok() {
        let result = run_shell("exit 0", &search_path());
        assert!(result.is_ok());
        assert_eq!(exit_code(&result), 0);
    }

    #[test]
    fn test_exit_code_fidelity() {
        let result = run_shell("exit 17", &search_path());
        assert_eq!(exit_code(&result), 17);
        match result {
            Err(ExecError::NonZeroExit { code, .. }) => assert_eq!(code, 17),
            other => panic!("expected NonZeroExit, got {:?}", other),
        }
    }

    #[test]
    fn test_killed_by_signal_is_unknown_exit() {
        let result = run_shell("kill -9 $$", &search_path());
        assert!(matches!(result, Err(ExecError::UnknownExit { .. })));
        assert_eq!(exit_code(&result), 1);
    }

    #[test]
    fn test_child_sees_search_path() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("path.txt");
        let sp = SearchPath::isolated("/usr/bin:/bin");
        sp.prepend(std::path::Path::new("/opt/tools/bin")).unwrap();
        run_shell(&format!("echo \"$PATH\" > '{}'", out.display()), &sp).unwrap();
        let seen = std::fs::read_to_string(out).unwrap();
        assert_eq!(seen.trim(), "/opt/tools/bin:/usr/bin:/bin");
    }
}
