//! Directed command runner.
//!
//! Runs a program through the shell executor after prepending the program's own
//! directory to the search path, so the program and anything it spawns can find
//! its siblings (e.g. `pip` next to a venv's `python3`).

use std::path::Path;
use std::process::Stdio;
use std::time::Instant;

use venvctl_core::config::env_keys;
use venvctl_core::observability;

use crate::command::Invocation;
use crate::error::ExecError;
use crate::search_path::SearchPath;
use crate::shell;

/// Output of a captured run. A non-zero `exit_code` is not an error yet;
/// see [`ExecOutcome::into_result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// `NonZeroExit` (with captured stderr) unless the run exited 0.
    pub fn into_result(self) -> Result<Self, ExecError> {
        if self.success() {
            Ok(self)
        } else {
            Err(ExecError::NonZeroExit {
                command: self.command,
                code: self.exit_code,
                stderr: Some(self.stderr),
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct Runner {
    search_path: SearchPath,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(SearchPath::process())
    }
}

impl Runner {
    pub fn new(search_path: SearchPath) -> Self {
        Self { search_path }
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Run a raw shell string. See [`shell::run_shell`] for the exit-code contract.
    pub fn run_shell(&self, line: &str) -> Result<(), ExecError> {
        shell::run_shell(line, &self.search_path)
    }

    /// Run `program args...` with its directory injected into the search path.
    pub fn run<I, S>(&self, program: impl AsRef<std::ffi::OsStr>, args: I) -> Result<(), ExecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run_invocation(&Invocation::new(program).args(args))
    }

    pub fn run_invocation(&self, invocation: &Invocation) -> Result<(), ExecError> {
        tracing::info!(cmd = %invocation, "run command");
        self.inject_program_dir(invocation)?;
        self.run_shell(&invocation.to_string())
    }

    /// `<interpreter> -m <module> args...` as a directed run.
    pub fn run_module<I, S>(&self, interpreter: &Path, module: &str, args: I) -> Result<(), ExecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = Invocation::new(interpreter)
            .arg("-m")
            .arg(module)
            .args(args);
        self.run_invocation(&invocation)
    }

    fn inject_program_dir(&self, invocation: &Invocation) -> Result<(), ExecError> {
        if let Some(dir) = invocation.program_dir() {
            if let Err(e) = self.search_path.prepend(dir) {
                tracing::error!(error = %e, "set env $PATH failed");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Run without a shell, capturing stdout and stderr. The search path is applied
    /// but not modified. `Err` only when the process could not be started or its
    /// exit code could not be determined.
    pub fn capture(&self, invocation: &Invocation) -> Result<ExecOutcome, ExecError> {
        let command = invocation.to_string();
        tracing::debug!(cmd = %command, "capture command");
        observability::audit_execution_started(&command, "capture");
        let started = Instant::now();

        let output = invocation
            .to_command()
            .env(env_keys::PATH, self.search_path.current())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExecError::Spawn {
                command: command.clone(),
                source,
            })?;

        let Some(exit_code) = output.status.code() else {
            observability::audit_execution_completed(
                &command,
                crate::FALLBACK_EXIT_CODE,
                started.elapsed().as_millis() as u64,
            );
            return Err(ExecError::UnknownExit {
                command,
                source: None,
            });
        };
        observability::audit_execution_completed(
            &command,
            exit_code,
            started.elapsed().as_millis() as u64,
        );

        Ok(ExecOutcome {
            command,
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Run in `dir` with stdout inherited and stderr captured. A failure logs the
    /// stderr and carries it in the returned error.
    pub fn run_in_dir(&self, invocation: &Invocation, dir: &Path) -> Result<(), ExecError> {
        let command = invocation.to_string();
        tracing::info!(cmd = %command, dir = %dir.display(), "exec command");

        let output = invocation
            .to_command()
            .current_dir(dir)
            .env(env_keys::PATH, self.search_path.current())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ExecError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let result = shell::check_status(
            &command,
            output.status,
            Some(stderr.clone()).filter(|s| !s.is_empty()),
        );
        if let Err(ref e) = result {
            tracing::error!(error = %e, stderr = %stderr, "exec command failed");
        }
        result
    }
}
