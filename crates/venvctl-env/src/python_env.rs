//! `PythonEnv`: the explicit context every package and pip operation runs against.

use std::path::{Path, PathBuf};

use venvctl_core::config::PipConfig;
use venvctl_exec::{ExecError, Invocation, Runner};

/// A resolved interpreter plus the runner that drives it.
///
/// Cloning is cheap and clones share the runner's search path.
#[derive(Debug, Clone)]
pub struct PythonEnv {
    interpreter: PathBuf,
    runner: Runner,
    /// Fixed pip settings; `None` reads them from the environment per operation.
    pip: Option<PipConfig>,
}

impl PythonEnv {
    pub fn new(interpreter: impl Into<PathBuf>, runner: Runner) -> Self {
        Self {
            interpreter: interpreter.into(),
            runner,
            pip: None,
        }
    }

    pub fn with_pip_config(mut self, pip: PipConfig) -> Self {
        self.pip = Some(pip);
        self
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    /// Index URL and bootstrap settings, resolved at call time.
    pub fn pip_config(&self) -> PipConfig {
        self.pip.clone().unwrap_or_else(PipConfig::from_env)
    }

    /// Invocation of this interpreter, ready for arguments.
    pub fn python(&self) -> Invocation {
        Invocation::new(&self.interpreter)
    }

    /// `<interpreter> -m <module> args...` as a directed run (live output).
    pub fn run_module<I, S>(&self, module: &str, args: I) -> Result<(), ExecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner.run_module(&self.interpreter, module, args)
    }

    /// `-m pip --version`
    pub(crate) fn pip_available(&self) -> Result<(), ExecError> {
        self.run_module("pip", ["--version"])
    }
}
