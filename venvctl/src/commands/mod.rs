//! CLI command implementations. Each `cmd_*` maps one subcommand onto the library.

pub mod env;
pub mod exec;
pub mod package;
pub mod pip;

use std::path::PathBuf;

use anyhow::{Context, Result};
use venvctl_core::config::VenvConfig;
use venvctl_env::{is_python3, PythonEnv, Resolver};
use venvctl_exec::Runner;

/// Which interpreter a command operates on.
#[derive(Debug, Clone, Default)]
pub struct Target {
    /// Explicit interpreter; used as-is
    pub python: Option<PathBuf>,
    /// Venv directory; falls back to VENVCTL_VENV_DIR, then ~/.venvctl/venv
    pub venv: Option<PathBuf>,
}

impl Target {
    fn venv_dir(&self) -> Option<PathBuf> {
        self.venv.clone().or_else(|| VenvConfig::from_env().venv_dir)
    }

    /// Resolve the interpreter, creating the managed venv (with `packages`) when
    /// no explicit interpreter was given.
    pub fn resolve(&self, runner: &Runner, packages: &[String]) -> Result<PythonEnv> {
        if let Some(ref python) = self.python {
            if !is_python3(runner, python) {
                tracing::warn!(python = %python.display(), "interpreter does not report Python 3");
            }
            return Ok(PythonEnv::new(python, runner.clone()));
        }
        let venv = self.venv_dir();
        Resolver::new(runner.clone())
            .ensure(venv.as_deref(), packages)
            .context("Resolve python3 venv")
    }
}
