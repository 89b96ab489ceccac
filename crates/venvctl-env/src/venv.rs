//! Venv provisioning: the seam between the resolver and whatever creates venvs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use venvctl_exec::Runner;

use crate::interpreter::is_python3;
use crate::python_env::PythonEnv;

/// Make sure a venv exists at `venv` with `packages` installed and return the
/// path of its python3 interpreter.
pub trait VenvProvisioner: Send + Sync {
    fn provision(&self, venv: &Path, packages: &[String]) -> Result<PathBuf>;
}

impl<F> VenvProvisioner for F
where
    F: Fn(&Path, &[String]) -> Result<PathBuf> + Send + Sync,
{
    fn provision(&self, venv: &Path, packages: &[String]) -> Result<PathBuf> {
        self(venv, packages)
    }
}

/// Interpreter location inside a venv.
pub fn venv_python(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join("python.exe")
    } else {
        venv.join("bin").join("python3")
    }
}

/// `python3 -m venv`, then pip-install the requested packages.
#[derive(Debug, Clone)]
pub struct StdVenvProvisioner {
    runner: Runner,
    base_python: Option<PathBuf>,
}

impl StdVenvProvisioner {
    pub fn new(runner: Runner) -> Self {
        Self {
            runner,
            base_python: None,
        }
    }

    /// Interpreter used to create the venv instead of searching for one.
    pub fn with_base_python(mut self, python: impl Into<PathBuf>) -> Self {
        self.base_python = Some(python.into());
        self
    }

    fn base_python(&self) -> Result<PathBuf> {
        if let Some(ref p) = self.base_python {
            return Ok(p.clone());
        }
        let cwd = std::env::current_dir().context("Read current dir")?;
        let path = self.runner.search_path().current();
        for name in ["python3", "python"] {
            if let Ok(candidate) = which::which_in(name, Some(&path), &cwd) {
                if is_python3(&self.runner, &candidate) {
                    return Ok(candidate);
                }
            }
        }
        anyhow::bail!("python3 or python not found in PATH")
    }
}

impl VenvProvisioner for StdVenvProvisioner {
    fn provision(&self, venv: &Path, packages: &[String]) -> Result<PathBuf> {
        let python = venv_python(venv);
        if python.exists() {
            tracing::debug!(venv = %venv.display(), "reusing existing venv");
        } else {
            std::fs::create_dir_all(venv).context("Create venv dir")?;
            let base = self.base_python()?;
            tracing::info!(venv = %venv.display(), base = %base.display(), "creating python3 venv");
            self.runner
                .run(&base, ["-m".to_string(), "venv".to_string(), venv.display().to_string()])
                .context("Create venv")?;
            if !python.exists() {
                anyhow::bail!("venv created but {} is missing", python.display());
            }
        }

        let env = PythonEnv::new(&python, self.runner.clone());
        for pkg in packages {
            env.install_package(pkg)
                .with_context(|| format!("Install {} into {}", pkg, venv.display()))?;
        }
        Ok(python)
    }
}
