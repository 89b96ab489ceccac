//! Interpreter detection and the resolver that produces a [`PythonEnv`].

use std::path::{Path, PathBuf};

use venvctl_exec::{Invocation, Runner};

use crate::error::EnvError;
use crate::python_env::PythonEnv;
use crate::venv::{StdVenvProvisioner, VenvProvisioner};
use crate::Result;

/// The detection rule: a Python 3 interpreter's `--version` output starts with "Python 3".
pub fn reports_python3(version_output: &str) -> bool {
    version_output.starts_with("Python 3")
}

/// Captured `--version` banner: stdout, or stderr for interpreters that print it there.
fn version_banner(runner: &Runner, candidate: &Path) -> std::result::Result<String, String> {
    let outcome = runner
        .capture(&Invocation::new(candidate).arg("--version"))
        .map_err(|e| e.to_string())?;
    if !outcome.success() {
        return Err(format!("exit code {}", outcome.exit_code));
    }
    if outcome.stdout.trim().is_empty() {
        Ok(outcome.stderr)
    } else {
        Ok(outcome.stdout)
    }
}

pub fn is_python3(runner: &Runner, candidate: &Path) -> bool {
    match version_banner(runner, candidate) {
        Ok(banner) => reports_python3(&banner),
        Err(reason) => {
            tracing::debug!(candidate = %candidate.display(), reason = %reason, "not a runnable interpreter");
            false
        }
    }
}

/// `<home>/.venvctl/venv`
pub fn default_venv_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(EnvError::HomeDir)?;
    Ok(home.join(".venvctl").join("venv"))
}

/// Resolves (creating if needed) the managed venv and checks its interpreter.
pub struct Resolver {
    runner: Runner,
    provisioner: Box<dyn VenvProvisioner>,
}

impl Resolver {
    /// Resolver backed by [`StdVenvProvisioner`].
    pub fn new(runner: Runner) -> Self {
        let provisioner = StdVenvProvisioner::new(runner.clone());
        Self::with_provisioner(runner, provisioner)
    }

    pub fn with_provisioner(runner: Runner, provisioner: impl VenvProvisioner + 'static) -> Self {
        Self {
            runner,
            provisioner: Box::new(provisioner),
        }
    }

    /// Ensure a Python 3 venv at `venv` (default `~/.venvctl/venv`) with `packages`
    /// installed. Returns the context for the resolved interpreter.
    pub fn ensure(&self, venv: Option<&Path>, packages: &[String]) -> Result<PythonEnv> {
        let venv = match venv.filter(|p| !p.as_os_str().is_empty()) {
            Some(p) => p.to_path_buf(),
            None => default_venv_dir()?,
        };

        let interpreter = self
            .provisioner
            .provision(&venv, packages)
            .map_err(|source| EnvError::Provision {
                venv: venv.clone(),
                source,
            })?;

        match version_banner(&self.runner, &interpreter) {
            Ok(banner) if reports_python3(&banner) => {}
            Ok(reported) | Err(reported) => {
                return Err(EnvError::NotPython3 {
                    interpreter,
                    reported: reported.trim().to_string(),
                })
            }
        }

        tracing::info!(
            python3_executable = %interpreter.display(),
            "set python3 executable path"
        );
        Ok(PythonEnv::new(interpreter, self.runner.clone()))
    }
}


#[cfg(all(test, unix))]
mod resolver_tests {
    use super::*;
    use crate::testing::FakePython;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_is_python3_with_fake_interpreter() {
        let py = FakePython::new();
        assert!(is_python3(&py.runner(), py.python()));
        py.set_version_banner("Python 2.7.18\n");
        assert!(!is_python3(&py.runner(), py.python()));
        assert!(!is_python3(&py.runner(), Path::new("/definitely/not/here/python3")));
    }

    #[test]
    fn test_ensure_uses_explicit_venv() {
        let py = FakePython::new();
        let venv = py.root().join("venv");
        let resolver = Resolver::with_provisioner(
            py.runner(),
            StdVenvProvisioner::new(py.runner()).with_base_python(py.python()),
        );
        let env = resolver.ensure(Some(&venv), &[]).unwrap();
        assert_eq!(env.interpreter(), venv.join("bin").join("python3"));
        assert!(is_python3(env.runner(), env.interpreter()));
    }

    #[test]
    fn test_ensure_default_venv_under_home() {
        let py = FakePython::new();
        let home = py.root().join("home");
        std::fs::create_dir_all(&home).unwrap();
        venvctl_core::config::set_env_var("HOME", &home);

        let seen: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
        let seen_in = Arc::clone(&seen);
        let std_provisioner = StdVenvProvisioner::new(py.runner()).with_base_python(py.python());
        let resolver = Resolver::with_provisioner(
            py.runner(),
            move |venv: &Path, pkgs: &[String]| -> anyhow::Result<PathBuf> {
                *seen_in.lock().unwrap() = Some(venv.to_path_buf());
                std_provisioner.provision(venv, pkgs)
            },
        );

        let env = resolver.ensure(Some(Path::new("")), &[]).unwrap();
        let expected = home.join(".venvctl").join("venv");
        assert_eq!(seen.lock().unwrap().as_deref(), Some(expected.as_path()));
        assert_eq!(env.interpreter(), expected.join("bin").join("python3"));
        assert!(is_python3(env.runner(), env.interpreter()));
    }

    #[test]
    fn test_ensure_rejects_non_python3() {
        let py = FakePython::new();
        py.set_version_banner("Python 2.7.18\n");
        let python = py.python().to_path_buf();
        let resolver = Resolver::with_provisioner(
            py.runner(),
            move |_: &Path, _: &[String]| -> anyhow::Result<PathBuf> { Ok(python.clone()) },
        );
        let err = resolver.ensure(Some(py.root()), &[]).unwrap_err();
        match err {
            EnvError::NotPython3 { reported, .. } => assert_eq!(reported, "Python 2.7.18"),
            other => panic!("expected NotPython3, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_wraps_provision_failure() {
        let py = FakePython::new();
        let resolver = Resolver::with_provisioner(
            py.runner(),
            |_: &Path, _: &[String]| -> anyhow::Result<PathBuf> { anyhow::bail!("disk full") },
        );
        let err = resolver.ensure(Some(py.root()), &[]).unwrap_err();
        assert!(matches!(err, EnvError::Provision { .. }));
        assert!(err.to_string().contains("disk full"));
    }
}
