//! Install or remove pip itself inside an interpreter.
//!
//! Missing pip is bootstrapped with the get-pip script. By default the script is
//! downloaded with verified TLS and then run from a temporary file. With
//! `insecure_bootstrap` the interpreter fetches it itself with certificate
//! verification disabled; that mode is opt-in and logged at WARN on every use.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use venvctl_core::config::PipConfig;
use venvctl_exec::ExecOutcome;

use crate::error::EnvError;
use crate::python_env::PythonEnv;
use crate::Result;

/// Fetches `sys.argv[1]` without certificate verification and runs it as get-pip.py.
const INSECURE_BOOTSTRAP_SCRIPT: &str = r#"
import ssl, sys, urllib.request
ctx = ssl.create_default_context()
ctx.check_hostname = False
ctx.verify_mode = ssl.CERT_NONE
try:
    with urllib.request.urlopen(sys.argv[1], context=ctx) as response:
        source = response.read()
except Exception as e:
    print(f"fetch get-pip failed: {e}", file=sys.stderr)
    sys.exit(1)
sys.argv = ["get-pip.py"]
exec(compile(source, "get-pip.py", "exec"), {"__name__": "__main__"})
"#;

/// Where the bootstrap script is read from.
#[derive(Debug)]
enum BootstrapScript {
    /// `file://` URL or plain path, e.g. an offline mirror
    Local(PathBuf),
    /// Downloaded copy, removed on drop
    Downloaded(tempfile::NamedTempFile),
}

impl BootstrapScript {
    fn path(&self) -> &Path {
        match self {
            Self::Local(p) => p,
            Self::Downloaded(f) => f.path(),
        }
    }
}

fn local_script_path(url: &str) -> Option<PathBuf> {
    if let Some(path) = url.strip_prefix("file://") {
        return Some(PathBuf::from(path));
    }
    if url.contains("://") {
        return None;
    }
    Some(PathBuf::from(url))
}

fn fetch_bootstrap(url: &str) -> Result<BootstrapScript> {
    if let Some(path) = local_script_path(url) {
        if !path.is_file() {
            return Err(EnvError::BootstrapFetch {
                url: url.to_string(),
                reason: "no such file".to_string(),
            });
        }
        return Ok(BootstrapScript::Local(path));
    }

    let agent = ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(10))
        .timeout_read(Duration::from_secs(60))
        .build();
    let response = agent.get(url).call().map_err(|e| EnvError::BootstrapFetch {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let mut file = tempfile::Builder::new()
        .prefix("get-pip-")
        .suffix(".py")
        .tempfile()?;
    std::io::copy(&mut response.into_reader(), &mut file)?;
    file.flush()?;
    Ok(BootstrapScript::Downloaded(file))
}

impl PythonEnv {
    /// Make pip importable. A no-op when `-m pip --version` already works.
    pub fn install_pip(&self) -> Result<()> {
        let python3 = self.interpreter().display().to_string();
        tracing::info!(python3 = %python3, "checking if pip is installed");
        if self.pip_available().is_ok() {
            tracing::info!(python3 = %python3, "pip is already installed");
            return Ok(());
        }

        let cfg = self.pip_config();
        let outcome = self.run_bootstrap(&cfg)?;
        if !outcome.success() {
            tracing::error!(
                stdout = %outcome.stdout,
                stderr = %outcome.stderr,
                "pip bootstrap failed"
            );
        }
        outcome
            .into_result()
            .map_err(|source| EnvError::PipBootstrap { source })?;

        tracing::info!("verifying pip installation");
        self.pip_available()
            .map_err(|source| EnvError::PipUnverifiable { source })?;

        tracing::info!(python3 = %python3, "pip installed");
        Ok(())
    }

    fn run_bootstrap(&self, cfg: &PipConfig) -> Result<ExecOutcome> {
        let url = cfg.get_pip_url.as_str();
        if url != venvctl_core::config::schema::DEFAULT_GET_PIP_URL {
            tracing::info!(url, "using custom get-pip script");
        }

        if cfg.insecure_bootstrap && local_script_path(url).is_none() {
            tracing::warn!(
                url,
                "fetching pip bootstrap script WITHOUT TLS certificate verification"
            );
            let invocation = self
                .python()
                .arg("-c")
                .arg(INSECURE_BOOTSTRAP_SCRIPT)
                .arg(url);
            return Ok(self.runner().capture(&invocation)?);
        }

        tracing::info!(url, "installing pip");
        let script = fetch_bootstrap(url)?;
        let invocation = self.python().arg(script.path().as_os_str().to_string_lossy());
        Ok(self.runner().capture(&invocation)?)
    }

    /// Remove pip. A no-op when pip is already absent.
    pub fn uninstall_pip(&self) -> Result<()> {
        let python3 = self.interpreter().display().to_string();
        tracing::info!(python3 = %python3, "checking if pip is installed");
        if self.pip_available().is_err() {
            tracing::info!(python3 = %python3, "pip is not installed, no need to uninstall");
            return Ok(());
        }

        tracing::info!(python3 = %python3, "uninstalling pip");
        self.run_module(
            "pip",
            ["uninstall", "pip", "-y", "--quiet", "--disable-pip-version-check"],
        )
        .map_err(|source| EnvError::PipUninstall {
            name: "pip".to_string(),
            source,
        })?;

        tracing::info!("verifying pip uninstallation");
        if self.pip_available().is_ok() {
            return Err(EnvError::PipStillInstalled);
        }

        tracing::info!(python3 = %python3, "pip uninstalled successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_script_path() {
        assert_eq!(
            local_script_path("file:///srv/mirror/get-pip.py"),
            Some(PathBuf::from("/srv/mirror/get-pip.py"))
        );
        assert_eq!(
            local_script_path("/srv/mirror/get-pip.py"),
            Some(PathBuf::from("/srv/mirror/get-pip.py"))
        );
        assert_eq!(local_script_path("https://bootstrap.pypa.io/get-pip.py"), None);
    }

    #[test]
    fn test_missing_local_script_is_fetch_error() {
        let err = fetch_bootstrap("/definitely/not/here/get-pip.py").unwrap_err();
        assert!(matches!(err, EnvError::BootstrapFetch { .. }));
    }
}
