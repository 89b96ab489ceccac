use std::path::PathBuf;

use thiserror::Error;
use venvctl_exec::ExecError;

/// Errors from interpreter resolution and package / pip lifecycle operations.
#[derive(Debug, Error)]
pub enum EnvError {
    // ─── Resolution ─────────────────────────────────────────────────────────
    #[error("get user home dir failed")]
    HomeDir,

    #[error("provision venv at {} failed: {source}", .venv.display())]
    Provision {
        venv: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("{} is not a Python 3 interpreter (reported: {reported:?})", .interpreter.display())]
    NotPython3 {
        interpreter: PathBuf,
        reported: String,
    },

    // ─── Assertion ──────────────────────────────────────────────────────────
    #[error("invalid package spec {0:?}")]
    InvalidPackageSpec(String),

    #[error("python package {name} not found")]
    PackageNotFound { name: String },

    #[error("python package {name} version {installed} not matched, please upgrade to {requested}")]
    VersionMismatch {
        name: String,
        installed: String,
        requested: String,
    },

    // ─── Tool availability / subprocess ─────────────────────────────────────
    #[error("pip is not available: {source}")]
    PipUnavailable {
        #[source]
        source: ExecError,
    },

    #[error("pip install {pkg} failed: {source}")]
    PipInstall {
        pkg: String,
        #[source]
        source: ExecError,
    },

    #[error("pip uninstall {name} failed: {source}")]
    PipUninstall {
        name: String,
        #[source]
        source: ExecError,
    },

    #[error("fetch pip bootstrap script from {url} failed: {reason}")]
    BootstrapFetch { url: String, reason: String },

    #[error("pip bootstrap failed: {source}")]
    PipBootstrap {
        #[source]
        source: ExecError,
    },

    // ─── Post-condition ─────────────────────────────────────────────────────
    #[error("package {name} still exists after uninstall")]
    StillInstalled { name: String },

    #[error("pip installed but verification failed: {source}")]
    PipUnverifiable {
        #[source]
        source: ExecError,
    },

    #[error("pip still exists after uninstallation")]
    PipStillInstalled,

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EnvError {
    /// Assertion failures are control-flow signals: the package is absent or at
    /// the wrong version, and installing may fix it.
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            Self::PackageNotFound { .. } | Self::VersionMismatch { .. }
        )
    }
}
