//! Environment variable keys and their aliases.
//!
//! `VENVCTL_*` names are primary. The package index and bootstrap-script keys keep the
//! names host applications already export.

/// Package index and pip bootstrap
pub mod pip {
    /// Package index passed to `pip install --index-url`
    pub const PYPI_INDEX_URL: &str = "PYPI_INDEX_URL";
    pub const INDEX_URL_ALIASES: &[&str] = &["PIP_INDEX_URL"];

    /// Location of the get-pip bootstrap script
    pub const GET_PIP_URL: &str = "GET_PIP_URL";

    /// Skip TLS certificate verification when fetching the bootstrap script.
    /// Independent of `GET_PIP_URL`; off unless explicitly set.
    pub const VENVCTL_PIP_BOOTSTRAP_INSECURE: &str = "VENVCTL_PIP_BOOTSTRAP_INSECURE";
}

/// Managed virtual environment
pub mod venv {
    pub const VENVCTL_VENV_DIR: &str = "VENVCTL_VENV_DIR";
}

/// Observability and logging
pub mod observability {
    pub const VENVCTL_QUIET: &str = "VENVCTL_QUIET";
    pub const VENVCTL_LOG_LEVEL: &str = "VENVCTL_LOG_LEVEL";
    pub const VENVCTL_LOG_JSON: &str = "VENVCTL_LOG_JSON";
    pub const VENVCTL_AUDIT_LOG: &str = "VENVCTL_AUDIT_LOG";
}

/// Ambient search path rewritten by directed runs
pub const PATH: &str = "PATH";
