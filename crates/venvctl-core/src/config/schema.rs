//! Typed configuration structs, loaded from the environment.

use super::env_keys::{observability as obv_keys, pip as pip_keys, venv as venv_keys};
use super::loader::{env_bool, env_optional, env_or};
use std::path::PathBuf;

pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/simple";
pub const DEFAULT_GET_PIP_URL: &str = "https://bootstrap.pypa.io/get-pip.py";

/// pip-related settings. Read at operation time, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipConfig {
    /// `--index-url` for `pip install`
    pub index_url: String,
    /// Where the get-pip bootstrap script is fetched from
    pub get_pip_url: String,
    /// Fetch the bootstrap script without TLS certificate verification.
    ///
    /// SECURITY: this downloads and executes remote code over an unauthenticated
    /// channel. Only enable it for internal mirrors with self-signed certificates.
    pub insecure_bootstrap: bool,
}

impl Default for PipConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            get_pip_url: DEFAULT_GET_PIP_URL.to_string(),
            insecure_bootstrap: false,
        }
    }
}

impl PipConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            index_url: env_or(pip_keys::PYPI_INDEX_URL, pip_keys::INDEX_URL_ALIASES, || {
                DEFAULT_INDEX_URL.to_string()
            }),
            get_pip_url: env_or(pip_keys::GET_PIP_URL, &[], || {
                DEFAULT_GET_PIP_URL.to_string()
            }),
            insecure_bootstrap: env_bool(pip_keys::VENVCTL_PIP_BOOTSTRAP_INSECURE, &[], false),
        }
    }
}

/// Managed venv location override
#[derive(Debug, Clone, Default)]
pub struct VenvConfig {
    pub venv_dir: Option<PathBuf>,
}

impl VenvConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            venv_dir: env_optional(venv_keys::VENVCTL_VENV_DIR, &[]).map(PathBuf::from),
        }
    }
}

/// Observability: quiet, log_level, log_json, audit_log
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            Self {
                quiet: env_bool(obv_keys::VENVCTL_QUIET, &[], false),
                log_level: env_or(obv_keys::VENVCTL_LOG_LEVEL, &[], || {
                    "venvctl=info".to_string()
                }),
                log_json: env_bool(obv_keys::VENVCTL_LOG_JSON, &[], false),
                audit_log: env_optional(obv_keys::VENVCTL_AUDIT_LOG, &[]),
            }
        })
    }
}
