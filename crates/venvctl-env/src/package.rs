//! Package lifecycle: probe / assert / install / uninstall / list, driven by pip.
//!
//! There is no state beyond what pip tracks. Install and uninstall check before acting
//! and re-assert afterwards; a pip run that exits 0 but leaves the package in the
//! wrong state is reported as a failure.

use std::fmt;
use std::str::FromStr;

use crate::error::EnvError;
use crate::python_env::PythonEnv;
use crate::Result;

/// `name` or `name==version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    pub name: String,
    pub version: Option<String>,
}

impl PackageRef {
    pub fn new(name: impl Into<String>, version: Option<String>) -> Result<Self> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(EnvError::InvalidPackageSpec(name));
        }
        Ok(Self {
            name,
            version: version.filter(|v| !v.is_empty()),
        })
    }
}

/// The name ends up in `import <name>`, so it must be a dotted Python identifier.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl FromStr for PackageRef {
    type Err = EnvError;

    /// Splits on the first `==`.
    fn from_str(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        let (name, version) = match spec.split_once("==") {
            Some((name, version)) => (name.trim(), Some(version.trim().to_string())),
            None => (spec, None),
        };
        if !is_valid_name(name) {
            return Err(EnvError::InvalidPackageSpec(spec.to_string()));
        }
        Self::new(name, version)
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}=={}", self.name, v),
            None => f.write_str(&self.name),
        }
    }
}

/// What a probe found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageState {
    /// Not importable
    Absent,
    /// Importable; no version was requested
    Present { version: String },
    /// Importable at the requested version
    Matched { version: String },
    /// Importable at another version
    Mismatched { installed: String, requested: String },
}

impl PackageState {
    pub fn is_installed(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Present { .. } | Self::Matched { .. })
    }
}

/// Loose version equality: trimmed, leading `v` ignored on both sides.
pub fn versions_match(installed: &str, requested: &str) -> bool {
    installed.trim().trim_start_matches('v') == requested.trim().trim_start_matches('v')
}

impl PythonEnv {
    /// Import the package and read `__version__`. Never fails for a missing package;
    /// only a probe that cannot run at all is an error.
    pub fn probe_package(&self, name: &str, version: Option<&str>) -> Result<PackageState> {
        if !is_valid_name(name) {
            return Err(EnvError::InvalidPackageSpec(name.to_string()));
        }
        let invocation = self
            .python()
            .arg("-c")
            .arg(format!("import {0}; print({0}.__version__)", name));
        let outcome = self.runner().capture(&invocation)?;
        if !outcome.success() {
            tracing::debug!(name, stderr = %outcome.stderr.trim(), "python package import failed");
            return Ok(PackageState::Absent);
        }

        let installed = outcome.stdout.trim().to_string();
        let state = match version.filter(|v| !v.is_empty()) {
            None => PackageState::Present { version: installed },
            Some(requested) if versions_match(&installed, requested) => {
                PackageState::Matched { version: installed }
            }
            Some(requested) => PackageState::Mismatched {
                installed,
                requested: requested.to_string(),
            },
        };
        Ok(state)
    }

    /// `Ok` when importable (and at `version`, if given); `PackageNotFound` or
    /// `VersionMismatch` otherwise.
    pub fn assert_package(&self, name: &str, version: Option<&str>) -> Result<PackageState> {
        match self.probe_package(name, version)? {
            PackageState::Absent => Err(EnvError::PackageNotFound {
                name: name.to_string(),
            }),
            PackageState::Mismatched {
                installed,
                requested,
            } => Err(EnvError::VersionMismatch {
                name: name.to_string(),
                installed,
                requested,
            }),
            state => {
                match version.filter(|v| !v.is_empty()) {
                    Some(v) => tracing::info!(name, version = v, "python package is ready"),
                    None => tracing::info!(name, "python package is ready"),
                }
                Ok(state)
            }
        }
    }

    /// Install `name` or `name==version`. A no-op when the package already asserts.
    pub fn install_package(&self, spec: &str) -> Result<()> {
        let pkg: PackageRef = spec.parse()?;

        match self.assert_package(&pkg.name, pkg.version.as_deref()) {
            Ok(_) => return Ok(()),
            Err(e) if e.is_assertion() => tracing::debug!(reason = %e, "package needs install"),
            Err(e) => return Err(e),
        }

        self.pip_available().map_err(|source| {
            tracing::warn!("pip is not available");
            EnvError::PipUnavailable { source }
        })?;

        tracing::info!(
            pkg_name = %pkg.name,
            pkg_version = pkg.version.as_deref().unwrap_or(""),
            "installing python package"
        );

        let index_url = self.pip_config().index_url;
        self.run_module(
            "pip",
            [
                "install".to_string(),
                pkg.to_string(),
                "--upgrade".to_string(),
                "--index-url".to_string(),
                index_url,
                "--quiet".to_string(),
                "--disable-pip-version-check".to_string(),
            ],
        )
        .map_err(|source| EnvError::PipInstall {
            pkg: pkg.to_string(),
            source,
        })?;

        self.assert_package(&pkg.name, pkg.version.as_deref())
            .map(|_| ())
    }

    /// Uninstall by name; a version suffix is ignored. A no-op when not installed.
    pub fn uninstall_package(&self, spec: &str) -> Result<()> {
        let pkg: PackageRef = spec.parse()?;
        let name = pkg.name.as_str();

        if !self.probe_package(name, None)?.is_installed() {
            tracing::info!(pkg_name = name, "python package is not installed, no need to uninstall");
            return Ok(());
        }

        self.pip_available().map_err(|source| {
            tracing::warn!("pip is not available");
            EnvError::PipUnavailable { source }
        })?;

        tracing::info!(pkg_name = name, "uninstalling python package");
        self.run_module(
            "pip",
            ["uninstall", name, "-y", "--quiet", "--disable-pip-version-check"],
        )
        .map_err(|source| EnvError::PipUninstall {
            name: name.to_string(),
            source,
        })?;

        if self.probe_package(name, None)?.is_installed() {
            return Err(EnvError::StillInstalled {
                name: name.to_string(),
            });
        }

        tracing::info!(pkg_name = name, "python package uninstalled successfully");
        Ok(())
    }

    /// `pip list` with live output. Best-effort: failures are logged, not returned.
    pub fn list_packages(&self) {
        if let Err(e) = self.run_module("pip", ["list"]) {
            tracing::error!(
                python = %self.interpreter().display(),
                error = %e,
                "failed to list python packages"
            );
        }
    }
}
