//! Python 3 runtime bootstrap and package lifecycle.
//!
//! [`Resolver`] produces a [`PythonEnv`]: the interpreter path plus the runner used to
//! drive it. Package and pip operations are methods on that context; nothing here
//! keeps a global "active interpreter".

pub mod error;
pub mod interpreter;
pub mod package;
pub mod pip;
pub mod python_env;
pub mod venv;

#[cfg(test)]
pub(crate) mod testing;

pub use error::EnvError;
pub use interpreter::{default_venv_dir, is_python3, reports_python3, Resolver};
pub use package::{versions_match, PackageRef, PackageState};
pub use python_env::PythonEnv;
pub use venv::{venv_python, StdVenvProvisioner, VenvProvisioner};

pub type Result<T> = std::result::Result<T, EnvError>;
