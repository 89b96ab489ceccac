//! Process execution for venvctl.
//!
//! Leaf-first: [`command`] builds invocations, [`shell`] runs a command line through the
//! platform shell, [`search_path`] holds the mutable `PATH` value, and [`runner`] ties them
//! together with directory injection and captured runs.

pub mod command;
pub mod error;
pub mod runner;
pub mod search_path;
pub mod shell;

pub use command::Invocation;
pub use error::{ExecError, FALLBACK_EXIT_CODE};
pub use runner::{ExecOutcome, Runner};
pub use search_path::SearchPath;
