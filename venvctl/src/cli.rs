use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// venvctl - bootstrap and maintain a managed Python 3 environment
#[derive(Parser, Debug)]
#[command(name = "venvctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Python interpreter to operate on (skips venv resolution)
    #[arg(long, global = true, value_name = "PYTHON")]
    pub python: Option<PathBuf>,

    /// Virtual environment directory (default: $VENVCTL_VENV_DIR or ~/.venvctl/venv)
    #[arg(long, global = true, value_name = "DIR")]
    pub venv: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the venv if needed, install packages, print the interpreter path
    Ensure {
        /// Packages to pre-install (`name` or `name==version`)
        #[arg(value_name = "PKG")]
        packages: Vec<String>,
    },

    /// Check that a package is importable, optionally at a version
    Assert {
        #[arg(value_name = "NAME")]
        name: String,

        /// Required version (a leading `v` is ignored)
        #[arg(long)]
        version: Option<String>,
    },

    /// Install packages (`name` or `name==version`); already-satisfied ones are skipped
    Install {
        #[arg(value_name = "PKG", required = true)]
        packages: Vec<String>,
    },

    /// Uninstall packages; absent ones are skipped
    Uninstall {
        #[arg(value_name = "PKG", required = true)]
        packages: Vec<String>,
    },

    /// List installed packages (pip list)
    List,

    /// Manage pip itself
    Pip {
        #[command(subcommand)]
        action: PipAction,
    },

    /// Run `python -m <MODULE> [ARGS...]` with the managed interpreter
    Run {
        #[arg(value_name = "MODULE")]
        module: String,

        #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a command line through the platform shell; exits with its exit code
    Shell {
        #[arg(value_name = "COMMAND")]
        command: String,
    },

    /// Run a program with its directory prepended to PATH; exits with its exit code
    Exec {
        #[arg(value_name = "PROGRAM")]
        program: String,

        #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PipAction {
    /// Install pip via the get-pip bootstrap script if it is missing
    Install {
        /// Fetch the bootstrap script WITHOUT TLS certificate verification
        /// (also: VENVCTL_PIP_BOOTSTRAP_INSECURE=1)
        #[arg(long, default_value = "false")]
        insecure: bool,
    },

    /// Uninstall pip
    Uninstall,
}
