mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, PipAction};
use venvctl_core::observability;
use venvctl_exec::Runner;

fn main() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();
    let runner = Runner::default();
    let target = commands::Target {
        python: cli.python,
        venv: cli.venv,
    };

    match cli.command {
        Commands::Ensure { packages } => commands::env::cmd_ensure(&runner, &target, &packages)?,
        Commands::Assert { name, version } => {
            commands::package::cmd_assert(&runner, &target, &name, version.as_deref())?
        }
        Commands::Install { packages } => commands::package::cmd_install(&runner, &target, &packages)?,
        Commands::Uninstall { packages } => {
            commands::package::cmd_uninstall(&runner, &target, &packages)?
        }
        Commands::List => commands::package::cmd_list(&runner, &target)?,
        Commands::Pip { action } => match action {
            PipAction::Install { insecure } => commands::pip::cmd_install(&runner, &target, insecure)?,
            PipAction::Uninstall => commands::pip::cmd_uninstall(&runner, &target)?,
        },
        Commands::Run { module, args } => commands::exec::cmd_run_module(&runner, &target, &module, args)?,
        Commands::Shell { command } => commands::exec::cmd_shell(&runner, &command),
        Commands::Exec { program, args } => commands::exec::cmd_exec(&runner, &program, args),
    }

    Ok(())
}
