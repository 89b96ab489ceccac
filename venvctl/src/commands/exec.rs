//! `venvctl run | shell | exec`

use anyhow::Result;
use venvctl_exec::{ExecError, Runner};

use super::Target;

pub fn cmd_run_module(runner: &Runner, target: &Target, module: &str, args: Vec<String>) -> Result<()> {
    let env = target.resolve(runner, &[])?;
    exit_on_failure(env.run_module(module, args));
    Ok(())
}

pub fn cmd_shell(runner: &Runner, command: &str) {
    exit_on_failure(runner.run_shell(command));
}

pub fn cmd_exec(runner: &Runner, program: &str, args: Vec<String>) {
    exit_on_failure(runner.run(program, args));
}

/// Mirror the child's exit code (1 when it has none).
fn exit_on_failure(result: Result<(), ExecError>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
