//! `venvctl ensure`

use anyhow::Result;
use venvctl_exec::Runner;

use super::Target;

pub fn cmd_ensure(runner: &Runner, target: &Target, packages: &[String]) -> Result<()> {
    let env = target.resolve(runner, packages)?;
    if target.python.is_some() {
        // Explicit interpreter: no venv was provisioned, install directly.
        for pkg in packages {
            env.install_package(pkg)?;
        }
    }
    println!("{}", env.interpreter().display());
    Ok(())
}
