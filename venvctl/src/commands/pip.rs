//! `venvctl pip install | uninstall`

use anyhow::Result;
use venvctl_core::config::PipConfig;
use venvctl_exec::Runner;

use super::Target;

pub fn cmd_install(runner: &Runner, target: &Target, insecure: bool) -> Result<()> {
    let mut env = target.resolve(runner, &[])?;
    if insecure {
        let cfg = PipConfig {
            insecure_bootstrap: true,
            ..PipConfig::from_env()
        };
        env = env.with_pip_config(cfg);
    }
    env.install_pip()?;
    Ok(())
}

pub fn cmd_uninstall(runner: &Runner, target: &Target) -> Result<()> {
    target.resolve(runner, &[])?.uninstall_pip()?;
    Ok(())
}
