//! `venvctl assert | install | uninstall | list`

use anyhow::{Context, Result};
use venvctl_env::PackageState;
use venvctl_exec::Runner;

use super::Target;

pub fn cmd_assert(runner: &Runner, target: &Target, name: &str, version: Option<&str>) -> Result<()> {
    let env = target.resolve(runner, &[])?;
    match env.assert_package(name, version)? {
        PackageState::Present { version } | PackageState::Matched { version } => {
            println!("{} {}", name, version);
        }
        // assert_package maps the other states to errors
        PackageState::Absent | PackageState::Mismatched { .. } => {}
    }
    Ok(())
}

pub fn cmd_install(runner: &Runner, target: &Target, packages: &[String]) -> Result<()> {
    let env = target.resolve(runner, &[])?;
    for pkg in packages {
        env.install_package(pkg)
            .with_context(|| format!("Install {}", pkg))?;
    }
    eprintln!("✓ {} package(s) ready", packages.len());
    Ok(())
}

pub fn cmd_uninstall(runner: &Runner, target: &Target, packages: &[String]) -> Result<()> {
    let env = target.resolve(runner, &[])?;
    for pkg in packages {
        env.uninstall_package(pkg)
            .with_context(|| format!("Uninstall {}", pkg))?;
    }
    eprintln!("✓ {} package(s) removed", packages.len());
    Ok(())
}

pub fn cmd_list(runner: &Runner, target: &Target) -> Result<()> {
    target.resolve(runner, &[])?.list_packages();
    Ok(())
}
