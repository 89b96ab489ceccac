//! A fake `python3` for lifecycle tests (unix only).
//!
//! The fake is a shell script. Installed packages are files under `state/site/`
//! holding the version string, pip's presence is the `state/pip` file, and every
//! invocation is appended to `state/calls.log`. Behaviour switches are empty
//! files in `state/` (see the script).

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use venvctl_core::config::PipConfig;
use venvctl_exec::{Runner, SearchPath};

use crate::python_env::PythonEnv;

const FAKE_PYTHON: &str = r#"#!/bin/sh
state='@STATE@'
echo "$*" >> "$state/calls.log"
case "$1" in
--version)
    if [ -f "$state/version_banner" ]; then cat "$state/version_banner"; else echo "Python 3.11.4"; fi
    exit 0
    ;;
-c)
    name=$(printf '%s\n' "$2" | sed -n 's/^import \([A-Za-z0-9_.]*\);.*/\1/p')
    if [ -n "$name" ] && [ -f "$state/site/$name" ]; then
        cat "$state/site/$name"
        exit 0
    fi
    echo "ModuleNotFoundError: No module named '$name'" >&2
    exit 1
    ;;
-m)
    if [ "$2" = "venv" ]; then
        mkdir -p "$3/bin" && cp "$0" "$3/bin/python3"
        exit $?
    fi
    if [ "$2" != "pip" ] || [ ! -f "$state/pip" ]; then
        echo "No module named $2" >&2
        exit 1
    fi
    case "$3" in
    --version)
        echo "pip 24.0 from $state (python 3.11)"
        exit 0
        ;;
    install)
        echo "$4" >> "$state/pip_install.log"
        if [ -f "$state/install_fails" ]; then echo "ERROR: boom" >&2; exit 1; fi
        if [ -f "$state/install_noop" ]; then exit 0; fi
        name=${4%%==*}
        version=${4#*==}
        if [ "$version" = "$4" ]; then version="1.0.0"; fi
        printf '%s\n' "$version" > "$state/site/$name"
        exit 0
        ;;
    uninstall)
        echo "$4" >> "$state/pip_uninstall.log"
        if [ "$4" = "pip" ]; then
            if [ ! -f "$state/pip_sticky" ]; then rm -f "$state/pip"; fi
            exit 0
        fi
        if [ ! -f "$state/uninstall_noop" ]; then rm -f "$state/site/$4"; fi
        exit 0
        ;;
    list)
        ls "$state/site"
        exit 0
        ;;
    esac
    exit 2
    ;;
*.py)
    if [ -f "$state/bootstrap_fails" ]; then echo "bootstrap exploded" >&2; exit 1; fi
    if [ ! -f "$state/bootstrap_noop" ]; then touch "$state/pip"; fi
    echo "Successfully installed pip"
    exit 0
    ;;
esac
exit 1
"#;

pub(crate) struct FakePython {
    _tmp: tempfile::TempDir,
    root: PathBuf,
    state: PathBuf,
    python: PathBuf,
}

impl FakePython {
    /// Fake interpreter with pip installed and no packages.
    pub fn new() -> Self {
        let fake = Self::without_pip();
        fake.set_flag("pip");
        fake
    }

    pub fn without_pip() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let state = root.join("state");
        std::fs::create_dir_all(state.join("site")).unwrap();
        let python = write_fake_python(&root.join("base").join("bin"), &state);
        Self {
            _tmp: tmp,
            root,
            state,
            python,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn python(&self) -> &Path {
        &self.python
    }

    pub fn runner(&self) -> Runner {
        Runner::new(SearchPath::isolated("/usr/bin:/bin"))
    }

    pub fn pip_config(&self) -> PipConfig {
        PipConfig {
            index_url: "https://index.test/simple".to_string(),
            ..PipConfig::default()
        }
    }

    pub fn env(&self) -> PythonEnv {
        PythonEnv::new(&self.python, self.runner()).with_pip_config(self.pip_config())
    }

    pub fn set_flag(&self, flag: &str) {
        std::fs::write(self.state.join(flag), "").unwrap();
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.state.join(flag).exists()
    }

    pub fn set_version_banner(&self, banner: &str) {
        std::fs::write(self.state.join("version_banner"), banner).unwrap();
    }

    pub fn put_package(&self, name: &str, version: &str) {
        std::fs::write(self.state.join("site").join(name), format!("{}\n", version)).unwrap();
    }

    pub fn package_version(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.state.join("site").join(name))
            .ok()
            .map(|s| s.trim().to_string())
    }

    fn log_lines(&self, file: &str) -> Vec<String> {
        std::fs::read_to_string(self.state.join(file))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    pub fn calls(&self) -> Vec<String> {
        self.log_lines("calls.log")
    }

    pub fn pip_installs(&self) -> Vec<String> {
        self.log_lines("pip_install.log")
    }

    pub fn pip_uninstalls(&self) -> Vec<String> {
        self.log_lines("pip_uninstall.log")
    }
}

fn write_fake_python(bin: &Path, state: &Path) -> PathBuf {
    std::fs::create_dir_all(bin).unwrap();
    let path = bin.join("python3");
    let script = FAKE_PYTHON.replace("@STATE@", &state.display().to_string());
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
