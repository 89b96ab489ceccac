//! Command builder: program + argument list, built without running.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::process::Command;

/// An executable invocation. Nothing is validated here; a missing program only
/// surfaces when the invocation is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_string_lossy().into_owned(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Directory component of the program, e.g. `/venv/bin` for `/venv/bin/python3`.
    /// `None` for bare names resolved through the search path.
    pub fn program_dir(&self) -> Option<&Path> {
        Path::new(&self.program)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Direct (shell-less) process for this invocation.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Renders the shell-quoted command line handed to the shell executor.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.program))?;
        for arg in &self.args {
            f.write_str(" ")?;
            f.write_str(&quote(arg))?;
        }
        Ok(())
    }
}

#[cfg(not(windows))]
fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '=' | '@' | '%' | '+' | ',')
}

#[cfg(windows)]
fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '_' | '-' | '.' | '/' | '\\' | ':' | '=' | '@' | '+' | ',')
}

/// Quote one word for the platform shell. Plain words are returned as-is.
#[cfg(not(windows))]
pub fn quote(word: &str) -> Cow<'_, str> {
    if !word.is_empty() && word.chars().all(is_plain) {
        return Cow::Borrowed(word);
    }
    Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
}

/// Quote one word for the platform shell. Plain words are returned as-is.
#[cfg(windows)]
pub fn quote(word: &str) -> Cow<'_, str> {
    if !word.is_empty() && word.chars().all(is_plain) {
        return Cow::Borrowed(word);
    }
    Cow::Owned(format!("\"{}\"", word.replace('"', "\\\"")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_dir() {
        let inv = Invocation::new("/opt/venv/bin/python3");
        assert_eq!(inv.program_dir(), Some(Path::new("/opt/venv/bin")));
        assert_eq!(Invocation::new("python3").program_dir(), None);
    }

    #[test]
    fn test_builder_keeps_argument_order() {
        let inv = Invocation::new("python3")
            .arg("-m")
            .args(["pip", "install", "requests==2.31.0"]);
        assert_eq!(inv.program(), "python3");
        assert_eq!(inv.get_args(), ["-m", "pip", "install", "requests==2.31.0"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_display_quotes_only_when_needed() {
        let inv = Invocation::new("/opt/my venv/bin/python3")
            .arg("-c")
            .arg("import funppy; print(funppy.__version__)")
            .arg("--index-url")
            .arg("https://pypi.org/simple");
        assert_eq!(
            inv.to_string(),
            "'/opt/my venv/bin/python3' -c 'import funppy; print(funppy.__version__)' --index-url https://pypi.org/simple"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_quote_single_quote_and_empty() {
        assert_eq!(quote("it's"), r"'it'\''s'");
        assert_eq!(quote(""), "''");
    }
}
