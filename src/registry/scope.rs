//! Install location selection and scope resolution

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{InstallError, Result};

/// Environment variables naming an active Python environment, checked in order
const ENV_PREFIX_VARS: &[&str] = &["VIRTUAL_ENV", "CONDA_PREFIX"];

/// Interpreters probed for `sys.prefix` when no environment variable is set
const PYTHON_INTERPRETERS: &[&str] = &["python3", "python"];

/// Location selected on the command line (at most one flag is ever set)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// `--user`
    User,
    /// `--sys-prefix`
    SysPrefix,
    /// `--prefix PATH`, or nothing at all
    Prefix(Option<PathBuf>),
}

/// Registry scope the kernel is installed into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Per-user Jupyter data directory
    User,
    /// `PREFIX/share/jupyter`
    Prefix(PathBuf),
    /// System-wide Jupyter data directory
    System,
}

impl Location {
    /// Resolve to a concrete scope
    ///
    /// An absent or empty prefix falls back to the system-wide registry.
    pub fn resolve(&self) -> Result<Scope> {
        match self {
            Location::User => Ok(Scope::User),
            Location::SysPrefix => Ok(Scope::Prefix(sys_prefix()?)),
            Location::Prefix(Some(prefix)) if !prefix.as_os_str().is_empty() => {
                Ok(Scope::Prefix(prefix.clone()))
            }
            Location::Prefix(_) => Ok(Scope::System),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::User => write!(f, "user"),
            Scope::Prefix(prefix) => write!(f, "prefix {}", prefix.display()),
            Scope::System => write!(f, "system"),
        }
    }
}

/// Prefix of the active Python environment
pub fn sys_prefix() -> Result<PathBuf> {
    for var in ENV_PREFIX_VARS {
        if let Some(value) = env::var_os(var).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(value));
        }
    }

    probe_python()
}

fn probe_python() -> Result<PathBuf> {
    let mut last_error = String::from("no Python interpreter found");

    for interpreter in PYTHON_INTERPRETERS {
        match Command::new(interpreter)
            .args(["-c", "import sys; sys.stdout.write(sys.prefix)"])
            .output()
        {
            Ok(output) if output.status.success() => {
                let prefix = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !prefix.is_empty() {
                    return Ok(PathBuf::from(prefix));
                }
                last_error = format!("{interpreter} reported an empty sys.prefix");
            }
            Ok(output) => last_error = format!("{interpreter} exited with {}", output.status),
            Err(e) => last_error = format!("{interpreter}: {e}"),
        }
    }

    Err(InstallError::SysPrefixUnavailable { reason: last_error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_user() {
        assert_eq!(Location::User.resolve().unwrap(), Scope::User);
    }

    #[test]
    fn test_resolve_explicit_prefix() {
        let scope = Location::Prefix(Some(PathBuf::from("/opt/env")))
            .resolve()
            .unwrap();
        assert_eq!(scope, Scope::Prefix(PathBuf::from("/opt/env")));
    }

    #[test]
    fn test_resolve_missing_prefix_is_system() {
        assert_eq!(Location::Prefix(None).resolve().unwrap(), Scope::System);
    }

    #[test]
    fn test_resolve_empty_prefix_is_system() {
        let scope = Location::Prefix(Some(PathBuf::new())).resolve().unwrap();
        assert_eq!(scope, Scope::System);
    }

    #[test]
    #[serial]
    fn test_resolve_sys_prefix_from_virtual_env() {
        let temp = TempDir::new().unwrap();
        let original = env::var_os("VIRTUAL_ENV");
        unsafe {
            env::set_var("VIRTUAL_ENV", temp.path());
        }

        let scope = Location::SysPrefix.resolve();

        unsafe {
            match original {
                Some(o) => env::set_var("VIRTUAL_ENV", o),
                None => env::remove_var("VIRTUAL_ENV"),
            }
        }
        assert_eq!(scope.unwrap(), Scope::Prefix(temp.path().to_path_buf()));
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::User.to_string(), "user");
        assert_eq!(Scope::System.to_string(), "system");
        assert!(
            Scope::Prefix(PathBuf::from("/opt/env"))
                .to_string()
                .starts_with("prefix ")
        );
    }
}
