//! Jupyter kernel registry
//!
//! Copies a kernel directory into the registry for a given scope and reports where
//! it landed. The installer only talks to the [`KernelRegistry`] trait, so the OS
//! specific path rules stay in this module.

pub mod paths;
pub mod scope;

pub use scope::{Location, Scope};

use std::path::{Path, PathBuf};

use crate::common::fs::{copy_dir_recursive, remove_path};
use crate::error::{InstallError, Result};

/// Registry name the Java kernel is installed under
pub const KERNEL_NAME: &str = "java";

/// A kernel registry that can receive kernel spec directories
pub trait KernelRegistry {
    /// Copy `source_dir` into the registry as `kernel_name` and return the absolute
    /// install path.
    fn install(
        &self,
        source_dir: &Path,
        kernel_name: &str,
        scope: &Scope,
        replace: bool,
    ) -> Result<PathBuf>;
}

/// The on-disk Jupyter registry
#[derive(Debug, Default, Clone, Copy)]
pub struct JupyterRegistry;

impl KernelRegistry for JupyterRegistry {
    fn install(
        &self,
        source_dir: &Path,
        kernel_name: &str,
        scope: &Scope,
        replace: bool,
    ) -> Result<PathBuf> {
        let name = validate_kernel_name(kernel_name)?;

        if !source_dir.is_dir() {
            return Err(InstallError::SourceNotFound {
                path: source_dir.display().to_string(),
            });
        }

        let destination = paths::kernels_dir(scope)?.join(name);

        if destination.exists() {
            if !replace {
                return Err(InstallError::AlreadyInstalled {
                    path: destination.display().to_string(),
                });
            }
            remove_path(&destination).map_err(|e| InstallError::CopyFailed {
                path: destination.display().to_string(),
                reason: format!("could not remove existing kernel spec: {e}"),
            })?;
        }

        copy_dir_recursive(source_dir, &destination).map_err(|e| InstallError::CopyFailed {
            path: destination.display().to_string(),
            reason: e.to_string(),
        })?;

        dunce::canonicalize(&destination).map_err(|e| InstallError::CopyFailed {
            path: destination.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Check a kernel name and return its lower-cased registry form
pub fn validate_kernel_name(name: &str) -> Result<String> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(name.to_ascii_lowercase())
    } else {
        Err(InstallError::InvalidKernelName {
            name: name.to_string(),
        })
    }
}
