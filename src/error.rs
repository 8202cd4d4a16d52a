//! Error types and handling for the kernel installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Usage and validation errors never reach this type: clap reports those itself
//! before any filesystem work starts.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallError {
    // Registry errors
    #[error("Kernel source directory not found: {path}")]
    #[diagnostic(
        code(ijava::registry::source_not_found),
        help("Pass --kernel-source or set IJAVA_KERNEL_SOURCE to the directory containing kernel.json")
    )]
    SourceNotFound { path: String },

    #[error("Invalid kernel name: {name}")]
    #[diagnostic(
        code(ijava::registry::invalid_name),
        help("Kernel names may only contain ASCII letters, digits, '.', '_' and '-'")
    )]
    InvalidKernelName { name: String },

    #[error("A kernel spec already exists at {path}")]
    #[diagnostic(
        code(ijava::registry::already_installed),
        help("Re-run with --replace to overwrite the existing kernel spec")
    )]
    AlreadyInstalled { path: String },

    #[error("Failed to copy kernel files into {path}: {reason}")]
    #[diagnostic(code(ijava::registry::copy_failed))]
    CopyFailed { path: String, reason: String },

    #[error("Could not determine the Jupyter data directory")]
    #[diagnostic(
        code(ijava::registry::no_data_dir),
        help("Set JUPYTER_DATA_DIR or use --prefix")
    )]
    DataDirUnavailable,

    #[error("Could not determine the Python environment prefix: {reason}")]
    #[diagnostic(
        code(ijava::registry::no_sys_prefix),
        help("Activate the environment (VIRTUAL_ENV/CONDA_PREFIX) or use --prefix")
    )]
    SysPrefixUnavailable { reason: String },

    #[error("Install path is not valid UTF-8: {path}")]
    #[diagnostic(code(ijava::registry::non_utf8_path))]
    NonUtf8Path { path: String },

    // Template errors
    #[error("Failed to read kernel template: {path}")]
    #[diagnostic(code(ijava::template::read_failed))]
    TemplateReadFailed { path: String, reason: String },

    #[error("Kernel template is not valid JSON after substitution: {path}: {reason}")]
    #[diagnostic(
        code(ijava::template::parse_failed),
        help("The template or the install path produced malformed JSON; the kernel files were copied but kernel.json was not patched")
    )]
    TemplateParseFailed { path: String, reason: String },

    #[error("Invalid kernel descriptor: {message}")]
    #[diagnostic(code(ijava::template::invalid_descriptor))]
    InvalidDescriptor { message: String },

    #[error("Failed to write kernel descriptor: {path}")]
    #[diagnostic(code(ijava::template::write_failed))]
    DescriptorWriteFailed { path: String, reason: String },
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallError>;
