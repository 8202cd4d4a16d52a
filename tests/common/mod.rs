//! Common test utilities for installer integration tests

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak the developer's Python env into a test
const PYTHON_ENV_VARS: &[&str] = &["VIRTUAL_ENV", "CONDA_PREFIX"];

/// An isolated Jupyter data directory plus scratch space
pub struct TestEnv {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Root of the scratch space
    pub path: PathBuf,
}

impl TestEnv {
    /// Create a new test environment
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Per-user Jupyter data directory used through `JUPYTER_DATA_DIR`
    pub fn data_dir(&self) -> PathBuf {
        self.path.join("jupyter-data")
    }

    /// Where a `--user` install of the java kernel lands
    pub fn user_kernel_dir(&self) -> PathBuf {
        self.data_dir().join("kernels").join("java")
    }

    /// Where a `--prefix` install of the java kernel lands
    #[allow(dead_code)]
    pub fn prefix_kernel_dir(prefix: &Path) -> PathBuf {
        prefix
            .join("share")
            .join("jupyter")
            .join("kernels")
            .join("java")
    }

    /// Write a kernel source directory with the given `kernel.json` template
    #[allow(dead_code)]
    pub fn create_kernel_source(&self, template: &str) -> PathBuf {
        let source = self.path.join("source").join("java");
        std::fs::create_dir_all(&source).expect("Failed to create kernel source");
        std::fs::write(source.join("kernel.json"), template).expect("Failed to write template");
        source
    }

    /// Parse an installed `kernel.json`
    #[allow(dead_code)]
    pub fn read_descriptor(kernel_dir: &Path) -> serde_json::Value {
        let text = Self::read_descriptor_text(kernel_dir);
        serde_json::from_str(&text).expect("Installed kernel.json is not valid JSON")
    }

    /// Raw text of an installed `kernel.json`
    #[allow(dead_code)]
    pub fn read_descriptor_text(kernel_dir: &Path) -> String {
        std::fs::read_to_string(kernel_dir.join("kernel.json"))
            .expect("Failed to read installed kernel.json")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// The bundled kernel directory shipped with the crate
pub fn bundled_kernel_source() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join("java")
}

#[allow(deprecated)]
pub fn ijava_cmd() -> Command {
    Command::cargo_bin("ijava-install").expect("Failed to find ijava-install binary")
}

/// Command isolated to `env`: user installs go to its data dir and the bundled
/// kernel source is used unless a test overrides it.
pub fn ijava_cmd_for(env: &TestEnv) -> Command {
    let mut cmd = ijava_cmd();
    cmd.env("JUPYTER_DATA_DIR", env.data_dir())
        .env("IJAVA_KERNEL_SOURCE", bundled_kernel_source());
    for var in PYTHON_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Host path-list separator
#[allow(dead_code)]
pub fn path_separator() -> &'static str {
    if cfg!(windows) { ";" } else { ":" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creation() {
        let env = TestEnv::new();
        assert!(env.path.exists());
        assert!(!env.user_kernel_dir().exists());
    }

    #[test]
    fn test_bundled_kernel_source_has_template() {
        assert!(bundled_kernel_source().join("kernel.json").is_file());
    }
}
