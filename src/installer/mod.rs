//! Kernel installation driver
//!
//! The installation process:
//! 1. Copy the kernel directory into the registry for the resolved scope
//! 2. Read the bundled `kernel.json` template
//! 3. Substitute the install directory token
//! 4. Merge environment overrides into `env`
//! 5. Overwrite the installed `kernel.json` with sorted, indented JSON
//!
//! Nothing is rolled back: a failure after step 1 leaves the copied files in place
//! with the unpatched template descriptor.

pub mod descriptor;

use std::path::PathBuf;

use crate::error::Result;
use crate::options::EnvOverrides;
use crate::registry::{KernelRegistry, Scope};
use crate::ui::Reporter;

/// Everything needed for one installation
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Bundled kernel directory containing the `kernel.json` template
    pub source_dir: PathBuf,
    pub kernel_name: String,
    pub scope: Scope,
    pub replace: bool,
    pub env: EnvOverrides,
}

/// Drives a registry install and patches the installed descriptor
pub struct Installer<'a, R: KernelRegistry> {
    registry: &'a R,
    reporter: &'a dyn Reporter,
}

impl<'a, R: KernelRegistry> Installer<'a, R> {
    pub fn new(registry: &'a R, reporter: &'a dyn Reporter) -> Self {
        Self { registry, reporter }
    }

    /// Run the installation and return the absolute install path
    pub fn install(&self, request: &InstallRequest) -> Result<PathBuf> {
        self.reporter.step("Scope", &request.scope.to_string());
        self.reporter
            .step("Source", &request.source_dir.display().to_string());

        let install_dir = self.registry.install(
            &request.source_dir,
            &request.kernel_name,
            &request.scope,
            request.replace,
        )?;
        self.reporter
            .step("Copied", &install_dir.display().to_string());

        let template_path = request.source_dir.join(descriptor::DESCRIPTOR_FILE);
        let patched = descriptor::render(&template_path, &install_dir, &request.env)?;

        for (key, value) in &request.env {
            self.reporter.step("Env", &format!("{key}={value}"));
        }

        let installed_path = install_dir.join(descriptor::DESCRIPTOR_FILE);
        descriptor::write(&installed_path, &patched)?;
        self.reporter
            .step("Patched", &installed_path.display().to_string());

        Ok(install_dir)
    }
}
