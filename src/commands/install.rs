//! Install command implementation
//!
//! Resolves the install scope and the bundled kernel directory from the command
//! line, then hands off to the [`Installer`].

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::Result;
use crate::installer::{InstallRequest, Installer};
use crate::registry::{JupyterRegistry, KERNEL_NAME};
use crate::ui;

/// Directory name of the bundled kernel next to the executable
const BUNDLED_KERNEL_DIR: &str = "java";

/// Run the install command
pub fn run(cli: &Cli) -> Result<()> {
    let reporter = ui::reporter(cli.verbose);

    let scope = cli.location().resolve()?;
    let request = InstallRequest {
        source_dir: kernel_source_dir(cli.kernel_source.as_deref()),
        kernel_name: KERNEL_NAME.to_string(),
        scope,
        replace: cli.replace,
        env: cli.env_overrides(),
    };

    let install_dir = Installer::new(&JupyterRegistry, reporter.as_ref()).install(&request)?;

    println!(
        "Installed {KERNEL_NAME} kernel into \"{}\"",
        install_dir.display()
    );

    Ok(())
}

/// Locate the bundled kernel directory
///
/// An explicit path wins. Otherwise `java/` next to the executable, then the copy
/// shipped in this crate's `resources/` for development builds.
fn kernel_source_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(BUNDLED_KERNEL_DIR)))
        .filter(|dir| dir.is_dir());

    beside_exe.unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("resources")
            .join(BUNDLED_KERNEL_DIR)
    })
}
