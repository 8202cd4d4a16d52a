//! Progress presentation layer
//!
//! All installer progress goes through the [`Reporter`] trait so the amount of output
//! follows the command-line flags (`--verbose` or quiet by default). Progress lines go
//! to stderr; stdout only carries the final confirmation.

use console::Style;

/// Reporter for installer steps
pub trait Reporter {
    /// Report a completed or starting step with a short label and detail
    fn step(&self, label: &str, detail: &str);
}

/// Verbose reporter that prints each step to stderr
#[derive(Debug, Default)]
pub struct VerboseReporter;

impl Reporter for VerboseReporter {
    fn step(&self, label: &str, detail: &str) {
        eprintln!("{}", format_step(label, detail));
    }
}

/// Silent reporter used without `--verbose`
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn step(&self, _label: &str, _detail: &str) {}
}

/// Pick the reporter for the given verbosity
pub fn reporter(verbose: bool) -> Box<dyn Reporter> {
    if verbose {
        Box::new(VerboseReporter)
    } else {
        Box::new(SilentReporter)
    }
}

fn format_step(label: &str, detail: &str) -> String {
    format!(
        "{} {}",
        Style::new().for_stderr().cyan().bold().apply_to(format!("{label:>12}")),
        detail
    )
}
