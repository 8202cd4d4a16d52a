//! Value normalization for kernel parameter flags
//!
//! The `parse_*` functions are wired into clap as value parsers, so an invalid value
//! is reported as a usage error naming the offending flag before anything is installed.

use thiserror::Error;

use super::{
    CLASSPATH, COMPILER_OPTS, OptionDef, STARTUP_SCRIPT, STARTUP_SCRIPTS_PATH, TIMEOUT, ValueKind,
};

/// `java.util.concurrent.TimeUnit` names accepted after a timeout amount
const TIME_UNITS: &[&str] = &[
    "NANOSECONDS",
    "MICROSECONDS",
    "MILLISECONDS",
    "SECONDS",
    "MINUTES",
    "HOURS",
    "DAYS",
];

/// A flag value rejected by its option's format check
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValueError {
    #[error("'{value}' is not a duration; expected a whole number optionally followed by a time unit (e.g. 5000, -1, \"30 SECONDS\", 30SECONDS)")]
    InvalidDuration { value: String },

    #[error("unknown time unit '{unit}'; expected one of {expected}", expected = TIME_UNITS.join(", "))]
    UnknownTimeUnit { unit: String },
}

/// Substitute aliases and validate a raw flag value
///
/// Returns the substituted value, which is what ends up in the descriptor.
pub fn normalize(option: &OptionDef, raw: &str) -> Result<String, ValueError> {
    let value = option.resolve_alias(raw);
    validate(option.kind, value)?;
    Ok(value.to_string())
}

fn validate(kind: ValueKind, value: &str) -> Result<(), ValueError> {
    match kind {
        ValueKind::Text => Ok(()),
        ValueKind::Duration => validate_duration(value),
    }
}

/// Mirrors the kernel's duration grammar: an optionally negative run of digits, any
/// non-word characters, then an optional alphabetic time unit.
fn validate_duration(value: &str) -> Result<(), ValueError> {
    let invalid = || ValueError::InvalidDuration {
        value: value.to_string(),
    };

    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_len == 0 {
        return Err(invalid());
    }

    let amount_len = value.len() - unsigned.len() + digits_len;
    if value[..amount_len].parse::<i64>().is_err() {
        return Err(invalid());
    }

    let unit = value[amount_len..].trim_start_matches(|c: char| !is_word_char(c));
    if unit.is_empty() {
        return Ok(());
    }
    if !unit.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    if !TIME_UNITS.iter().any(|known| known.eq_ignore_ascii_case(unit)) {
        return Err(ValueError::UnknownTimeUnit {
            unit: unit.to_string(),
        });
    }

    Ok(())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn parse_classpath(raw: &str) -> Result<String, ValueError> {
    normalize(&CLASSPATH, raw)
}

pub fn parse_compiler_opts(raw: &str) -> Result<String, ValueError> {
    normalize(&COMPILER_OPTS, raw)
}

pub fn parse_startup_scripts_path(raw: &str) -> Result<String, ValueError> {
    normalize(&STARTUP_SCRIPTS_PATH, raw)
}

pub fn parse_startup_script(raw: &str) -> Result<String, ValueError> {
    normalize(&STARTUP_SCRIPT, raw)
}

pub fn parse_timeout(raw: &str) -> Result<String, ValueError> {
    normalize(&TIMEOUT, raw)
}
