//! Kernel parameter definitions
//!
//! Every environment variable the installer can write into `kernel.json` is declared
//! here exactly once, together with the flag that sets it, its value aliases, and how
//! repeated occurrences are combined.
//!
//! - [`normalize`]: alias substitution and value validation
//! - [`accumulate`]: folding flag occurrences into final environment values

pub mod accumulate;
pub mod normalize;

pub use accumulate::{EnvOverrides, fold};

/// Platform path-list separator (`:` on Unix, `;` on Windows)
#[cfg(windows)]
pub const PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const PATH_SEPARATOR: &str = ":";

/// How repeated occurrences of a list-valued flag are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// The host OS path-list separator
    PathList,
    /// A single space
    Space,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::PathList => PATH_SEPARATOR,
            Separator::Space => " ",
        }
    }
}

/// Format check applied to a value after alias substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Any string
    Text,
    /// Whole number, optionally followed by a time unit name
    Duration,
}

/// A single kernel parameter that maps one flag to one environment variable
#[derive(Debug)]
pub struct OptionDef {
    /// Long flag name without the leading dashes
    pub flag: &'static str,
    /// Environment variable written into the descriptor's `env` object
    pub env_var: &'static str,
    /// Display value to canonical value substitutions
    pub aliases: &'static [(&'static str, &'static str)],
    /// Join separator for repeatable flags; `None` means last occurrence wins
    pub separator: Option<Separator>,
    pub kind: ValueKind,
}

impl OptionDef {
    /// Substitute the canonical value if `raw` is a known alias
    pub fn resolve_alias<'a>(&self, raw: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == raw)
            .map_or(raw, |(_, canonical)| *canonical)
    }
}

pub static CLASSPATH: OptionDef = OptionDef {
    flag: "classpath",
    env_var: "IJAVA_CLASSPATH",
    aliases: &[],
    separator: Some(Separator::PathList),
    kind: ValueKind::Text,
};

pub static COMPILER_OPTS: OptionDef = OptionDef {
    flag: "comp-opts",
    env_var: "IJAVA_COMPILER_OPTS",
    aliases: &[],
    separator: Some(Separator::Space),
    kind: ValueKind::Text,
};

pub static STARTUP_SCRIPTS_PATH: OptionDef = OptionDef {
    flag: "startup-scripts-path",
    env_var: "IJAVA_STARTUP_SCRIPTS_PATH",
    aliases: &[],
    separator: Some(Separator::PathList),
    kind: ValueKind::Text,
};

pub static STARTUP_SCRIPT: OptionDef = OptionDef {
    flag: "startup-script",
    env_var: "IJAVA_STARTUP_SCRIPT",
    aliases: &[],
    separator: None,
    kind: ValueKind::Text,
};

pub static TIMEOUT: OptionDef = OptionDef {
    flag: "timeout",
    env_var: "IJAVA_TIMEOUT",
    aliases: &[("NO_TIMEOUT", "-1")],
    separator: None,
    kind: ValueKind::Duration,
};

/// All kernel parameters, in help order
pub static OPTIONS: [&OptionDef; 5] = [
    &CLASSPATH,
    &COMPILER_OPTS,
    &STARTUP_SCRIPTS_PATH,
    &STARTUP_SCRIPT,
    &TIMEOUT,
];
