//! CLI definitions using clap derive API

use clap::builder::{OsStringValueParser, Styles, TypedValueParser, styling::AnsiColor};
use clap::{ArgAction, ArgGroup, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::options::{self, EnvOverrides, OptionDef, normalize};
use crate::registry::Location;

/// IJava kernel installer
///
/// Install the Java kernel spec into a Jupyter kernel registry.
#[derive(Parser, Debug)]
#[command(
    name = "ijava-install",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install the java kernel.",
    group(ArgGroup::new("location").args(["user", "sys_prefix", "prefix"])),
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  ijava-install --user                               \x1b[90m# Per-user registry\x1b[0m\n   \
                  ijava-install --sys-prefix --replace               \x1b[90m# Active Python environment\x1b[0m\n   \
                  ijava-install --prefix /opt/jupyter                \x1b[90m# Explicit prefix\x1b[0m\n   \
                  ijava-install --user --classpath 'lib/*' --timeout NO_TIMEOUT\n"
)]
pub struct Cli {
    /// Install to the per-user kernel registry.
    #[arg(long)]
    pub user: bool,

    /// Install to Python's sys.prefix. Useful in conda/virtual environments.
    #[arg(long)]
    pub sys_prefix: bool,

    /// Specify a prefix to install to, e.g. an env.
    /// The kernelspec will be installed in PREFIX/share/jupyter/kernels/
    /// An empty PREFIX selects the system-wide registry.
    #[arg(
        long,
        value_name = "PREFIX",
        value_parser = OsStringValueParser::new().map(PathBuf::from),
    )]
    pub prefix: Option<PathBuf>,

    /// Replace any existing kernel spec with this name.
    #[arg(long)]
    pub replace: bool,

    /// A file path separator delimited list of classpath entries that should be available
    /// to the user code. **Important:** no matter what OS, this should use forward slash "/"
    /// as the file separator. Also each path may actually be a simple glob.
    #[arg(
        long,
        value_name = "CLASSPATH",
        action = ArgAction::Append,
        value_parser = normalize::parse_classpath,
    )]
    pub classpath: Vec<String>,

    /// A space delimited list of command line options that would be passed to the `javac`
    /// command when compiling a project. For example `-parameters` to enable retaining
    /// parameter names for reflection.
    #[arg(
        long,
        value_name = "COMP_OPTS",
        action = ArgAction::Append,
        allow_hyphen_values = true,
        value_parser = normalize::parse_compiler_opts,
    )]
    pub comp_opts: Vec<String>,

    /// A file path separator delimited list of `.jshell` scripts to run on startup. This
    /// includes ijava-jshell-init.jshell and ijava-display-init.jshell. **Important:** no
    /// matter what OS, this should use forward slash "/" as the file separator. Also each
    /// path may actually be a simple glob.
    #[arg(
        long,
        value_name = "STARTUP_SCRIPTS_PATH",
        action = ArgAction::Append,
        value_parser = normalize::parse_startup_scripts_path,
    )]
    pub startup_scripts_path: Vec<String>,

    /// A block of java code to run when the kernel starts up. This may be something like
    /// `import my.utils;` to setup some default imports or a default utility method to use
    /// in the notebook.
    #[arg(
        long,
        value_name = "STARTUP_SCRIPT",
        action = ArgAction::Append,
        value_parser = normalize::parse_startup_script,
    )]
    pub startup_script: Vec<String>,

    /// A duration specifying a timeout (in milliseconds by default) for a single top level
    /// statement. If less than `1` then there is no timeout. A `TimeUnit` may follow the
    /// number (ex `"30 SECONDS"`). `NO_TIMEOUT` is an alias for `-1`.
    #[arg(
        long,
        value_name = "TIMEOUT",
        action = ArgAction::Append,
        allow_negative_numbers = true,
        value_parser = normalize::parse_timeout,
    )]
    pub timeout: Vec<String>,

    /// Directory holding the kernel files to install (must contain kernel.json)
    #[arg(long, value_name = "DIR", env = "IJAVA_KERNEL_SOURCE")]
    pub kernel_source: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// The install location selected by the mutually exclusive location flags
    pub fn location(&self) -> Location {
        if self.user {
            Location::User
        } else if self.sys_prefix {
            Location::SysPrefix
        } else {
            Location::Prefix(self.prefix.clone())
        }
    }

    /// Every kernel parameter occurrence as `(option, normalized value)`
    ///
    /// Occurrences of the same flag keep their command line order. Each flag owns a
    /// distinct environment variable, so ordering across flags does not matter.
    pub fn occurrences(&self) -> Vec<(&'static OptionDef, String)> {
        options::OPTIONS
            .iter()
            .flat_map(|&option| {
                self.values_for(option)
                    .iter()
                    .map(move |value| (option, value.clone()))
            })
            .collect()
    }

    fn values_for(&self, option: &OptionDef) -> &[String] {
        match option.flag {
            "classpath" => &self.classpath,
            "comp-opts" => &self.comp_opts,
            "startup-scripts-path" => &self.startup_scripts_path,
            "startup-script" => &self.startup_script,
            "timeout" => &self.timeout,
            _ => &[],
        }
    }

    /// Accumulated environment overrides for the descriptor
    pub fn env_overrides(&self) -> EnvOverrides {
        options::fold(self.occurrences())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PATH_SEPARATOR;
    use crate::registry::Scope;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["ijava-install"]).unwrap();
        assert!(!cli.user);
        assert!(!cli.sys_prefix);
        assert!(!cli.replace);
        assert_eq!(cli.prefix, None);
        assert_eq!(cli.location(), Location::Prefix(None));
        assert!(cli.env_overrides().is_empty());
    }

    #[test]
    fn test_cli_user_location() {
        let cli = Cli::try_parse_from(["ijava-install", "--user"]).unwrap();
        assert_eq!(cli.location(), Location::User);
    }

    #[test]
    fn test_cli_sys_prefix_location() {
        let cli = Cli::try_parse_from(["ijava-install", "--sys-prefix", "--replace"]).unwrap();
        assert_eq!(cli.location(), Location::SysPrefix);
        assert!(cli.replace);
    }

    #[test]
    fn test_cli_prefix_location() {
        let cli = Cli::try_parse_from(["ijava-install", "--prefix", "/opt/env"]).unwrap();
        assert_eq!(
            cli.location(),
            Location::Prefix(Some(PathBuf::from("/opt/env")))
        );
    }

    #[test]
    fn test_cli_empty_prefix_is_accepted() {
        let cli = Cli::try_parse_from(["ijava-install", "--prefix", ""]).unwrap();
        assert_eq!(cli.location(), Location::Prefix(Some(PathBuf::new())));
        assert_eq!(cli.location().resolve().unwrap(), Scope::System);
    }

    #[test]
    fn test_cli_location_flags_conflict() {
        for args in [
            vec!["ijava-install", "--user", "--sys-prefix"],
            vec!["ijava-install", "--user", "--prefix", "/opt"],
            vec!["ijava-install", "--sys-prefix", "--prefix", "/opt"],
        ] {
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        }
    }

    #[test]
    fn test_cli_classpath_accumulates() {
        let cli = Cli::try_parse_from([
            "ijava-install",
            "--classpath",
            "a.jar",
            "--classpath",
            "b.jar",
        ])
        .unwrap();
        let env = cli.env_overrides();
        assert_eq!(env["IJAVA_CLASSPATH"], format!("a.jar{PATH_SEPARATOR}b.jar"));
    }

    #[test]
    fn test_cli_comp_opts_accepts_hyphen_values() {
        let cli = Cli::try_parse_from([
            "ijava-install",
            "--comp-opts",
            "-parameters",
            "--comp-opts",
            "-g",
        ])
        .unwrap();
        assert_eq!(cli.env_overrides()["IJAVA_COMPILER_OPTS"], "-parameters -g");
    }

    #[test]
    fn test_cli_timeout_alias_and_last_wins() {
        let cli = Cli::try_parse_from([
            "ijava-install",
            "--timeout",
            "5000",
            "--timeout",
            "NO_TIMEOUT",
        ])
        .unwrap();
        assert_eq!(cli.env_overrides()["IJAVA_TIMEOUT"], "-1");
    }

    #[test]
    fn test_cli_timeout_negative_number() {
        let cli = Cli::try_parse_from(["ijava-install", "--timeout", "-1"]).unwrap();
        assert_eq!(cli.env_overrides()["IJAVA_TIMEOUT"], "-1");
    }

    #[test]
    fn test_cli_timeout_unit_without_space() {
        for value in ["30SECONDS", "30-SECONDS"] {
            let cli = Cli::try_parse_from(["ijava-install", "--timeout", value]).unwrap();
            assert_eq!(cli.env_overrides()["IJAVA_TIMEOUT"], value);
        }
    }

    #[test]
    fn test_cli_timeout_rejects_plus_sign() {
        let err = Cli::try_parse_from(["ijava-install", "--timeout", "+5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_timeout_validation_error() {
        let err = Cli::try_parse_from(["ijava-install", "--timeout", "later"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("--timeout"));
    }

    #[test]
    fn test_cli_startup_script_verbatim() {
        let script = "void sleep(long t) { try { Thread.sleep(t); } catch (Exception e) {} }";
        let cli = Cli::try_parse_from(["ijava-install", "--startup-script", script]).unwrap();
        assert_eq!(cli.env_overrides()["IJAVA_STARTUP_SCRIPT"], script);
    }

    #[test]
    fn test_cli_missing_value() {
        let err = Cli::try_parse_from(["ijava-install", "--classpath"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_cli_unknown_flag() {
        let err = Cli::try_parse_from(["ijava-install", "--jvm"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_every_option_has_a_flag() {
        let cli = Cli::try_parse_from([
            "ijava-install",
            "--classpath",
            "a",
            "--comp-opts",
            "b",
            "--startup-scripts-path",
            "c",
            "--startup-script",
            "d",
            "--timeout",
            "1",
        ])
        .unwrap();
        assert_eq!(cli.env_overrides().len(), options::OPTIONS.len());
    }

    #[test]
    fn test_cli_option_flags_match_long_names() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        for option in options::OPTIONS {
            assert!(
                cmd.get_arguments()
                    .any(|arg| arg.get_long() == Some(option.flag)),
                "no --{} argument",
                option.flag
            );
        }
    }

    #[test]
    fn test_cli_no_positional_arguments() {
        assert!(Cli::try_parse_from(["ijava-install", "a.jar"]).is_err());
    }

    #[test]
    fn test_cli_completions_shell() {
        let cli = Cli::try_parse_from(["ijava-install", "--completions", "bash"]).unwrap();
        assert_eq!(cli.completions, Some(Shell::Bash));
    }

    #[test]
    fn test_cli_verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
