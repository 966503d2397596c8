// Run configuration shared by the library and the `plc` binary

use crate::interpreter::DEFAULT_MAX_CALL_DEPTH;
use std::fmt;

/// What the driver does with a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Analyze (unless disabled) and run `main`
    #[default]
    Run,
    /// Parse and analyze only
    Check,
    /// Print the generated Java class
    Java,
    /// Print the program in canonical layout
    Fmt,
    /// Print the token stream
    Tokens,
    /// Print the parsed AST
    Ast,
}

impl Mode {
    pub const ALL: [Mode; 6] = [Mode::Run, Mode::Check, Mode::Java, Mode::Fmt, Mode::Tokens, Mode::Ast];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Run => "run",
            Mode::Check => "check",
            Mode::Java => "java",
            Mode::Fmt => "fmt",
            Mode::Tokens => "tokens",
            Mode::Ast => "ast",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == lowered)
            .ok_or_else(|| format!("Invalid mode: {}. Must be one of run, check, java, fmt, tokens, ast", s))
    }
}

/// Options for [`run_source`](crate::run_source) and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: Mode,
    /// Run the static analyzer before interpreting
    pub analyze: bool,
    /// Keep `print` output in memory instead of writing it to stdout
    pub capture_output: bool,
    /// Colour diagnostics
    pub color: bool,
    /// 0 = warnings, 1 = debug, 2 and up = trace
    pub verbosity: u8,
    /// Deepest nesting of user function calls before the run fails
    pub max_call_depth: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            mode: Mode::Run,
            analyze: true,
            capture_output: false,
            color: false,
            verbosity: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl RunConfig {
    /// Analyze and run, collecting `print` output.
    pub fn captured() -> Self {
        RunConfig {
            capture_output: true,
            ..Self::default()
        }
    }

    /// `tracing` filter directive for the configured verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>(), Ok(mode));
        }
        assert_eq!("JAVA".parse::<Mode>(), Ok(Mode::Java));
        assert!("compile".parse::<Mode>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert!(config.analyze);
        assert!(!config.capture_output);
        assert!(RunConfig::captured().capture_output);
        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    }
}
