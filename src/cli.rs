use crate::config::{Mode, RunConfig};
use crate::interpreter::DEFAULT_MAX_CALL_DEPTH;
use clap::Parser;
use crossterm::tty::IsTty;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run, check and translate PLC programs", long_about = None)]
pub struct Args {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(short, long, value_name = "MODE", default_value = "run")]
    pub mode: Mode,

    /// Run without the static type checker
    #[arg(long = "no-analyze")]
    pub no_analyze: bool,

    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Deepest nesting of function calls before the run is stopped
    #[arg(long = "max-depth", value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    pub max_depth: usize,

    /// Raise the log level (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "Invalid color choice: {}. Must be 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

impl RunConfig {
    pub fn from_args(args: &Args) -> Self {
        let color = match args.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_tty(),
        };

        RunConfig {
            mode: args.mode,
            analyze: !args.no_analyze,
            capture_output: false,
            color,
            verbosity: args.verbose,
            max_call_depth: args.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from(["plc", "-m", "java", "--no-analyze", "--color", "never", "-vv", "prog.plc"]).unwrap();
        let config = RunConfig::from_args(&args);

        assert_eq!(args.file, PathBuf::from("prog.plc"));
        assert_eq!(config.mode, Mode::Java);
        assert!(!config.analyze);
        assert!(!config.color);
        assert_eq!(config.log_level(), "trace");
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["plc", "prog.plc"]).unwrap();
        assert_eq!(args.mode, Mode::Run);
        assert_eq!(args.color, ColorChoice::Auto);
        assert_eq!(args.verbose, 0);
        assert_eq!(args.max_depth, DEFAULT_MAX_CALL_DEPTH);
    }

    #[test]
    fn test_max_depth() {
        let args = Args::try_parse_from(["plc", "--max-depth", "40", "prog.plc"]).unwrap();
        assert_eq!(RunConfig::from_args(&args).max_call_depth, 40);
        assert!(Args::try_parse_from(["plc", "--max-depth", "deep", "prog.plc"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Args::try_parse_from(["plc", "-m", "compile", "prog.plc"]).is_err());
    }
}
