// plc: run, check and translate PLC programs

use std::fmt::Write as _;
use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plc::cli::Args;
use plc::diagnostic::DiagnosticRenderer;
use plc::{Mode, RunConfig};

fn main() -> ExitCode {
    let args = Args::parse();
    let config = RunConfig::from_args(&args);
    init_tracing(&config);

    match run(&args, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so program output on stdout stays clean. `RUST_LOG` is
/// honoured unless `-v` was given.
fn init_tracing(config: &RunConfig) {
    let filter = match config.verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        _ => EnvFilter::new(config.log_level()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.color)
        .init();
}

fn run(args: &Args, config: &RunConfig) -> anyhow::Result<ExitCode> {
    let file_name = args.file.display().to_string();
    let source = fs::read_to_string(&args.file).with_context(|| format!("could not read '{file_name}'"))?;
    tracing::debug!(file = %file_name, mode = %config.mode, "starting");

    match execute(&source, config) {
        Ok(output) => {
            print!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let renderer = DiagnosticRenderer::new(&source, &file_name, config.color);
            eprint!("{}", renderer.render(&error));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Run the selected mode and return what should go to stdout.
fn execute(source: &str, config: &RunConfig) -> Result<String, plc::Error> {
    let mut output = String::new();

    match config.mode {
        Mode::Run => {
            // print output streams to stdout while the program runs
            let outcome = plc::run_source(source, config)?;
            let _ = writeln!(output, "=> {}", outcome.value);
        }
        Mode::Check => {
            let program = plc::check_source(source)?;
            let _ = writeln!(
                output,
                "ok: {} global(s), {} function(s)",
                program.globals.len(),
                program.functions.len()
            );
        }
        Mode::Java => output = plc::emit_java(source)?,
        Mode::Fmt => output = plc::format_source(source)?,
        Mode::Tokens => {
            for token in plc::lex(source)? {
                let _ = writeln!(output, "{:>5}  {}", token.offset, token);
            }
        }
        Mode::Ast => {
            let program = plc::parse(source)?;
            let _ = writeln!(output, "{:#?}", program);
        }
    }

    Ok(output)
}
