use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};

use crate::cli::Cli;
use crate::config::Config;
use crate::confirm::{confirm, GateState};
use crate::error::FrontendError;
use crate::logging::init_tracing;
use crate::naming::preview_input;
use crate::output::print_summary;
use crate::pipeline::{Pipeline, ProcessPipeline};
use crate::resolve::resolve;

/// Exit status when the user declines the run.
pub const EXIT_ABORTED: i32 = 1;

/// Exit status for validation failures and unconfirmed runs.
pub const EXIT_FAILURE: i32 = 1;

/// Runs the front end with the given arguments on the real console.
///
/// # Errors
///
/// Returns an error on unexpected I/O failures.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    let stdin = std::io::stdin();
    run_with_args_to(args, &mut stdin.lock(), &mut std::io::stdout())
}

/// Testable version of `run_with_args`: answers are read from `input` and
/// the summary is written to `writer`. The engine is chosen from `--engine`,
/// the configuration file or the environment.
///
/// # Errors
///
/// Returns an error on unexpected I/O failures.
pub fn run_with_args_to<R: BufRead, W: Write>(
    args: Vec<String>,
    input: &mut R,
    writer: &mut W,
) -> Result<i32> {
    let cli = match parse_cli(args, writer)? {
        Ok(cli) => cli,
        Err(code) => return Ok(code),
    };
    init_tracing(cli.debug_mode);
    let config = load_config(&cli);
    let mut pipeline = ProcessPipeline::from_env(cli.engine.clone().or(config.gpseq.engine.clone()));
    execute(cli, config, input, writer, &mut pipeline)
}

/// Like [`run_with_args_to`], with a caller-supplied analysis pipeline.
///
/// # Errors
///
/// Returns an error on unexpected I/O failures or if the pipeline fails.
pub fn run_with_pipeline<R: BufRead, W: Write, P: Pipeline>(
    args: Vec<String>,
    input: &mut R,
    writer: &mut W,
    pipeline: &mut P,
) -> Result<i32> {
    let cli = match parse_cli(args, writer)? {
        Ok(cli) => cli,
        Err(code) => return Ok(code),
    };
    init_tracing(cli.debug_mode);
    let config = load_config(&cli);
    execute(cli, config, input, writer, pipeline)
}

/// Parses arguments; `Err(code)` means the process should exit with `code`.
fn parse_cli<W: Write>(args: Vec<String>, writer: &mut W) -> Result<std::result::Result<Cli, i32>> {
    let mut program_args = vec!["gpseq-anim".to_owned()];
    program_args.extend(args);
    match Cli::try_parse_from(program_args) {
        Ok(cli) => Ok(Ok(cli)),
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                Ok(Err(0))
            }
            _ => {
                eprint!("{e}");
                Ok(Err(e.exit_code()))
            }
        },
    }
}

fn load_config(cli: &Cli) -> Config {
    match &cli.config {
        Some(path) => Config::load_file(path),
        None => Config::load_from_path(&cli.out_dir),
    }
}

/// Prints known front-end failures and maps them to [`EXIT_FAILURE`].
fn report(err: anyhow::Error) -> Result<i32> {
    match err.downcast_ref::<FrontendError>() {
        Some(e) => {
            eprintln!("Error: {e}");
            Ok(EXIT_FAILURE)
        }
        None => Err(err),
    }
}

fn execute<R: BufRead, W: Write, P: Pipeline>(
    cli: Cli,
    config: Config,
    input: &mut R,
    writer: &mut W,
    pipeline: &mut P,
) -> Result<i32> {
    if let Some(path) = &config.config_file_path {
        tracing::info!(path = %path.display(), "using configuration file");
    }

    let skip_gate = cli.yes;
    let resolved = match resolve(cli, config.gpseq, || pipeline.log_name()) {
        Ok(resolved) => resolved,
        Err(e) => return report(e.into()),
    };

    let preview = preview_input(&resolved.in_dir, &resolved.regexp);
    if preview.images == 0 {
        tracing::warn!(dir = %resolved.in_dir.display(), "no image matches the filename pattern");
    }
    print_summary(writer, &resolved, &preview)?;

    if !skip_gate {
        let decision = match confirm(input, writer) {
            Ok(decision) => decision,
            Err(e) => return report(e),
        };
        if decision.state == GateState::Aborted {
            writeln!(writer, "Aborted.")?;
            writer.flush()?;
            return Ok(EXIT_ABORTED);
        }
    }
    writer.flush()?;

    match pipeline.run(&resolved) {
        Ok(code) => Ok(code),
        Err(e) => report(e),
    }
}
