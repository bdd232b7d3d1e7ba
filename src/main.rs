use std::io::{self, Read, Write};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, debug};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use rekcod::RekcodError;
use rekcod::cli::Cli;
use rekcod::config::{self, Config, OutputFormat};
use rekcod::docker::CommandInspector;
use rekcod::input;
use rekcod::pipeline;

fn main() {
    let cli = Cli::parse();
    let code = match run(&cli) {
        Ok(()) => 0,
        Err(err) => report_failure(&err),
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let mut cfg = config::load(&cwd)?;
    cli.apply(&mut cfg);
    init_logging(&cfg)?;

    let inputs = if cli.inputs.is_empty() {
        let mut blob = String::new();
        io::stdin()
            .read_to_string(&mut blob)
            .context("failed to read stdin")?;
        input::from_stdin(&blob)
    } else {
        input::classify_all(&cli.inputs)
    };
    if inputs.is_empty() {
        debug!("nothing on stdin, exiting");
        return Ok(());
    }

    let inspector = CommandInspector::from_argv(cfg.inspect_argv()?)
        .ok_or_else(|| anyhow!("inspect_command cannot be blank"))?;
    let resolved = pipeline::resolve_all(inputs, &inspector)?;

    debug!("rendering {} input(s) as {}", resolved.len(), cfg.format.as_str());

    let rendered = match cfg.format {
        OutputFormat::Text => pipeline::render_text(&resolved),
        OutputFormat::Json => pipeline::render_json(&resolved)?,
    };
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write output")?;
    stdout.flush().context("failed to write output")?;
    Ok(())
}

/// Log to stderr so stdout carries only the translated commands.
fn init_logging(cfg: &Config) -> Result<()> {
    let level = match cfg.log_level.as_deref() {
        Some(level) => LevelFilter::from_str(level)
            .map_err(|_| anyhow!("invalid log level {level:?}"))?,
        None => LevelFilter::Warn,
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialize logging")
}

/// Print a fatal error and return the process exit code.
///
/// Streams captured from a failed inspect process are echoed verbatim.
fn report_failure(err: &anyhow::Error) -> i32 {
    let Some(rekcod_err) = err.downcast_ref::<RekcodError>() else {
        eprintln!("Error: {err:#}");
        return 1;
    };
    if let Some(stdout) = rekcod_err.captured_stdout() {
        println!("{stdout}");
    }
    match rekcod_err.captured_stderr() {
        Some(stderr) => eprintln!("{stderr}"),
        None => eprintln!("Error: {rekcod_err}"),
    }
    rekcod_err.exit_code()
}
