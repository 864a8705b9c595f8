//! # ecoshop CLI entry point
//!
//! Runs the storefront as a line-oriented shell: each command mutates the
//! store and every committed frame is printed to stdout. Logs go to stderr.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ecoshop::command::HELP;
use ecoshop::{App, AppConfig, Command, Route, WriterSurface};

/// Terminal storefront backed by a keyed reactive store.
#[derive(Parser, Debug)]
#[command(name = "ecoshop", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for EcoGuide reply selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Route to open at start-up.
    #[arg(long)]
    route: Option<String>,

    /// Do not clear the terminal between frames.
    #[arg(long)]
    no_clear: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.rng_seed = Some(seed);
    }
    if let Some(route) = &cli.route {
        config.initial_route = Route::from_name(route);
    }
    tracing::debug!(?config, "configuration resolved");

    let surface = Rc::new(RefCell::new(WriterSurface::stdout(!cli.no_clear)));
    let app = App::new(&config, surface).context("building the storefront")?;
    app.start().context("rendering the first frame")?;

    let mut last_tick = Instant::now();
    let stdin = io::stdin();
    prompt()?;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;

        let elapsed = last_tick.elapsed();
        last_tick = Instant::now();
        let ran = app.scheduler().advance(elapsed)?;
        if ran > 0 {
            tracing::debug!(ran, elapsed_ms = elapsed.as_millis() as u64, "scheduled tasks ran");
        }

        if line.trim().is_empty() {
            prompt()?;
            continue;
        }

        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(command) => {
                if let Err(err) = app.execute(&command) {
                    tracing::warn!(?command, error = %err, "command failed");
                    eprintln!("error: {err}");
                }
            }
            Err(err) => eprintln!("{err} (type `help` for commands)"),
        }

        for message in app.toasts().take_unreported() {
            println!("  ✱ {message}");
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}
