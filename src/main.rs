//! # stm - study task manager
//!
//! Command-line front end for the `study_tracker` engine. Every invocation
//! starts a fresh in-memory session (seeded with example tasks unless
//! `--no-seed` is given); `stm shell` keeps a session open across commands.
//!
//! ```bash
//! stm summary
//! stm list --status pending --category "Projeto IC"
//! stm add "Lista 4 de Cálculo" --priority high --deadline "in 3d" --estimate 2
//! stm shell --today 2026-10-16
//! ```

use std::io;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use study_tracker::cli::Cli;
use study_tracker::cmd::{run_command, run_shell, Commands};
use study_tracker::config::Config;
use study_tracker::query::parse_deadline;
use study_tracker::session::Session;
use study_tracker::Result;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.no_seed {
        config.seed = false;
    }
    if let Some(days) = cli.urgent_days {
        config.urgent_threshold_days = days;
    }

    let local_today = Local::now().date_naive();
    let today = match cli.today.as_deref() {
        Some(input) => parse_deadline(input, local_today)?,
        None => local_today,
    };

    let mut session = Session::new(&config, today);
    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Shell => run_shell(&mut session, &config, cli.json, io::stdin().lock(), &mut out),
        command => run_command(&mut session, &config, command, cli.json, &mut out),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
