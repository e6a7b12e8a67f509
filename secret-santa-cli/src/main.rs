mod error;
mod setup;
mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{thread_rng, RngCore, SeedableRng};
use secret_santa_config::{get_config, get_config_from, Config};
use secret_santa_pairing::check_feasibility;
use secret_santa_pairing::notification::notifications;
use tracing::{error, info};

use crate::error::AppError;

#[derive(Parser)]
#[command(name = "secret-santa")]
#[command(about = "Draw secret santa pairings that avoid earlier years")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a new pairing
    Generate {
        /// Seed for a reproducible draw (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Year stored with the pairing
        #[arg(long)]
        year: Option<i32>,

        /// Append the pairing to the history file
        #[arg(long)]
        record: bool,

        /// Print the message every giver would receive
        #[arg(long)]
        notify_preview: bool,
    },
    /// Validate roster, history and exclusions without drawing
    Check,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, AppError> {
    Ok(match path {
        Some(path) => get_config_from(path)?,
        None => get_config()?,
    })
}

fn generate(
    config: &Config,
    seed: Option<u64>,
    year: Option<i32>,
    record: bool,
    notify_preview: bool,
) -> Result<(), AppError> {
    let roster = setup::load_roster(&config.roster)?;
    let mut history = setup::load_history(&config.history)?;
    let constraints = setup::build_constraints(config, &roster, &history)?;

    let seed = seed
        .or(config.seed)
        .unwrap_or_else(|| thread_rng().next_u64());
    info!(seed, participants = roster.len(), "drawing");
    let mut rng = StdRng::seed_from_u64(seed);
    let assignment = setup::engine(config).generate(&roster, &constraints, &mut rng)?;

    for (giver, recipient) in &assignment {
        println!("{giver} -> {recipient}");
    }

    if notify_preview {
        for notification in notifications(&roster, &assignment) {
            println!(
                "\nTo: {}\nSubject: {}\n\n{}",
                notification.to, notification.subject, notification.body
            );
        }
    }

    if let Some(output) = &config.output {
        let json = serde_json::to_string_pretty(&assignment.to_record(year))?;
        setup::write(output, &json)?;
        info!(path = %output.display(), "wrote pairing");
    }

    if record {
        history.push(&assignment, year);
        setup::write(&config.history, &history.to_json()?)?;
        info!(
            path = %config.history.display(),
            records = history.records().len(),
            "recorded pairing"
        );
    }

    Ok(())
}

fn check(config: &Config) -> Result<(), AppError> {
    let roster = setup::load_roster(&config.roster)?;
    let history = setup::load_history(&config.history)?;
    let constraints = setup::build_constraints(config, &roster, &history)?;
    check_feasibility(&roster, &constraints)?;
    println!(
        "{} participants, {} past pairings, {} exclusions, {} groups: ok",
        roster.len(),
        history.records().len(),
        constraints.exclusions().len(),
        constraints.groups().len()
    );
    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = load_config(cli.config.as_ref())?;
    match cli.command {
        Commands::Generate {
            seed,
            year,
            record,
            notify_preview,
        } => generate(&config, seed, year, record, notify_preview),
        Commands::Check => check(&config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::setup_telemetry(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
