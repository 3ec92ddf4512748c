mod commands;

use crate::commands::{clusters, filter, outcomes, simulate, tooltip};
use clap::{Parser, Subcommand};
use seat_map::formats::{load_scene, read_orchestrator_config, read_script};
use seat_map::{FilterSpec, OrchestratorConfig, Province, RunnerUpMode, SeatId, VotesKey};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[clap(name = "seat-map", about = "Election results map core")]
struct Opts {
    /// Seat results JSON file.
    #[clap(long)]
    results: PathBuf,
    /// Scene config JSON (clusters, party colors, disputed parties).
    /// Built-in National Assembly clusters are used when omitted.
    #[clap(long)]
    scene: Option<PathBuf>,
    /// Orchestrator config JSON.
    #[clap(long)]
    config: Option<PathBuf>,
    /// Vote-source key to tabulate (declaredVotes or actualVotes). `simulate`
    /// starts from the config's default key instead.
    #[clap(long, default_value = "declaredVotes")]
    votes_key: VotesKey,
    /// Use the second-highest polling candidate as runner-up.
    #[clap(long)]
    second_place: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print leader, runner-up and margin for every seat.
    Outcomes {
        /// Also write the outcomes as JSON.
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Print the majority outcome of every zoom cluster.
    Clusters,
    /// List seats and clusters matching a compound filter.
    Filter {
        /// Leading party (repeatable).
        #[clap(long = "winner")]
        winners: Vec<String>,
        /// Runner-up party (repeatable).
        #[clap(long = "runner-up")]
        runners_up: Vec<String>,
        /// Province (repeatable).
        #[clap(long = "province")]
        provinces: Vec<Province>,
        /// Seat label such as NA-12 (repeatable).
        #[clap(long = "seat")]
        seats: Vec<String>,
        /// Only seats led by a disputed party.
        #[clap(long)]
        disputed: bool,
    },
    /// Show the hover card for one seat.
    Tooltip {
        /// Seat label (NA-12) or number.
        seat: String,
    },
    /// Replay a script of viewer events through the animation orchestrator.
    Simulate {
        /// Script JSON: a list of events with an optional `wait` flag.
        script: PathBuf,
        /// Multiplier applied to every transition duration.
        #[clap(long, default_value = "1.0")]
        time_scale: f64,
        /// Also write the transition log as JSON.
        #[clap(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let opts = Opts::parse();

    let filter = match opts.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(opts).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(opts: Opts) -> Result<(), Box<dyn Error>> {
    let scene = load_scene(&opts.results, opts.scene.as_deref())?;
    let mut config = match &opts.config {
        Some(path) => read_orchestrator_config(path)?,
        None => OrchestratorConfig::default(),
    };
    if opts.second_place {
        config.runner_up_mode = RunnerUpMode::SecondPlace;
    }

    let key = opts.votes_key;
    let mode = config.runner_up_mode;

    match opts.command {
        Command::Outcomes { output } => outcomes(&scene, key, mode, output.as_deref()),
        Command::Clusters => clusters(&scene, key, mode),
        Command::Filter {
            winners,
            runners_up,
            provinces,
            seats,
            disputed,
        } => {
            let spec = FilterSpec::default()
                .winners(winners)
                .runners_up(runners_up)
                .provinces(provinces)
                .seat_labels(seats.iter().map(|s| match SeatId::from_label(s) {
                    Some(id) => id.label(),
                    None => s.clone(),
                }))
                .disputed_only(disputed);
            filter(&scene, &spec, key, mode)
        }
        Command::Tooltip { seat } => tooltip(&scene, &seat, key, mode),
        Command::Simulate {
            script,
            time_scale,
            output,
        } => {
            let steps = read_script(&script)?;
            simulate(scene, config, steps, time_scale, output.as_deref()).await
        }
    }
}
