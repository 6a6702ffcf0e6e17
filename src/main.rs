use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use uctai::experiment::{self, ExperimentConfig, GameKind, NIM_MAX_TAKE};
use uctai::game::connectfour::ConnectFour;
use uctai::game::nim::Nim;
use uctai::game::othello::Othello;
use uctai::game::tictactoe::TicTacToe;
use uctai::game::GameState;
use uctai::runner::{AIPlayer, Runner};
use uctai::strategies::uct::{HeuristicKind, SearchParams};
use uctai::strategies::UctParams;

#[derive(Parser)]
#[command(name = "uctai", version, about = "UCT Monte Carlo tree search with instability heuristics")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one UCT vs UCT match, printing the board every turn.
    Play(PlayArgs),
    /// Run a parameter sweep and append one JSON line per configuration.
    Sweep(SweepArgs),
    /// Convert a sweep log into CSV.
    Report(ReportArgs),
}

#[derive(Args)]
struct PlayArgs {
    #[arg(short, long, value_enum, default_value_t = GameKind::ConnectFour)]
    game: GameKind,

    /// Chips for nim, board size for othello.
    #[arg(short, long)]
    param: Option<u32>,

    /// Iterations for player one, who also gets the heuristic.
    #[arg(long, default_value_t = 1000)]
    iterations1: u32,

    /// Iterations for player two.
    #[arg(long, default_value_t = 1000)]
    iterations2: u32,

    #[arg(long, value_enum, default_value_t = HeuristicKind::Zero)]
    heuristic: HeuristicKind,

    #[arg(short = 'w', long, default_value_t = 0.0)]
    blend_weight: f64,

    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct SweepArgs {
    /// JSON experiment config. The built-in grid is used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "results.jsonl")]
    out: PathBuf,

    /// Override the number of matches per configuration.
    #[arg(short, long)]
    matches: Option<u32>,

    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(short, long, default_value = "results.jsonl")]
    input: PathBuf,

    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn play_game<G: GameState + fmt::Display>(board: G, args: &PlayArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut p1 = AIPlayer::new(
        "Player 1",
        UctParams {
            search: SearchParams {
                blend_weight: args.blend_weight,
                ..SearchParams::with_iterations(args.iterations1)
            },
            heuristic: args.heuristic,
            seed: Some(seed),
        },
    );
    let mut p2 = AIPlayer::new(
        "Player 2",
        UctParams {
            search: SearchParams::with_iterations(args.iterations2),
            heuristic: HeuristicKind::Zero,
            seed: Some(seed.wrapping_add(1)),
        },
    );
    info!(seed, "starting match");

    let mut runner = Runner::new(board, &mut p1, &mut p2);
    while !runner.is_finished() {
        println!("{}", runner.board());
        let mv = runner.step()?;
        println!("Best Move: {:?}\n", mv);
    }
    println!("{}", runner.board());
    if let Some(outcome) = runner.outcome() {
        println!("{}", outcome);
    }
    Ok(())
}

fn play(args: PlayArgs) -> Result<()> {
    args.game.check_param(args.param)?;
    match (args.game, args.param) {
        (GameKind::Nim, Some(chips)) => play_game(Nim::subtraction(chips, NIM_MAX_TAKE), &args),
        (GameKind::Othello, Some(size)) => play_game(Othello::new(size as usize), &args),
        (GameKind::TicTacToe, _) => play_game(TicTacToe::new(), &args),
        (GameKind::ConnectFour, _) => play_game(ConnectFour::new(), &args),
        (game, param) => bail!("{} cannot be played with parameter {:?}", game, param),
    }
}

fn sweep(args: SweepArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ExperimentConfig::default(),
    };
    if let Some(matches) = args.matches {
        config.matches = matches;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.out)
        .with_context(|| format!("opening {}", args.out.display()))?;
    let mut out = BufWriter::new(file);
    let records = experiment::run_experiment(&config, &mut out)?;
    info!(cells = records.len(), out = %args.out.display(), "sweep finished");
    Ok(())
}

fn report(args: ReportArgs) -> Result<()> {
    let input = File::open(&args.input).with_context(|| format!("opening {}", args.input.display()))?;
    let output = File::create(&args.output).with_context(|| format!("creating {}", args.output.display()))?;
    let mut out = BufWriter::new(output);
    let rows = experiment::write_csv(BufReader::new(input), &mut out)?;
    out.flush()?;
    info!(rows, output = %args.output.display(), "report written");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Play(args) => play(args),
        Command::Sweep(args) => sweep(args),
        Command::Report(args) => report(args),
    }
}
