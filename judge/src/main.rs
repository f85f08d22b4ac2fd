use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use judge::{play_matchup, standings, PlayerConfig, Recorder, MatchScore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wondev::{Game, MAX_SIZE, MIN_SIZE};

/// Plays every pair of players against each other.
#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of players
    #[clap(num_args(2..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games each pair of players plays
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// Number of cells per side of the board
    #[arg(short, long, default_value_t = 6)]
    board_size: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// End a match as soon as one player makes an illegal action
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_action: bool,

    /// Record every game as a JSON file into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    if !(MIN_SIZE..=MAX_SIZE).contains(&args.board_size) {
        anyhow::bail!(
            "The board size must be between {} and {}",
            MIN_SIZE,
            MAX_SIZE
        );
    }
    let game = Game::new(args.board_size);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, board_size = args.board_size);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = args
        .record_games_to_directory
        .map(Recorder::new)
        .transpose()?;

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<anyhow::Result<Vec<PlayerConfig>>>()?;
    let nicks: Vec<String> = player_configs.iter().map(|c| c.nick.clone()).collect();

    let mut results: BTreeMap<(usize, usize), MatchScore> = BTreeMap::new();
    for (i1, i2) in (0..player_configs.len()).tuple_combinations() {
        // Fresh agents per match, so that bot processes start from scratch
        let mut player_1 = player_configs[i1].create_agent(rng.gen())?;
        let mut player_2 = player_configs[i2].create_agent(rng.gen())?;

        let match_score = play_matchup(
            &game,
            player_1.as_mut(),
            player_2.as_mut(),
            args.num_games,
            args.stop_on_illegal_action,
            &mut rng,
            &mut recorder,
        )?;
        eprintln!("{}", match_score.summary([&nicks[i1], &nicks[i2]]));
        results.insert((i1, i2), match_score);
    }

    if player_configs.len() > 2 {
        println!("\n{}", standings(&nicks, &results));
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Human players read the board from stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
