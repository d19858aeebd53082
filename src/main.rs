//! `dominoes`: play one game from the command line and report how it went.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_dominoes::{Game, GameConfig, GameSummary, StrategyKind};

/// Play a game of block dominoes between computer players.
#[derive(Debug, Parser)]
#[command(name = "dominoes", version, about)]
struct Cli {
    /// Load the game configuration from a JSON file; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of players (2-8).
    #[arg(short, long)]
    players: Option<usize>,

    /// Seed for the pile and for random strategies.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Highest pip value in the set.
    #[arg(long)]
    max_pip: Option<u8>,

    /// Tiles dealt to each hand.
    #[arg(long)]
    hand_size: Option<usize>,

    /// Give up after this many moves.
    #[arg(long)]
    max_moves: Option<u32>,

    /// How every player picks its moves.
    #[arg(long, value_enum, default_value_t = StrategyKind::First)]
    strategy: StrategyKind,

    /// Print the summary as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// The file (or defaults), then the flags, validated once merged.
    fn game_config(&self) -> Result<GameConfig> {
        let base: GameConfig = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => GameConfig::default(),
        };

        let config = self.apply_overrides(base);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: GameConfig) -> GameConfig {
        if let Some(players) = self.players {
            config.player_count = players;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_pip) = self.max_pip {
            config.max_pip = max_pip;
        }
        if let Some(hand_size) = self.hand_size {
            config.hand_size = hand_size;
        }
        if let Some(max_moves) = self.max_moves {
            config.max_moves = max_moves;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.game_config()?;
    info!(players = config.player_count, seed = config.seed, strategy = ?cli.strategy, "starting game");

    let mut game = Game::with_strategy(config, cli.strategy)?;
    let summary = game.play_game()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&game, &summary);
    }
    Ok(())
}

fn print_summary(game: &Game, summary: &GameSummary) {
    let state = game.state();
    println!("opened with {}", summary.opening);
    println!("{} moves played", summary.moves);
    print!("{}", state.status());

    match &summary.result {
        Some(result) => println!("{}", result),
        None => println!("stopped at the {} move cap", game.config().max_moves),
    }

    for (player, points) in state.players().iter().map(|(id, p)| (id, p.points())) {
        println!("{}: {} points", player, points);
    }
}
