use std::path::{Path, PathBuf};

use clap::Parser;
use judge::{new_game_for, play_game, GameResult, Player, PlayerConfig, Recorder};
use ludo::Game;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of players (two to four)
    #[clap(num_args(2..=4), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop as soon as one player makes an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record the game's interactions as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// Save the final state of every game into this directory
    #[arg(long)]
    save_final_state_to_directory: Option<PathBuf>,

    /// Start the first game from this saved game instead of a fresh board
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Give up on a game after this many dice rolls
    #[arg(long, default_value_t = 10_000)]
    max_rolls: usize,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

struct Scoreboard {
    wins: Vec<usize>,
    illegal_moves: Vec<usize>,
    abandoned: usize,
}

fn print_scoreboard(player_configs: &[PlayerConfig], score: &Scoreboard) {
    let num_games: usize = score.wins.iter().sum::<usize>()
        + score.illegal_moves.iter().sum::<usize>()
        + score.abandoned;
    println!("\nResults after {} games:\n", num_games);
    println!(" {:19} | {:>6} | {:>7} | {:>13}", "player", "wins", "win %", "illegal moves");
    println!("---------------------|--------|---------|--------------");
    for (idx, config) in player_configs.iter().enumerate() {
        let win_percentage = if num_games > 0 {
            score.wins[idx] as f32 / num_games as f32 * 100.0
        } else {
            0.0
        };
        println!(
            " {:19} | {:>6} | {:>6.1}% | {:>13}",
            config.nick, score.wins[idx], win_percentage, score.illegal_moves[idx]
        );
    }
    if score.abandoned > 0 {
        println!("\n{} games were abandoned", score.abandoned);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    if let Some(dir_path) = &args.save_final_state_to_directory {
        if !dir_path.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", dir_path.display());
        }
    }

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let mut players = player_configs
        .iter()
        .enumerate()
        .map(|(idx, config)| Player::from_config(config, idx))
        .collect::<Result<Vec<Player>, anyhow::Error>>()?;

    let mut resumed_game = match &args.resume {
        Some(path) => {
            let game = Game::load_from_path(path)?;
            if game.num_players() != players.len() {
                anyhow::bail!(
                    "The saved game has {} players, but {} player configs were given",
                    game.num_players(),
                    players.len()
                );
            }
            info!(path = %path.display(), "Resuming saved game");
            Some(game)
        }
        None => None,
    };

    let mut score = Scoreboard {
        wins: vec![0; players.len()],
        illegal_moves: vec![0; players.len()],
        abandoned: 0,
    };

    for game_idx in 0..args.num_games {
        let game = match resumed_game.take() {
            Some(game) => game,
            None => new_game_for(&players)?,
        };
        let (result, final_game) =
            play_game(&mut rng, &mut players, game, args.max_rolls, &mut recorder)?;

        let mut stop = false;
        match result {
            GameResult::WonByPlayer { player_idx } => {
                debug!(winner = players[player_idx].name, game_idx);
                score.wins[players[player_idx].config_idx] += 1;
            }
            GameResult::Abandoned { rolls } => {
                info!(game_idx, rolls, "Game abandoned");
                score.abandoned += 1;
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                info!(
                    player = players[player_idx].name,
                    game_idx, "Illegal move by player"
                );
                for msg in error_chain(&err) {
                    info!("{}", msg);
                }
                score.illegal_moves[players[player_idx].config_idx] += 1;
                stop = args.stop_on_illegal_move;
            }
        }

        if let Some(dir_path) = &args.save_final_state_to_directory {
            let path = final_state_path(dir_path, game_idx);
            final_game.save_to_path(&path)?;
        }
        if stop {
            break;
        }

        // Take turns going first
        players.rotate_left(1);
    }

    print_scoreboard(&player_configs, &score);

    Ok(())
}

/// The messages of `err` and all of its sources, outermost first.
fn error_chain(err: &dyn std::error::Error) -> Vec<String> {
    let mut messages = vec![err.to_string()];
    let mut err_dyn = err;
    while let Some(src_err) = err_dyn.source() {
        messages.push(src_err.to_string());
        err_dyn = src_err;
    }
    messages
}

fn final_state_path(dir_path: &Path, game_idx: usize) -> PathBuf {
    dir_path.join(format!("final_{:0>6}.json", game_idx + 1))
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
