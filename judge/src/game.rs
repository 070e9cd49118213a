use ludo::{
    visualize_board, Game, GameEvent, IllegalMove, Okay, PlayerSetup, RandomDice, Request,
    RollOutcome, DEFAULT_COLORS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, enabled, trace, Level};

use crate::player::Player;
use crate::recording::Recorder;

pub enum GameResult {
    WonByPlayer { player_idx: usize },
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
    /// Nobody won within the allowed number of rolls.
    Abandoned { rolls: usize },
}

/// A fresh game with the players' names and colors, in seating order.
pub fn new_game_for(players: &[Player]) -> anyhow::Result<Game> {
    let names = players.iter().map(|p| p.name.clone()).collect();
    let colors = players
        .iter()
        .zip(DEFAULT_COLORS)
        .map(|(p, default)| p.color.clone().unwrap_or_else(|| String::from(default)))
        .collect();
    Ok(Game::new(PlayerSetup::with_names_and_colors(names, colors)?))
}

/// Plays `game` to the end, with `players[i]` controlling player `i`.
///
/// Returns an error only on communication failure, not when an
/// illegal move is played. The game is returned in its final state.
pub fn play_game(
    rng: &mut StdRng,
    players: &mut [Player],
    mut game: Game,
    max_rolls: usize,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<(GameResult, Game)> {
    if players.len() != game.num_players() {
        anyhow::bail!(
            "The game is for {} players, but {} were given",
            game.num_players(),
            players.len()
        );
    }
    let mut dice = RandomDice::new(StdRng::seed_from_u64(rng.gen()));

    // Inform the players about the new game, so that they can reset their state
    let num_players = players.len();
    for (player_idx, player) in players.iter_mut().enumerate() {
        let _: Okay = player.perform_request(
            recorder,
            &Request::NewGame {
                player: player_idx,
                num_players,
            },
        )?;
    }

    let mut rolls = 0;
    let result = loop {
        if let Some(winner) = game.winner() {
            break GameResult::WonByPlayer { player_idx: winner };
        }
        if rolls >= max_rolls {
            break GameResult::Abandoned { rolls };
        }
        rolls += 1;

        let player_idx = game.current_player();
        match game.roll(&mut dice)? {
            RollOutcome::Skipped { dice, .. } => {
                trace!(player = players[player_idx].name, dice, "No legal move");
            }
            RollOutcome::MustChoose { dice, movable, .. } => {
                let req = Request::ChooseToken {
                    dice,
                    state: game.state().clone(),
                    movable: movable.iter().map(|token| token.index).collect(),
                };
                let index: usize = players[player_idx].perform_request(recorder, &req)?;
                match game.choose(index) {
                    Ok(outcome) => {
                        for event in &outcome.effects.events {
                            if let GameEvent::Captured { token, by, .. } = event {
                                debug!(
                                    player = players[by.player].name,
                                    victim = players[token.player].name,
                                    "Capture"
                                );
                            }
                        }
                    }
                    Err(err) => break GameResult::IllegalMoveByPlayer { player_idx, err },
                }
            }
        }
        if enabled!(Level::TRACE) {
            trace!("\n{}", visualize_board(game.path(), game.state()));
        }
    };

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }

    Ok((result, game))
}
