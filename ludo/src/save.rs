use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Game, GameState, InvalidSaveData, InvalidSetup, PathModel, PersistenceError, PlayerSetup,
    Token, HOME, NUM_TOKENS,
};

/// A saved game, as stored on disk.
///
/// Only the state between turns is kept: a roll that is waiting for a
/// token choice, and the undo history, are not saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub current_player: usize,
    pub num_players: usize,
    pub player_names: Vec<String>,
    pub player_colors: Vec<String>,
    /// One list of tokens per player.
    pub tokens: Vec<Vec<TokenRecord>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub position: i8,
    pub finished: bool,
}

impl SaveData {
    /// Checks that this describes a game that could actually be played and
    /// converts it.
    pub fn into_setup_and_state(
        self,
        path: &PathModel,
    ) -> Result<(PlayerSetup, GameState), InvalidSaveData> {
        let SaveData {
            current_player,
            num_players,
            player_names,
            player_colors,
            tokens,
        } = self;

        if player_names.len() != num_players {
            return Err(InvalidSetup::NameCount {
                expected: num_players,
                found: player_names.len(),
            }
            .into());
        }
        let setup = PlayerSetup::with_names_and_colors(player_names, player_colors)?;
        if tokens.len() != num_players {
            return Err(InvalidSaveData::PlayerCountMismatch {
                num_players,
                token_lists: tokens.len(),
            });
        }
        if current_player >= num_players {
            return Err(InvalidSaveData::CurrentPlayerOutOfRange {
                current_player,
                num_players,
            });
        }

        let finish = path.finish_position();
        let mut state = GameState::new(num_players);
        state.current_player = current_player;
        for (player, records) in tokens.into_iter().enumerate() {
            if records.len() != NUM_TOKENS {
                return Err(InvalidSaveData::TokenCount {
                    player,
                    found: records.len(),
                });
            }
            for (index, TokenRecord { position, finished }) in records.into_iter().enumerate() {
                if !(HOME..=finish).contains(&position) {
                    return Err(InvalidSaveData::PositionOutOfRange {
                        player,
                        index,
                        position,
                    });
                }
                if finished != (position == finish) {
                    return Err(InvalidSaveData::FinishedMismatch {
                        player,
                        index,
                        position,
                        finished,
                    });
                }
                state.tokens[player][index] = Token {
                    player,
                    index,
                    position,
                    finished,
                };
            }
        }
        Ok((setup, state))
    }
}

impl Game {
    pub fn save(&self) -> SaveData {
        SaveData {
            current_player: self.current_player(),
            num_players: self.num_players(),
            player_names: self.setup().names().to_vec(),
            player_colors: self.setup().colors().to_vec(),
            tokens: self
                .state()
                .tokens
                .iter()
                .map(|tokens| {
                    tokens
                        .iter()
                        .map(|t| TokenRecord {
                            position: t.position,
                            finished: t.finished,
                        })
                        .collect()
                })
                .collect(),
        }
    }

    /// A game that continues from the saved state, with empty history.
    pub fn load(data: SaveData) -> Result<Self, InvalidSaveData> {
        let (setup, state) = data.into_setup_and_state(&PathModel::standard())?;
        Ok(Self::from_state(setup, state))
    }

    /// Writes the game to `path`. An existing file there is only replaced
    /// once the new save has been written completely.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let tmp_path = temporary_sibling(path);
        let result = self
            .write_save(&tmp_path)
            .and_then(|()| std::fs::rename(&tmp_path, path).map_err(PersistenceError::from));
        if result.is_err() {
            let _ = std::fs::remove_file(&tmp_path);
        }
        result?;
        debug!(path = %path.display(), "Game saved");
        Ok(())
    }

    fn write_save(&self, path: &Path) -> Result<(), PersistenceError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.save())?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let data: SaveData = serde_json::from_reader(reader)?;
        let game = Self::load(data)?;
        debug!(path = %path.display(), "Game loaded");
        Ok(game)
    }

    /// Replaces this game with the one saved at `path`. On error, this
    /// game is left as it was.
    pub fn replace_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        *self = Self::load_from_path(path)?;
        Ok(())
    }
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::PlayedGame;
    use crate::{Phase, TokenId};

    quickcheck! {
        fn save_then_load_is_identity(played: PlayedGame) -> bool {
            let (game, _) = played.play();
            let loaded = round_trip(&game);
            loaded.state() == game.state()
                && loaded.setup() == game.setup()
                && loaded.phase() == game.phase()
        }
    }

    fn round_trip(game: &Game) -> Game {
        let json = serde_json::to_string(&game.save()).unwrap();
        Game::load(serde_json::from_str(&json).unwrap()).unwrap()
    }

    fn assert_same_game(a: &Game, b: &Game) {
        assert_eq!(a.state(), b.state());
        assert_eq!(a.setup(), b.setup());
        assert_eq!(a.phase(), b.phase());
    }

    fn temp_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ludo_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn fresh_game_round_trip() {
        let game = Game::new(PlayerSetup::new(4).unwrap());
        let loaded = round_trip(&game);
        assert_same_game(&game, &loaded);
        assert_eq!(loaded.current_player(), 0);
        assert!(loaded.state().iter_tokens().all(Token::is_at_home));
    }

    #[test]
    fn mid_game_round_trip() {
        let setup = PlayerSetup::with_names_and_colors(
            vec![String::from("Alice"), String::from("Bot")],
            vec![String::from("#e74c3c"), String::from("#27ae60")],
        )
        .unwrap();
        let mut game = Game::new(setup);
        // Bring a token close to the finish, then let it finish
        game.roll_value(6).unwrap();
        game.choose(0).unwrap();
        game.state.tokens[0][0].position = 52;
        game.roll_value(5).unwrap();
        let moved = game.choose(0).unwrap();
        assert!(moved.effects.finished());
        // Player 1 enters and walks onto a spot player 0 will hit
        game.roll_value(6).unwrap();
        game.choose(0).unwrap();
        game.roll_value(1).unwrap();
        game.choose(0).unwrap();
        game.state.tokens[0][1].position = 10;
        game.roll_value(4).unwrap();
        let moved = game.choose(1).unwrap();
        assert_eq!(
            moved.effects.captured_tokens().collect::<Vec<_>>(),
            vec![TokenId {
                player: 1,
                index: 0
            }]
        );

        let loaded = round_trip(&game);
        assert_same_game(&game, &loaded);
        assert_eq!(loaded.state().finished_count(0), 1);
        assert!(loaded.state().tokens[1][0].is_at_home());
        assert!(!loaded.can_undo());
    }

    #[test]
    fn won_game_round_trip() {
        let mut game = Game::new(PlayerSetup::new(2).unwrap());
        for token in game.state.tokens[0].iter_mut() {
            token.position = 57;
            token.finished = true;
        }
        let game = Game::from_state(game.setup().clone(), game.state().clone());
        assert_eq!(game.winner(), Some(0));
        let loaded = round_trip(&game);
        assert_same_game(&game, &loaded);
        assert_eq!(loaded.phase(), &Phase::GameOver { winner: 0 });
    }

    #[test]
    fn reads_a_hand_written_save() {
        let json = r##"{
            "current_player": 1,
            "tokens": [
                [{"position": -1, "finished": false}, {"position": 12, "finished": false},
                 {"position": 57, "finished": true}, {"position": -1, "finished": false}],
                [{"position": 3, "finished": false}, {"position": -1, "finished": false},
                 {"position": -1, "finished": false}, {"position": 55, "finished": false}]
            ],
            "player_names": ["Alice", "Bot"],
            "player_colors": ["#e74c3c", "#27ae60"],
            "num_players": 2
        }"##;
        let game = Game::load(serde_json::from_str(json).unwrap()).unwrap();
        assert_eq!(game.current_player(), 1);
        assert_eq!(game.state().tokens[0][1].position, 12);
        assert!(game.state().tokens[0][2].finished);
        assert_eq!(game.setup().name(0), Some("Alice"));
    }

    fn valid_data() -> SaveData {
        Game::new(PlayerSetup::new(2).unwrap()).save()
    }

    #[test]
    fn rejects_invalid_data() {
        let mut data = valid_data();
        data.num_players = 3;
        assert_eq!(
            Game::load(data).unwrap_err(),
            InvalidSaveData::Setup(InvalidSetup::NameCount {
                expected: 3,
                found: 2
            })
        );

        let mut data = valid_data();
        data.player_colors.pop();
        assert!(matches!(
            Game::load(data),
            Err(InvalidSaveData::Setup(InvalidSetup::ColorCount { .. }))
        ));

        let mut data = valid_data();
        data.current_player = 2;
        assert!(matches!(
            Game::load(data),
            Err(InvalidSaveData::CurrentPlayerOutOfRange { .. })
        ));

        let mut data = valid_data();
        data.tokens.pop();
        assert!(matches!(
            Game::load(data),
            Err(InvalidSaveData::PlayerCountMismatch { .. })
        ));

        let mut data = valid_data();
        data.tokens[1].pop();
        assert_eq!(
            Game::load(data).unwrap_err(),
            InvalidSaveData::TokenCount {
                player: 1,
                found: 3
            }
        );

        let mut data = valid_data();
        data.tokens[0][2].position = 58;
        assert!(matches!(
            Game::load(data),
            Err(InvalidSaveData::PositionOutOfRange { position: 58, .. })
        ));

        let mut data = valid_data();
        data.tokens[0][2].finished = true;
        assert!(matches!(
            Game::load(data),
            Err(InvalidSaveData::FinishedMismatch { .. })
        ));

        let mut data = valid_data();
        data.tokens[0][2].position = 57;
        assert!(matches!(
            Game::load(data),
            Err(InvalidSaveData::FinishedMismatch { .. })
        ));
    }

    #[test]
    fn missing_fields_are_rejected() {
        let json = r#"{"current_player": 0, "num_players": 2}"#;
        assert!(serde_json::from_str::<SaveData>(json).is_err());
    }

    #[test]
    fn missing_fields_in_a_file_are_invalid_save_data() {
        let mut game = Game::new(PlayerSetup::new(2).unwrap());
        let before = game.state().clone();
        let path = temp_file("missing_tokens");
        std::fs::write(
            &path,
            r#"{"current_player": 0, "num_players": 2,
                "player_names": ["A", "B"], "player_colors": ["red", "green"]}"#,
        )
        .unwrap();
        let err = game.replace_from_path(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        match err {
            PersistenceError::Invalid(InvalidSaveData::Malformed(msg)) => {
                assert!(msg.contains("tokens"), "{}", msg)
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let wrong_type = temp_file("wrong_type");
        let mut value = serde_json::to_value(valid_data()).unwrap();
        value["current_player"] = serde_json::json!("first");
        std::fs::write(&wrong_type, value.to_string()).unwrap();
        assert!(matches!(
            game.replace_from_path(&wrong_type),
            Err(PersistenceError::Invalid(InvalidSaveData::Malformed(_)))
        ));
        std::fs::remove_file(&wrong_type).unwrap();
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn saving_replaces_an_existing_file() {
        let path = temp_file("overwrite");
        let mut game = Game::new(PlayerSetup::new(2).unwrap());
        game.save_to_path(&path).unwrap();
        game.roll_value(6).unwrap();
        game.choose(1).unwrap();
        game.save_to_path(&path).unwrap();

        assert!(!temporary_sibling(&path).exists());
        let loaded = Game::load_from_path(&path).unwrap();
        assert_same_game(&game, &loaded);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_save_keeps_the_previous_file() {
        let path = temp_file("failed_save");
        let game = Game::new(PlayerSetup::new(2).unwrap());
        game.save_to_path(&path).unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();

        // A directory in the way of the temporary file makes the write fail
        let blocker = temporary_sibling(&path);
        std::fs::create_dir_all(&blocker).unwrap();
        let mut moved = Game::new(PlayerSetup::new(2).unwrap());
        moved.roll_value(6).unwrap();
        moved.choose(0).unwrap();
        assert!(matches!(
            moved.save_to_path(&path),
            Err(PersistenceError::Io(_))
        ));
        std::fs::remove_dir(&blocker).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), saved);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn file_round_trip() {
        let path = temp_file("file_round_trip");
        let mut game = Game::new(PlayerSetup::new(3).unwrap());
        game.roll_value(6).unwrap();
        game.choose(2).unwrap();
        game.save_to_path(&path).unwrap();

        let loaded = Game::load_from_path(&path).unwrap();
        assert_same_game(&game, &loaded);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_load_keeps_current_game() {
        let mut game = Game::new(PlayerSetup::new(2).unwrap());
        game.roll_value(6).unwrap();
        game.choose(0).unwrap();
        let before = game.state().clone();

        let missing = temp_file("does_not_exist");
        assert!(matches!(
            game.replace_from_path(&missing),
            Err(PersistenceError::Io(_))
        ));

        let garbage = temp_file("garbage");
        std::fs::write(&garbage, "{ not json").unwrap();
        assert!(matches!(
            game.replace_from_path(&garbage),
            Err(PersistenceError::Json(_))
        ));
        std::fs::remove_file(&garbage).unwrap();

        let invalid = temp_file("invalid");
        let mut data = valid_data();
        data.current_player = 7;
        std::fs::write(&invalid, serde_json::to_string(&data).unwrap()).unwrap();
        assert!(matches!(
            game.replace_from_path(&invalid),
            Err(PersistenceError::Invalid(_))
        ));
        std::fs::remove_file(&invalid).unwrap();

        assert_eq!(game.state(), &before);
        assert!(game.can_undo());
    }
}
