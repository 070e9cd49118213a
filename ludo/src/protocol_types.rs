use serde::{Deserialize, Serialize};

use crate::GameState;

/// Request for a bot to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        /// Which player the bot is, counting from zero.
        player: usize,
        num_players: usize,
    },
    /// Request to pick the token to move.
    ///
    /// The response should be a single `usize`, one of the indices in
    /// `movable`. This request is only sent when at least one token can move.
    ChooseToken {
        /// The value that was rolled.
        dice: u8,
        /// The state of the game before the move. `state.current_player`
        /// is the bot itself.
        state: GameState,
        /// Indices of the bot's tokens that may be moved.
        movable: Vec<usize>,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_format() {
        let req = Request::NewGame {
            player: 1,
            num_players: 3,
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"type":"NewGame","player":1,"num_players":3}"#
        );

        let req = Request::ChooseToken {
            dice: 6,
            state: GameState::new(2),
            movable: vec![0, 1, 2, 3],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "ChooseToken");
        assert_eq!(json["state"]["tokens"][1][3]["position"], -1);
        match serde_json::from_value::<Request>(json).unwrap() {
            Request::ChooseToken { dice, movable, .. } => {
                assert_eq!(dice, 6);
                assert_eq!(movable.len(), 4);
            }
            other => panic!("Unexpected request {:?}", other),
        }
    }
}
