use ludo::{apply_move, GameState, MoveEffects, PathModel, TokenId};

/// The outcome of moving one particular token, without committing to it.
#[derive(Clone, Debug)]
pub struct MovePreview {
    pub index: usize,
    /// Position of the token before the move.
    pub from: i8,
    pub effects: MoveEffects,
    pub state_after: GameState,
}

/// Simulates each of the movable tokens of the current player.
///
/// Indices that cannot actually be moved are left out.
pub fn preview_moves(
    path: &PathModel,
    state: &GameState,
    dice: u8,
    movable: &[usize],
) -> Vec<MovePreview> {
    let player = state.current_player;
    movable
        .iter()
        .filter_map(|&index| {
            let id = TokenId { player, index };
            let from = state.token(id)?.position;
            let mut state_after = state.clone();
            let effects = apply_move(path, &mut state_after, id, dice).ok()?;
            Some(MovePreview {
                index,
                from,
                effects,
                state_after,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previews_do_not_touch_the_state() {
        let path = PathModel::standard();
        let mut state = GameState::new(2);
        state.tokens[0][0].position = 10;
        state.tokens[1][0].position = 1;
        let before = state.clone();

        let previews = preview_moves(&path, &state, 4, &[0, 1]);
        assert_eq!(state, before);
        // Token 1 is at home and can't move with a four
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].index, 0);
        assert_eq!(previews[0].from, 10);
        assert!(previews[0].effects.captured());
        assert!(previews[0].state_after.tokens[1][0].is_at_home());
    }
}
