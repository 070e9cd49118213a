use std::collections::BTreeMap;

use crate::{Cell, GameState, PathModel, BOARD_SIZE};

/// Draws the board as text, two characters per cell.
///
/// Track cells are `·`, safe cells `*` and home stretch cells `=`. A token
/// is shown as its player's number (1 to 4), `x` marks cells shared by
/// tokens of different players. Tokens at home are drawn in their yard.
pub fn visualize_board(path: &PathModel, state: &GameState) -> String {
    let mut background = BTreeMap::new();
    for &cell in path.main_track() {
        let c = if path.is_safe(cell) { '*' } else { '·' };
        background.insert(cell, c);
    }
    for player in 0..state.num_players() {
        for &cell in path.home_stretch(player).unwrap_or_default() {
            background.insert(cell, '=');
        }
    }

    let mut occupants: BTreeMap<Cell, char> = BTreeMap::new();
    for token in state.iter_tokens() {
        let cell = if token.is_at_home() {
            path.yard_cell(token.player, token.index)
        } else {
            path.cell_of(token.player, token.position)
        };
        let Some(cell) = cell else {
            continue;
        };
        let digit = char::from_digit(token.player as u32 + 1, 10).unwrap_or('?');
        occupants
            .entry(cell)
            .and_modify(|c| {
                if *c != digit {
                    *c = 'x';
                }
            })
            .or_insert(digit);
    }

    let mut result = String::from("╭");
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "╮\n";
    for y in 0..BOARD_SIZE {
        result += "│";
        for x in 0..BOARD_SIZE {
            let cell = Cell::new(x, y);
            let c = occupants
                .get(&cell)
                .or_else(|| background.get(&cell))
                .copied()
                .unwrap_or(' ');
            result.push(c);
            result.push(' ');
        }
        result += "│\n";
    }
    result += "╰";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "╯";
    result
}
