use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Width and height of the board grid.
pub const BOARD_SIZE: i8 = 15;
/// Tokens per player.
pub const NUM_TOKENS: usize = 4;
/// Players a board has room for. This is also the number of start offsets
/// along the main track, regardless of how many players take part.
pub const MAX_PLAYERS: usize = 4;
/// The position of a token that has not entered the track yet.
pub const HOME: i8 = -1;

/// A single square of the board grid, `x` being the column and `y` the row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i8,
    pub y: i8,
}

impl Cell {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Maps the linear position of a token to a cell of the board.
///
/// Every player walks the same cyclic main track, starting at their own
/// offset, and then turns into their own home stretch. The last cell of the
/// home stretch is the finish.
#[derive(Clone, Debug)]
pub struct PathModel {
    main_track: Vec<Cell>,
    home_stretches: [Vec<Cell>; MAX_PLAYERS],
    safe_cells: BTreeSet<Cell>,
}

impl Default for PathModel {
    fn default() -> Self {
        Self::standard()
    }
}

impl PathModel {
    /// The usual 15x15 cross-shaped board: a 52 cell main track and
    /// home stretches of 6 cells each.
    pub fn standard() -> Self {
        let main_track = standard_main_track();
        let home_stretches = [
            (1..=6).map(|x| Cell::new(x, 7)).collect(),
            (1..=6).map(|y| Cell::new(7, y)).collect(),
            (8..=13).rev().map(|x| Cell::new(x, 7)).collect(),
            (8..=13).rev().map(|y| Cell::new(7, y)).collect(),
        ];
        // Each entry cell and the star cell eight steps after it
        let spacing = main_track.len() / MAX_PLAYERS;
        let safe_cells = (0..MAX_PLAYERS)
            .flat_map(|p| [p * spacing, p * spacing + 8])
            .map(|idx| main_track[idx % main_track.len()])
            .collect();
        Self {
            main_track,
            home_stretches,
            safe_cells,
        }
    }

    /// The length `L` of the shared main track.
    pub fn track_len(&self) -> usize {
        self.main_track.len()
    }

    /// The length `H` of every home stretch.
    pub fn home_stretch_len(&self) -> usize {
        self.home_stretches[0].len()
    }

    /// `L + H - 1`, the position at which a token is finished.
    pub fn finish_position(&self) -> i8 {
        (self.track_len() + self.home_stretch_len() - 1) as i8
    }

    /// Where on the main track the given player enters.
    pub fn start_offset(&self, player: usize) -> usize {
        player * (self.track_len() / MAX_PLAYERS)
    }

    pub fn main_track(&self) -> &[Cell] {
        &self.main_track
    }

    pub fn home_stretch(&self, player: usize) -> Option<&[Cell]> {
        self.home_stretches.get(player).map(Vec::as_slice)
    }

    pub fn safe_cells(&self) -> &BTreeSet<Cell> {
        &self.safe_cells
    }

    pub fn is_safe(&self, cell: Cell) -> bool {
        self.safe_cells.contains(&cell)
    }

    /// The cell where a token of `player` is when it has just entered.
    pub fn entry_cell(&self, player: usize) -> Option<Cell> {
        self.cell_of(player, 0)
    }

    /// The board cell for a token of `player` at linear `position`.
    ///
    /// Returns `None` for tokens at home (they are not on the path, see
    /// [`Self::yard_cell()`]) and for positions that are out of range.
    pub fn cell_of(&self, player: usize, position: i8) -> Option<Cell> {
        if player >= MAX_PLAYERS || position < 0 {
            return None;
        }
        let position = position as usize;
        let track_len = self.track_len();
        if position < track_len {
            Some(self.main_track[(position + self.start_offset(player)) % track_len])
        } else {
            self.home_stretches[player].get(position - track_len).copied()
        }
    }

    /// Where a token waiting at home is drawn. Each player's yard is a 2x2
    /// block in the corner next to their entry cell.
    pub fn yard_cell(&self, player: usize, index: usize) -> Option<Cell> {
        const YARD_CORNERS: [Cell; MAX_PLAYERS] = [
            Cell::new(2, 2),
            Cell::new(11, 2),
            Cell::new(11, 11),
            Cell::new(2, 11),
        ];
        if index >= NUM_TOKENS {
            return None;
        }
        YARD_CORNERS.get(player).map(|corner| {
            Cell::new(corner.x + (index % 2) as i8, corner.y + (index / 2) as i8)
        })
    }
}

fn standard_main_track() -> Vec<Cell> {
    let mut track = Vec::with_capacity(52);
    track.extend((1..=5).map(|x| Cell::new(x, 6)));
    track.extend((0..=5).rev().map(|y| Cell::new(6, y)));
    track.push(Cell::new(7, 0));
    track.extend((0..=5).map(|y| Cell::new(8, y)));
    track.extend((9..=14).map(|x| Cell::new(x, 6)));
    track.push(Cell::new(14, 7));
    track.extend((9..=14).rev().map(|x| Cell::new(x, 8)));
    track.extend((9..=14).map(|y| Cell::new(8, y)));
    track.push(Cell::new(7, 14));
    track.extend((9..=14).rev().map(|y| Cell::new(6, y)));
    track.extend((0..=5).rev().map(|x| Cell::new(x, 8)));
    track.push(Cell::new(0, 7));
    track.push(Cell::new(0, 6));
    track
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_dimensions() {
        let path = PathModel::standard();
        assert_eq!(path.track_len(), 52);
        assert_eq!(path.home_stretch_len(), 6);
        assert_eq!(path.finish_position(), 57);
        assert_eq!(path.safe_cells().len(), 8);
    }

    #[test]
    fn main_track_is_connected_and_unique() {
        let path = PathModel::standard();
        let track = path.main_track();
        let unique: BTreeSet<Cell> = track.iter().copied().collect();
        assert_eq!(unique.len(), track.len());
        for (idx, cell) in track.iter().enumerate() {
            let next = track[(idx + 1) % track.len()];
            assert!((cell.x - next.x).abs() <= 1 && (cell.y - next.y).abs() <= 1);
            assert!((0..BOARD_SIZE).contains(&cell.x) && (0..BOARD_SIZE).contains(&cell.y));
        }
    }

    #[test]
    fn entry_cells_are_distinct_and_safe() {
        let path = PathModel::standard();
        let entries: BTreeSet<Cell> = (0..MAX_PLAYERS)
            .map(|p| path.entry_cell(p).unwrap())
            .collect();
        assert_eq!(entries.len(), MAX_PLAYERS);
        assert!(entries.iter().all(|&cell| path.is_safe(cell)));
        assert_eq!(path.entry_cell(0), Some(Cell::new(1, 6)));
        assert_eq!(path.entry_cell(1), Some(Cell::new(8, 1)));
        assert_eq!(path.entry_cell(2), Some(Cell::new(13, 8)));
        assert_eq!(path.entry_cell(3), Some(Cell::new(6, 13)));
    }

    #[test]
    fn home_stretch_follows_last_track_cell() {
        let path = PathModel::standard();
        for player in 0..MAX_PLAYERS {
            let last = path.cell_of(player, 51).unwrap();
            let first_home = path.cell_of(player, 52).unwrap();
            assert!((last.x - first_home.x).abs() <= 1 && (last.y - first_home.y).abs() <= 1);
            assert_eq!(path.cell_of(player, 57), path.home_stretch(player).unwrap().last().copied());
        }
    }

    #[test]
    fn positions_out_of_range() {
        let path = PathModel::standard();
        assert_eq!(path.cell_of(0, HOME), None);
        assert_eq!(path.cell_of(0, 58), None);
        assert_eq!(path.cell_of(4, 0), None);
        assert_eq!(path.yard_cell(0, 4), None);
        assert_eq!(path.yard_cell(3, 3), Some(Cell::new(3, 12)));
    }
}
