use crate::{GameState, HistoryAction, HistoryError};

/// Snapshots for undo and redo.
///
/// A snapshot of the state is recorded before every move. Undo and redo
/// swap the current state with the top of the respective stack. Recording
/// a new move leaves pending redo entries in place.
#[derive(Clone, Debug, Default)]
pub struct History {
    past: Vec<GameState>,
    future: Vec<GameState>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers `state` as it was before a move.
    pub fn record(&mut self, state: GameState) {
        self.past.push(state);
    }

    pub fn undo(&mut self, current: &mut GameState) -> Result<(), HistoryError> {
        let previous = self.past.pop().ok_or(HistoryError::EmptyHistory {
            action: HistoryAction::Undo,
        })?;
        self.future.push(std::mem::replace(current, previous));
        Ok(())
    }

    pub fn redo(&mut self, current: &mut GameState) -> Result<(), HistoryError> {
        let next = self.future.pop().ok_or(HistoryError::EmptyHistory {
            action: HistoryAction::Redo,
        })?;
        self.past.push(std::mem::replace(current, next));
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
