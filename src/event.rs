use crate::{Cell, GameStatus};

/// Notifications fired by [`Game`](crate::Game), synchronously and in order,
/// within the command that caused them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    CellRevealed(Cell),
    /// Fired on every flag toggle, including the automatic flagging of mines
    /// on a win. The carried cell holds the new flag state.
    CellFlagged(Cell),
    GameWon,
    /// Carries the mine that ended the game.
    GameLost(Cell),
    StatusChanged(GameStatus),
}

pub trait GameObserver: Send {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}
