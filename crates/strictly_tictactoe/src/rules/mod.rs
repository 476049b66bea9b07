//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from game
//! storage so the registry and the tests can call them directly.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner};

use crate::{Board, GameStatus};
use tracing::{debug, instrument};

/// Re-evaluates the status of a game after its board changed.
///
/// A terminal `previous` status is returned untouched, so the board is
/// never re-read once the game has ended. Otherwise lines are checked in
/// [`LINES`] order, then a full board becomes a draw.
#[instrument(fields(board = %board))]
pub fn evaluate_status(board: &Board, previous: GameStatus) -> GameStatus {
    if previous.is_terminal() {
        return previous;
    }

    let status = match check_winner(board) {
        Some(winner) => GameStatus::won_by(winner),
        None if is_full(board) => GameStatus::Draw,
        None => GameStatus::Running,
    };
    debug!(%status, "Evaluated status");
    status
}
