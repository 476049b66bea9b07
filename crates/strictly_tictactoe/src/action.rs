//! Half-moves and whole-board transition checks.
//!
//! Clients never name a cell directly; they submit the board they want to
//! see next. A submission is legal only if it differs from the stored board
//! by exactly one newly placed mark of the client's own symbol.

use super::{Board, BoardError, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -> {}", self.player, self.position.label())
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The submitted board could not be read.
    #[display("Malformed board: {}", _0)]
    Malformed(BoardError),

    /// The submitted board is identical to the stored one.
    #[display("Board is unchanged")]
    Unchanged,

    /// More than one square differs from the stored board.
    #[display("Only one square may change per move, {} changed", _0)]
    TooManyChanges(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The new mark is not the client's symbol.
    #[display("Square {} must receive {}, got {:?}", position, expected, found)]
    WrongSymbol {
        /// Square that changed.
        position: Position,
        /// The client's symbol.
        expected: Player,
        /// What the submission placed there.
        found: Square,
    },

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        MoveError::Malformed(err)
    }
}

/// Validates that `next` follows `current` by a single mark of `player`.
///
/// Returns the accepted move. Nothing is mutated; callers apply `next`
/// only after this returns `Ok`.
#[instrument(fields(current = %current, next = %next, player = %player))]
pub fn validate_transition(
    current: &Board,
    next: &Board,
    player: Player,
) -> Result<Move, MoveError> {
    let changed: Vec<Position> = Position::ALL
        .into_iter()
        .filter(|&pos| current.get(pos) != next.get(pos))
        .collect();

    let position = match changed.as_slice() {
        [] => {
            debug!("Rejected unchanged board");
            return Err(MoveError::Unchanged);
        }
        [position] => *position,
        _ => {
            warn!(count = changed.len(), "Rejected multi-square change");
            return Err(MoveError::TooManyChanges(changed.len()));
        }
    };

    if !current.is_empty(position) {
        warn!(%position, "Rejected overwrite of occupied square");
        return Err(MoveError::SquareOccupied(position));
    }

    let found = next.get(position);
    if found != Square::Occupied(player) {
        warn!(%position, ?found, "Rejected foreign symbol");
        return Err(MoveError::WrongSymbol {
            position,
            expected: player,
            found,
        });
    }

    Ok(Move::new(player, position))
}
