//! Errors raised while reading a board from its wire form.

use super::BOARD_LEN;

/// Error produced when board text cannot be turned into a [`Board`](super::Board)
/// or is not acceptable as the opening position of a new game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The text does not hold exactly nine cells.
    #[display("Board must have {} cells, got {}", BOARD_LEN, _0)]
    WrongLength(usize),

    /// A cell holds something other than `-`, `X` or `O`.
    #[display("Illegal symbol {:?} at index {}", symbol, index)]
    IllegalSymbol {
        /// Index of the offending cell.
        index: usize,
        /// The character found there.
        symbol: char,
    },

    /// A new game may be seeded with at most one mark.
    #[display("A new board may hold at most one mark, got {}", _0)]
    TooManyMarks(usize),
}

impl std::error::Error for BoardError {}
