//! Core domain types for tic-tac-toe.

use super::error::BoardError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const BOARD_LEN: usize = 9;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Wire symbol for this player's mark.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Wire symbol for the square: `-`, `X` or `O`.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '-',
            Square::Occupied(player) => player.symbol(),
        }
    }

    /// Reads a square from its wire symbol, ignoring case.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            '-' => Some(Square::Empty),
            'X' => Some(Square::Occupied(Player::X)),
            'O' => Some(Square::Occupied(Player::O)),
            _ => None,
        }
    }

    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Squares are stored in row-major order, so a cell at index `i` sits on
/// row `i / 3` and column `i % 3`. On the wire a board is a nine character
/// string over `-`, `X` and `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    squares: [Square; BOARD_LEN],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; BOARD_LEN],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; BOARD_LEN] {
        &self.squares
    }

    /// Positions that are still free, in index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Every placed mark with its position, in index order.
    pub fn marks(&self) -> impl Iterator<Item = (Position, Player)> + '_ {
        Position::ALL
            .into_iter()
            .filter_map(move |pos| self.get(pos).player().map(|player| (pos, player)))
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.marks().count()
    }

    /// Checks if the board has no free square left.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns the single seed mark of an opening board.
    ///
    /// A new game starts either empty or with exactly one mark already
    /// placed by the client. Any other board is rejected.
    #[instrument(skip(self), fields(board = %self))]
    pub fn seed_mark(&self) -> Result<Option<Player>, BoardError> {
        let mut marks = self.marks();
        match (marks.next(), marks.next()) {
            (None, _) => Ok(None),
            (Some((_, player)), None) => Ok(Some(player)),
            (Some(_), Some(_)) => Err(BoardError::TooManyMarks(self.occupied())),
        }
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses the wire form. Symbols are matched case-insensitively.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let len = text.chars().count();
        if len != BOARD_LEN {
            return Err(BoardError::WrongLength(len));
        }

        let mut squares = [Square::Empty; BOARD_LEN];
        for (index, symbol) in text.chars().enumerate() {
            squares[index] =
                Square::from_symbol(symbol).ok_or(BoardError::IllegalSymbol { index, symbol })?;
        }
        Ok(Self { squares })
    }
}

impl TryFrom<String> for Board {
    type Error = BoardError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_string()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.squares
            .iter()
            .try_for_each(|square| write!(f, "{}", square.symbol()))
    }
}

/// Current status of the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum GameStatus {
    /// Game is ongoing.
    #[default]
    #[serde(rename = "RUNNING")]
    #[strum(serialize = "RUNNING")]
    Running,
    /// X completed a line.
    #[serde(rename = "X_WON")]
    #[strum(serialize = "X_WON")]
    XWon,
    /// O completed a line.
    #[serde(rename = "O_WON")]
    #[strum(serialize = "O_WON")]
    OWon,
    /// Board filled up without a winner.
    #[serde(rename = "DRAW")]
    #[strum(serialize = "DRAW")]
    Draw,
}

impl GameStatus {
    /// Status for a win by the given player.
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::X => GameStatus::XWon,
            Player::O => GameStatus::OWon,
        }
    }

    /// Terminal statuses are absorbing.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Running
    }
}
