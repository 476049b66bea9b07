//! Tic-tac-toe rules for a client playing against an automated responder.
//!
//! Clients submit whole boards rather than single cells. This crate decides
//! whether such a submission is a legal half-move, evaluates wins and draws,
//! and picks the responder's counter-move.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use strictly_tictactoe::{Board, Game, GameStatus};
//!
//! let opening: Board = "---------".parse()?;
//! let mut game = Game::start(opening, ChaCha8Rng::seed_from_u64(1))?;
//! game.respond();
//! assert_eq!(game.board().occupied(), 1);
//! assert_eq!(game.status(), GameStatus::Running);
//! # Ok::<(), strictly_tictactoe::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod error;
mod game;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError, validate_transition};
pub use error::BoardError;
pub use game::{Game, GameId, GameRecord, Symbols};
pub use position::Position;
pub use rules::evaluate_status;
pub use types::{BOARD_LEN, Board, GameStatus, Player, Square};
