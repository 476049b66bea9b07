//! A single game against the automated responder.

use super::action::{Move, MoveError, validate_transition};
use super::rules::evaluate_status;
use super::{Board, BoardError, GameStatus, Player, Square};
use derive_getters::Getters;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Opaque game identifier, generated server side and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Which symbol each side plays. Fixed for the life of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    client: Player,
    server: Player,
}

impl Symbols {
    /// Assigns symbols from the seed mark of an opening board.
    ///
    /// A seeded `O` means the client plays `O`; an empty board or a seeded
    /// `X` leaves the client on `X`. The server always takes the other one.
    pub fn assign(seed: Option<Player>) -> Self {
        let client = match seed {
            Some(Player::O) => Player::O,
            Some(Player::X) | None => Player::X,
        };
        Self::for_client(client)
    }

    /// Symbols with the client on `client`.
    pub fn for_client(client: Player) -> Self {
        Self {
            client,
            server: client.opponent(),
        }
    }

    /// The client's symbol.
    pub fn client(&self) -> Player {
        self.client
    }

    /// The automated responder's symbol.
    pub fn server(&self) -> Player {
        self.server
    }
}

/// Externally visible shape of a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameRecord {
    /// Game identifier.
    id: GameId,
    /// Nine character board.
    board: Board,
    /// Current status.
    status: GameStatus,
}

/// Tic-tac-toe game between a client and the automated responder.
///
/// Holds its own random source so concurrent games never share one.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    board: Board,
    status: GameStatus,
    symbols: Symbols,
    rng: ChaCha8Rng,
}

impl Game {
    /// Starts a game from a client-supplied opening board.
    ///
    /// The board may be empty or hold one mark. Symbols are assigned from
    /// that mark. The responder has not moved yet; see [`Game::respond`].
    #[instrument(skip(rng), fields(board = %board))]
    pub fn start(board: Board, rng: ChaCha8Rng) -> Result<Self, BoardError> {
        let seed = board.seed_mark()?;
        let symbols = Symbols::assign(seed);
        let game = Self::assemble(board, symbols, rng);
        info!(
            game_id = %game.id,
            client = %symbols.client(),
            server = %symbols.server(),
            "Started game"
        );
        Ok(game)
    }

    /// Builds a game at an arbitrary position under a fresh identifier.
    ///
    /// Skips the opening-board checks of [`Game::start`]. Status is
    /// evaluated from the board.
    #[cfg(any(test, feature = "test-support"))]
    pub fn from_position(board: Board, symbols: Symbols, rng: ChaCha8Rng) -> Self {
        Self::assemble(board, symbols, rng)
    }

    fn assemble(board: Board, symbols: Symbols, rng: ChaCha8Rng) -> Self {
        Self {
            id: GameId::generate(),
            status: evaluate_status(&board, GameStatus::Running),
            board,
            symbols,
            rng,
        }
    }

    /// Game identifier.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Symbol assignment.
    pub fn symbols(&self) -> Symbols {
        self.symbols
    }

    /// Snapshot of the externally visible fields.
    pub fn record(&self) -> GameRecord {
        GameRecord {
            id: self.id,
            board: self.board,
            status: self.status,
        }
    }

    /// Checks a submitted board against the stored one without applying it.
    #[instrument(skip(self), fields(game_id = %self.id, next = %next))]
    pub fn validate(&self, next: &Board) -> Result<Move, MoveError> {
        if self.status.is_terminal() {
            warn!(status = %self.status, "Move submitted to finished game");
            return Err(MoveError::GameOver);
        }
        validate_transition(&self.board, next, self.symbols.client)
    }

    /// Applies the client's submitted board, then lets the responder answer.
    ///
    /// The responder only moves if the client's move left the game running.
    /// On error the game is left untouched.
    #[instrument(skip(self), fields(game_id = %self.id, next = %next))]
    pub fn play(&mut self, next: Board) -> Result<Move, MoveError> {
        let mv = self.validate(&next)?;
        self.board = next;
        self.update_status();

        if !self.status.is_terminal() {
            self.respond();
            self.update_status();
        }

        info!(%mv, board = %self.board, status = %self.status, "Move applied");
        Ok(mv)
    }

    /// Places the responder's mark on a uniformly random empty square.
    ///
    /// Returns `None` without touching the board if the game is over or
    /// no square is free.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn respond(&mut self) -> Option<Move> {
        if self.status.is_terminal() {
            return None;
        }

        let empty = self.board.empty_positions();
        let Some(&position) = empty.choose(&mut self.rng) else {
            warn!(board = %self.board, "No free square for responder");
            return None;
        };

        let player = self.symbols.server;
        self.board.set(position, Square::Occupied(player));
        debug!(%position, %player, "Responder moved");
        Some(Move::new(player, position))
    }

    /// Re-evaluates the status from the current board.
    pub fn update_status(&mut self) -> GameStatus {
        self.status = evaluate_status(&self.board, self.status);
        self.status
    }
}
