//! In-memory registry of running games.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_tictactoe::{Board, BoardError, Game, GameId, GameRecord, MoveError};
use tracing::{debug, info, instrument, warn};

/// Error returned by registry operations.
///
/// None of these leave a partial mutation behind.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum RegistryError {
    /// The opening board of a new game was rejected.
    #[display("Invalid board input: {}", _0)]
    #[from]
    InvalidInput(BoardError),

    /// A submitted move was rejected.
    #[display("Invalid move: {}", _0)]
    #[from]
    InvalidMove(MoveError),

    /// No game with this identifier exists, or it is not a valid identifier.
    #[display("Game not found: {}", _0)]
    NotFound(#[error(not(source))] String),
}

#[derive(Debug)]
struct Inner {
    games: HashMap<GameId, Game>,
    // Seeds one generator per game.
    seeder: ChaCha8Rng,
}

/// Shared store mapping game identifiers to games.
///
/// Cloning yields another handle to the same store. Every read and write
/// goes through one lock, so a game is only ever touched by one request
/// at a time.
#[derive(Debug, Clone)]
pub struct Registry {
    inner: Arc<Mutex<Inner>>,
}

impl Registry {
    /// Creates an empty registry seeded from the operating system.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game registry");
        Self::with_seeder(ChaCha8Rng::from_os_rng())
    }

    /// Creates an empty registry whose responder moves are reproducible.
    #[instrument]
    pub fn with_seed(seed: u64) -> Self {
        info!(seed, "Creating seeded game registry");
        Self::with_seeder(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_seeder(seeder: ChaCha8Rng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                games: HashMap::new(),
                seeder,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Validation always precedes mutation, so a poisoned map is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a game from the client's opening board.
    ///
    /// The board may be empty or hold one client mark. The responder moves
    /// once before the game is returned.
    #[instrument(skip(self))]
    pub fn create(&self, board: &str) -> Result<GameRecord, RegistryError> {
        let board = board.parse::<Board>().inspect_err(|e| {
            warn!(error = %e, "Rejected opening board");
        })?;

        let mut inner = self.lock();
        let rng = ChaCha8Rng::from_rng(&mut inner.seeder);
        let mut game = Game::start(board, rng).inspect_err(|e| {
            warn!(error = %e, "Rejected opening board");
        })?;
        game.respond();

        let record = game.record();
        inner.games.insert(game.id(), game);
        info!(game_id = %record.id(), board = %record.board(), "Created game");
        Ok(record)
    }

    /// Returns the game with the given identifier.
    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Result<GameRecord, RegistryError> {
        let game_id = parse_id(id)?;
        self.lock()
            .games
            .get(&game_id)
            .map(Game::record)
            .ok_or_else(|| not_found(id))
    }

    /// Removes a game. Identifiers are never handed out again.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<(), RegistryError> {
        let game_id = parse_id(id)?;
        match self.lock().games.remove(&game_id) {
            Some(_) => {
                info!(game_id = %game_id, "Deleted game");
                Ok(())
            }
            None => Err(not_found(id)),
        }
    }

    /// Snapshot of every stored game, in no particular order.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<GameRecord> {
        let records: Vec<_> = self.lock().games.values().map(Game::record).collect();
        debug!(count = records.len(), "Listed games");
        records
    }

    /// Applies a client's submitted board and the responder's answer.
    ///
    /// The returned game may already be finished.
    #[instrument(skip(self))]
    pub fn apply_move(&self, id: &str, board: &str) -> Result<GameRecord, RegistryError> {
        let game_id = parse_id(id)?;
        let mut inner = self.lock();
        let game = inner.games.get_mut(&game_id).ok_or_else(|| not_found(id))?;

        let next = board.parse::<Board>().map_err(MoveError::from).inspect_err(|e| {
            warn!(error = %e, "Rejected submitted board");
        })?;
        game.play(next)?;

        let record = game.record();
        info!(
            game_id = %game_id,
            board = %record.board(),
            status = %record.status(),
            "Applied move"
        );
        Ok(record)
    }

    /// Stores a game at an arbitrary position under a fresh identifier.
    ///
    /// The board only has to be well formed; the opening-board mark limit
    /// of [`Registry::create`] does not apply and the responder does not move.
    #[cfg(feature = "test-support")]
    #[instrument(skip(self))]
    pub fn insert_position(
        &self,
        board: &str,
        client: strictly_tictactoe::Player,
    ) -> Result<GameRecord, RegistryError> {
        let board = board.parse::<Board>()?;
        let mut inner = self.lock();
        let rng = ChaCha8Rng::from_rng(&mut inner.seeder);
        let symbols = strictly_tictactoe::Symbols::for_client(client);
        let game = Game::from_position(board, symbols, rng);

        let record = game.record();
        inner.games.insert(game.id(), game);
        debug!(game_id = %record.id(), "Inserted game");
        Ok(record)
    }

    /// Number of stored games.
    pub fn len(&self) -> usize {
        self.lock().games.len()
    }

    /// Whether no game is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_id(id: &str) -> Result<GameId, RegistryError> {
    id.parse().map_err(|_| {
        debug!(id, "Malformed game id");
        not_found(id)
    })
}

fn not_found(id: &str) -> RegistryError {
    RegistryError::NotFound(id.to_string())
}
