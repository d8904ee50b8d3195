//! Core game logic - a deterministic falling-block simulation
//!
//! Everything here is pure state and rules: no timers, no rendering, no input devices.
//! The host drives the game by forwarding [`GameAction`](types::GameAction)s and calling
//! [`GameState::soft_drop_tick`] on its own schedule, and observes it through events and
//! snapshots.
//!
//! # Module Structure
//!
//! - [`board`]: the grid with collision tests, merging and row clearing
//! - [`pieces`]: the seven shape matrices and in-place rotation
//! - [`rng`]: seeded piece generation (uniform, 7-bag, scripted)
//! - [`scoring`]: points per cleared row count
//! - [`events`]: synchronous publish/subscribe for game notifications
//! - [`game_state`]: the spawn / fall / lock / clear state machine
//! - [`snapshot`]: serializable rendering feed
//! - [`config`]: construction-time parameters loaded from TOML
//!
//! # Game Rules
//!
//! - Pieces spawn on row 0, centered, and fall one row per gravity step
//! - Rotation turns the matrix in place with no wall kicks
//! - A piece that cannot fall locks; a piece that cannot leave row 0 ends the game
//! - Only completed rows inside the locked piece's span are cleared
//! - Clearing 1, 2, 3 or 4 rows at once scores 40, 100, 300 or 1200
//!
//! # Example
//!
//! ```
//! use blockdrop_core::{GameConfig, GameState, Randomizer};
//! use blockdrop_core::types::{GameAction, GameStatus, PieceKind};
//!
//! let mut game =
//!     GameState::with_randomizer(&GameConfig::default(), Randomizer::scripted([PieceKind::O]))
//!         .unwrap();
//! game.start();
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.status(), GameStatus::Running);
//! assert_eq!(game.board().occupied_count(), 4);
//! ```

pub mod board;
pub mod config;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockdrop_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use events::{EventBus, EventListener, SubscriptionId};
pub use game_state::{GameState, Phase, Step, Tetromino};
pub use pieces::{get_shape, Shape};
pub use rng::{Randomizer, RandomizerKind, SimpleRng};
pub use scoring::points_for;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
