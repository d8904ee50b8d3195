//! Shared types module - plain data structures and constants
//!
//! Everything here is pure data with no game logic, so the same types can be used by the
//! simulation core, by a rendering layer reading snapshots, and by audio/score observers
//! listening to events.
//!
//! # Playfield Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `COLUMNS` | 10 | Cells per row |
//! | `VISIBLE_ROWS` | 20 | Rows shown to the player |
//! | `HIDDEN_ROWS` | 2 | Spawn rows above the visible area |
//! | `TOTAL_ROWS` | 22 | `VISIBLE_ROWS + HIDDEN_ROWS` |
//!
//! Row 0 is the topmost hidden row; row `TOTAL_ROWS - 1` is the floor.
//!
//! # Timing
//!
//! The core never schedules itself. These are the cadences a host loop is expected to use:
//!
//! - `FALL_INTERVAL_MS`: 300ms between gravity steps
//! - `SOFT_DROP_INTERVAL_MS`: 100ms between steps while soft dropping
//!
//! # Examples
//!
//! ```
//! use blockdrop_types::{Direction, GameAction, PieceKind, COLUMNS, TOTAL_ROWS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Direction::Left.delta(), -1);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(COLUMNS, 10);
//! assert_eq!(TOTAL_ROWS, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells
pub const COLUMNS: u8 = 10;

/// Rows visible to the player
pub const VISIBLE_ROWS: u8 = 20;

/// Rows above the visible area where pieces spawn
pub const HIDDEN_ROWS: u8 = 2;

/// Total rows held by the grid
pub const TOTAL_ROWS: u8 = VISIBLE_ROWS + HIDDEN_ROWS;

/// Number of preview pieces kept ahead of the spawn candidate
pub const LOOKAHEAD: usize = 1;

/// Gravity cadence in milliseconds
pub const FALL_INTERVAL_MS: u32 = 300;

/// Cadence while soft drop is held
pub const SOFT_DROP_INTERVAL_MS: u32 = 100;

/// Largest piece matrix edge (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Line clear points, indexed by rows cleared in a single lock.
///
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];


/// An RGB color attached to each piece identity.
///
/// Only renderers care about it; the simulation treats every occupied cell the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The seven tetromino identities
///
/// - **I**: Cyan, 4x4 matrix
/// - **J**: Blue, 3x3 matrix
/// - **L**: Orange, 3x3 matrix
/// - **O**: Yellow, 2x2 matrix
/// - **S**: Green-yellow, 3x3 matrix
/// - **T**: Purple, 3x3 matrix
/// - **Z**: Orange-red, 3x3 matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdrop_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Display color of the piece
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb(0, 255, 255),
            PieceKind::J => Rgb(0, 0, 255),
            PieceKind::L => Rgb(255, 165, 0),
            PieceKind::O => Rgb(255, 255, 0),
            PieceKind::S => Rgb(173, 255, 47),
            PieceKind::T => Rgb(128, 0, 128),
            PieceKind::Z => Rgb(255, 69, 0),
        }
    }
}

/// Horizontal direction used for both moves and rotations
///
/// For rotations, `Right` is clockwise and `Left` is counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column offset for a horizontal move
    pub fn delta(&self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Coarse lifecycle status of a game session
///
/// `Idle → Running` on start, `Running ↔ Paused` on pause/resume,
/// `Running → GameOver` when a piece cannot leave its spawn row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Logical input actions
///
/// Each maps to exactly one state machine operation. Key bindings live in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Rotate 90° counter-clockwise
    RotateLeft,
    /// Rotate 90° clockwise
    RotateRight,
    /// Switch to the soft drop cadence and step once
    SoftDropStart,
    /// Return to the normal fall cadence
    SoftDropStop,
    /// Drop to the resting row and lock
    HardDrop,
    Pause,
    Resume,
    /// Start (or restart) a session
    Start,
    /// Abandon the session and return to idle
    Stop,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdrop_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateRight"), Some(GameAction::RotateRight));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotateleft" => Some(GameAction::RotateLeft),
            "rotateright" => Some(GameAction::RotateRight),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropstop" => Some(GameAction::SoftDropStop),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "start" => Some(GameAction::Start),
            "stop" => Some(GameAction::Stop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateLeft => "rotateLeft",
            GameAction::RotateRight => "rotateRight",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::Start => "start",
            GameAction::Stop => "stop",
        }
    }
}

/// Notifications published by the core to its observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// A piece was merged into the grid
    Dropped,
    /// Rows were cleared by the last lock (always 1..=4)
    RowsEliminated(u32),
    /// The session ended
    GameOver,
    /// A move or rotation was rejected
    InvalidMove,
    Moved(Direction),
    Rotated(Direction),
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied by a locked piece of that kind
pub type Cell = Option<PieceKind>;
