//! Game state module - the spawn / fall / lock / clear state machine
//!
//! [`GameState`] owns the board, the active piece, the preview queue and the event bus.
//! It never schedules itself: the host calls [`GameState::soft_drop_tick`] at the cadence
//! reported by [`GameState::fall_interval_ms`] and forwards input as [`GameAction`]s.
//!
//! Every call runs to completion before returning, and events are delivered to subscribers
//! synchronously inside the call that caused them.

use std::collections::VecDeque;

use crate::config::{ConfigError, GameConfig};
use crate::events::{EventBus, EventListener, SubscriptionId};
use crate::pieces::{get_shape, spawn_x, Shape};
use crate::rng::Randomizer;
use crate::scoring::points_for;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::Board;

/// Fine-grained machine phase
///
/// `Spawning`, `Locking` and `ClearingLines` are passed through within a single call; between
/// calls the machine rests in `Idle`, `Falling`, `Paused` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Spawning,
    Falling,
    Locking,
    ClearingLines,
    GameOver,
    Paused,
}

/// Result of a gravity step or hard drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The piece moved down one row
    Fell,
    /// The piece merged into the board and the next one spawned
    Locked { rows_cleared: usize },
    /// The piece could not leave its spawn row
    GameOver,
    /// Not running, or nothing to move
    Ignored,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Current (possibly rotated) matrix, owned by this piece
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Tetromino {
    /// Create a piece centered horizontally on the spawn row
    pub fn new(kind: PieceKind, columns: usize) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(columns, shape.size()),
            y: 0,
        }
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self, direction: Direction) -> Self {
        Self {
            shape: self.shape.rotated(direction),
            ..*self
        }
    }

    fn collides(&self, board: &Board) -> bool {
        board.intersects(&self.shape, self.x, self.y)
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    queue: VecDeque<PieceKind>,
    randomizer: Randomizer,
    lookahead: usize,
    fall_interval_ms: u32,
    soft_drop_interval_ms: u32,
    status: GameStatus,
    phase: Phase,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    soft_dropping: bool,
    /// Host is animating a descent that has not been committed yet
    interpolating: bool,
    events: EventBus,
}

impl GameState {
    /// Create an idle game on the default board with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::build(&GameConfig::with_seed(seed), Randomizer::uniform(seed))
    }

    /// Create an idle game from a validated configuration
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let randomizer = Randomizer::new(config.randomizer, config.resolve_seed());
        Self::with_randomizer(config, randomizer)
    }

    /// Create an idle game with an explicit piece source
    pub fn with_randomizer(
        config: &GameConfig,
        randomizer: Randomizer,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, randomizer))
    }

    fn build(config: &GameConfig, randomizer: Randomizer) -> Self {
        Self {
            board: Board::with_dimensions(
                config.columns,
                config.visible_rows,
                config.hidden_rows,
            ),
            active: None,
            queue: VecDeque::with_capacity(config.lookahead + 1),
            randomizer,
            lookahead: config.lookahead,
            fall_interval_ms: config.fall_interval_ms,
            soft_drop_interval_ms: config.soft_drop_interval_ms,
            status: GameStatus::Idle,
            phase: Phase::Idle,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            soft_dropping: false,
            interpolating: false,
            events: EventBus::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Rows cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Upcoming pieces, head first
    pub fn queue(&self) -> &VecDeque<PieceKind> {
        &self.queue
    }

    /// The piece that will spawn next
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.queue.front().copied()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup (puzzles, editors, tests)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn is_interpolating(&self) -> bool {
        self.interpolating
    }

    /// Milliseconds the host should wait before the next [`soft_drop_tick`](Self::soft_drop_tick)
    pub fn fall_interval_ms(&self) -> u32 {
        if self.soft_dropping {
            self.soft_drop_interval_ms
        } else {
            self.fall_interval_ms
        }
    }

    pub fn subscribe<L>(&mut self, listener: L) -> SubscriptionId
    where
        L: EventListener + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn subscribe_channel(
        &mut self,
        sender: crossbeam_channel::Sender<GameEvent>,
    ) -> SubscriptionId {
        self.events.subscribe_channel(sender)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            log::trace!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Start (or restart) a session: empty board, fresh queue, first piece spawned
    ///
    /// No event is published.
    pub fn start(&mut self) {
        self.board.clear();
        self.queue.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.soft_dropping = false;
        self.interpolating = false;
        self.status = GameStatus::Running;

        self.spawn_piece();
        log::debug!(
            "game started on {}x{} board",
            self.board.width(),
            self.board.visible_rows()
        );
    }

    /// Abandon the session and return to idle
    pub fn stop(&mut self) {
        self.board.clear();
        self.queue.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.soft_dropping = false;
        self.interpolating = false;
        self.status = GameStatus::Idle;
        self.enter(Phase::Idle);
        log::debug!("game stopped");
    }

    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.status = GameStatus::Paused;
        self.enter(Phase::Paused);
        log::debug!("paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Running;
        self.enter(Phase::Falling);
        log::debug!("resumed");
        true
    }

    /// Pop the queue head into play, centered on the spawn row
    ///
    /// A spawn that already overlaps locked cells is left alone; the following failed
    /// descent from row 0 ends the game.
    fn spawn_piece(&mut self) {
        self.enter(Phase::Spawning);

        self.randomizer.refill_queue(&mut self.queue, self.lookahead);
        let Some(kind) = self.queue.pop_front() else {
            return;
        };
        self.randomizer.refill_queue(&mut self.queue, self.lookahead);

        let piece = Tetromino::new(kind, self.board.width());
        if piece.collides(&self.board) {
            log::debug!("{:?} spawned into occupied cells", kind);
        }
        self.active = Some(piece);
        self.enter(Phase::Falling);
    }

    /// Shift the active piece one column
    ///
    /// While a descent is being interpolated the row below must be free too, so the piece
    /// cannot slide into a cell it is about to fall onto.
    pub fn move_horizontal(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            self.events.publish(GameEvent::InvalidMove);
            return false;
        };

        let moved = active.shifted(direction.delta(), 0);
        let blocked = moved.collides(&self.board)
            || (self.interpolating && moved.shifted(0, 1).collides(&self.board));

        if blocked {
            log::trace!("move {} blocked at x={}", direction.as_str(), active.x);
            self.events.publish(GameEvent::InvalidMove);
            return false;
        }

        self.active = Some(moved);
        self.events.publish(GameEvent::Moved(direction));
        true
    }

    /// Turn the active piece 90° in place (no wall kicks)
    pub fn rotate(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            self.events.publish(GameEvent::InvalidMove);
            return false;
        };

        let rotated = active.rotated(direction);
        if rotated.collides(&self.board) {
            log::trace!("rotate {} blocked", direction.as_str());
            self.events.publish(GameEvent::InvalidMove);
            return false;
        }

        self.active = Some(rotated);
        self.events.publish(GameEvent::Rotated(direction));
        true
    }

    /// Gravity step: fall one row, or lock when there is no room below
    pub fn soft_drop_tick(&mut self) -> Step {
        if !self.is_running() {
            return Step::Ignored;
        }
        let Some(active) = self.active else {
            return Step::Ignored;
        };

        let below = active.shifted(0, 1);
        if below.collides(&self.board) {
            return self.lock_active();
        }

        self.active = Some(below);
        self.interpolating = false;
        Step::Fell
    }

    /// Fall to the lowest free row and lock immediately
    pub fn hard_drop(&mut self) -> Step {
        if !self.is_running() {
            return Step::Ignored;
        }
        let Some(mut active) = self.active else {
            return Step::Ignored;
        };

        while !active.shifted(0, 1).collides(&self.board) {
            active.y += 1;
        }
        self.active = Some(active);
        self.lock_active()
    }

    /// Switch to the soft drop cadence and take one step immediately
    pub fn soft_drop_start(&mut self) -> Step {
        if !self.is_running() {
            return Step::Ignored;
        }
        self.soft_dropping = true;
        self.soft_drop_tick()
    }

    /// Return to the normal cadence; false if soft drop was not active
    pub fn soft_drop_stop(&mut self) -> bool {
        std::mem::replace(&mut self.soft_dropping, false)
    }

    /// Mark whether the host is animating a descent that has not been ticked yet
    pub fn set_interpolating(&mut self, interpolating: bool) {
        self.interpolating = interpolating && self.is_running() && self.active.is_some();
    }

    /// The active piece can no longer descend
    fn lock_active(&mut self) -> Step {
        let Some(active) = self.active.take() else {
            return Step::Ignored;
        };
        self.interpolating = false;

        if active.y == 0 {
            self.game_over();
            return Step::GameOver;
        }

        self.enter(Phase::Locking);
        self.board
            .lock(&active.shape, active.x, active.y, active.kind);
        self.pieces_locked += 1;

        self.enter(Phase::ClearingLines);
        let top = active.y.max(0) as usize;
        let bottom = (active.y + active.shape.size() as i32 - 1).max(0) as usize;
        let full_rows = self.board.find_full_rows(top, bottom);
        let rows_cleared = self.board.clear_and_collapse(&full_rows);

        if rows_cleared > 0 {
            let points = points_for(rows_cleared);
            self.score += points;
            self.lines += rows_cleared as u32;
            log::debug!(
                "{:?} cleared {} rows for {} points (score {})",
                active.kind,
                rows_cleared,
                points,
                self.score
            );
            self.events
                .publish(GameEvent::RowsEliminated(rows_cleared as u32));
        }
        self.events.publish(GameEvent::Dropped);

        self.spawn_piece();
        Step::Locked { rows_cleared }
    }

    fn game_over(&mut self) {
        self.active = None;
        self.queue.clear();
        self.soft_dropping = false;
        self.interpolating = false;
        self.status = GameStatus::GameOver;
        self.enter(Phase::GameOver);
        log::debug!(
            "game over after {} pieces, score {}",
            self.pieces_locked,
            self.score
        );
        self.events.publish(GameEvent::GameOver);
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_horizontal(Direction::Left),
            GameAction::MoveRight => self.move_horizontal(Direction::Right),
            GameAction::RotateLeft => self.rotate(Direction::Left),
            GameAction::RotateRight => self.rotate(Direction::Right),
            GameAction::SoftDropStart => self.soft_drop_start() != Step::Ignored,
            GameAction::SoftDropStop => self.soft_drop_stop(),
            GameAction::HardDrop => self.hard_drop() != Step::Ignored,
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::Start => {
                self.start();
                true
            }
            GameAction::Stop => {
                self.stop();
                true
            }
        }
    }

    /// Fill `out` with the current rendering feed, reusing its allocations
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.hidden_rows = self.board.hidden_rows();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.active = self.active.map(ActiveSnapshot::from);
        out.preview.clear();
        out.preview.extend(self.queue.iter().copied());
        out.score = self.score;
        out.lines = self.lines;
        out.status = self.status;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
