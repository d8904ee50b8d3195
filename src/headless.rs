//! Headless host: argument parsing, a greedy placement policy and a simple game driver.
//!
//! The driver plays without a clock: every piece is rotated and shifted to the column the
//! policy picks, then hard dropped.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, Result};

use crate::core::{Board, GameConfig, GameState, Step, Tetromino};
use crate::types::{Direction, GameAction, GameEvent, GameStatus};

/// Environment variable consulted when `--config` is not given
pub const CONFIG_ENV: &str = "BLOCKDROP_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadlessArgs {
    pub config: Option<PathBuf>,
    pub seed: Option<u32>,
    pub max_pieces: Option<u32>,
}

pub fn parse_args(args: &[String]) -> Result<HeadlessArgs> {
    let mut parsed = HeadlessArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                parsed.config = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                parsed.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--pieces" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --pieces"))?;
                parsed.max_pieces = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --pieces value: {}", v))?,
                );
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(parsed)
}

/// Resolve the configuration: `--config`, then `$BLOCKDROP_CONFIG`, then defaults.
/// A `--seed` overrides whatever the file says.
pub fn load_config(args: &HeadlessArgs, env_path: Option<PathBuf>) -> Result<GameConfig> {
    let mut config = match args.config.clone().or(env_path) {
        Some(path) => GameConfig::load_from_file(&path)
            .map_err(|e| anyhow!("{}: {}", path.display(), e))?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

/// Placement chosen for the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Clockwise quarter turns from the spawn orientation
    pub turns: u8,
    pub x: i32,
}

/// Pick the placement that clears the most rows while keeping the stack low and hole free
pub fn choose_placement(board: &Board, piece: &Tetromino) -> Option<Placement> {
    let mut best: Option<(i64, Placement)> = None;
    let mut candidate = *piece;

    for turns in 0..4u8 {
        let size = candidate.shape.size() as i32;
        for x in -size..board.width() as i32 {
            let mut y = candidate.y;
            if board.intersects(&candidate.shape, x, y) {
                continue;
            }
            while !board.intersects(&candidate.shape, x, y + 1) {
                y += 1;
            }

            let mut trial = board.clone();
            trial.lock(&candidate.shape, x, y, candidate.kind);
            let full = trial.find_full_rows(0, trial.height());
            let cleared = trial.clear_and_collapse(&full);
            let score = evaluate(&trial, cleared);

            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, Placement { turns, x }));
            }
        }
        candidate = candidate.rotated(Direction::Right);
    }

    best.map(|(_, p)| p)
}

fn evaluate(board: &Board, cleared: usize) -> i64 {
    let mut aggregate_height = 0i64;
    let mut holes = 0i64;

    for x in 0..board.width() as i32 {
        let mut seen_block = false;
        for y in 0..board.height() as i32 {
            if board.is_occupied(x, y) {
                if !seen_block {
                    aggregate_height += board.height() as i64 - y as i64;
                    seen_block = true;
                }
            } else if seen_block {
                holes += 1;
            }
        }
    }

    cleared as i64 * 80 - aggregate_height * 5 - holes * 35
}

/// Outcome of a headless session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub pieces: u32,
    pub score: u32,
    pub lines: u32,
    pub invalid_moves: u32,
    pub game_over: bool,
}

/// Play until game over or until `max_pieces` have locked
pub fn play(state: &mut GameState, max_pieces: Option<u32>) -> Summary {
    let invalid = Rc::new(RefCell::new(0u32));
    let sink = invalid.clone();
    let id = state.subscribe(move |event: &GameEvent| match event {
        GameEvent::InvalidMove => *sink.borrow_mut() += 1,
        GameEvent::RowsEliminated(rows) => log::info!("cleared {} rows", rows),
        GameEvent::GameOver => log::info!("game over"),
        other => log::trace!("event {:?}", other),
    });

    if state.status() != GameStatus::Running {
        state.start();
    }

    while state.status() == GameStatus::Running {
        if max_pieces.is_some_and(|max| state.pieces_locked() >= max) {
            break;
        }
        let Some(piece) = state.active() else {
            break;
        };

        if let Some(target) = choose_placement(state.board(), &piece) {
            log::trace!("{:?}: {} turns to x={}", piece.kind, target.turns, target.x);
            steer(state, target);
        }
        if state.hard_drop() == Step::GameOver {
            break;
        }
    }

    state.unsubscribe(id);
    let invalid_moves = *invalid.borrow();
    Summary {
        pieces: state.pieces_locked(),
        score: state.score(),
        lines: state.lines(),
        invalid_moves,
        game_over: state.status() == GameStatus::GameOver,
    }
}

fn steer(state: &mut GameState, target: Placement) {
    for _ in 0..target.turns {
        if !state.apply_action(GameAction::RotateRight) {
            return;
        }
    }
    while let Some(active) = state.active() {
        let action = match active.x.cmp(&target.x) {
            std::cmp::Ordering::Less => GameAction::MoveRight,
            std::cmp::Ordering::Greater => GameAction::MoveLeft,
            std::cmp::Ordering::Equal => return,
        };
        if !state.apply_action(action) {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&strings(&["--seed", "42", "--pieces", "10"])).unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.max_pieces, Some(10));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_parse_args_rejects_unknown() {
        assert!(parse_args(&strings(&["--level", "3"])).is_err());
        assert!(parse_args(&strings(&["--seed"])).is_err());
        assert!(parse_args(&strings(&["--seed", "abc"])).is_err());
    }

    #[test]
    fn test_seed_overrides_defaults() {
        let args = HeadlessArgs {
            seed: Some(5),
            ..HeadlessArgs::default()
        };
        let config = load_config(&args, None).unwrap();
        assert_eq!(config.seed, Some(5));
    }
}
