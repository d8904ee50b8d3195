//! Headless blockdrop runner (default binary).
//!
//! Plays one game with the greedy placement policy and prints a summary.
//!
//! ```text
//! blockdrop [--config PATH] [--seed N] [--pieces N]
//! ```

use std::path::PathBuf;

use anyhow::Result;

use blockdrop::core::GameState;
use blockdrop::headless::{load_config, parse_args, play, CONFIG_ENV};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;
    let config = load_config(&args, std::env::var_os(CONFIG_ENV).map(PathBuf::from))?;

    let mut state = GameState::from_config(&config)?;
    log::info!(
        "playing on {}x{} board ({:?} randomizer)",
        config.columns,
        config.visible_rows,
        config.randomizer
    );

    let summary = play(&mut state, args.max_pieces);

    println!("pieces: {}", summary.pieces);
    println!("lines:  {}", summary.lines);
    println!("score:  {}", summary.score);
    println!(
        "result: {}",
        if summary.game_over { "game over" } else { "stopped" }
    );
    Ok(())
}
