//! Blockdrop (workspace facade crate).
//!
//! Re-exports the game crates under `blockdrop::{core,types}` and hosts the headless driver
//! used by the default binary.

pub use blockdrop_core as core;
pub use blockdrop_types as types;

pub mod headless;
