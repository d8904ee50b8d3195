//! Scoring module - classic line clear points
//!
//! Only cleared lines score, with no level multiplier, combo or drop bonus.

use crate::types::LINE_SCORES;

/// Points awarded for clearing `rows` lines with one lock
///
/// 1 → 40, 2 → 100, 3 → 300, 4 → 1200. Anything else scores nothing.
pub fn points_for(rows: usize) -> u32 {
    LINE_SCORES.get(rows).copied().unwrap_or(0)
}
