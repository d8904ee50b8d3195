//! RNG module - piece generation and the preview queue
//!
//! The default randomizer draws each piece independently and uniformly from the seven
//! kinds, so repeats and droughts are possible. A 7-bag randomizer (one of each kind per
//! shuffled bag) is available as an opt-in, and a scripted randomizer replays a fixed
//! sequence for tests and replays.
//!
//! All randomness comes from a small seeded LCG so a game is reproducible from its seed.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // 0 is a valid LCG state, but keep it distinct from "unseeded" callers
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Which randomizer a game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomizerKind {
    /// Independent uniform draws
    #[default]
    Uniform,
    /// Shuffled bags of all seven kinds
    Bag,
}

/// Source of upcoming piece kinds
#[derive(Debug, Clone)]
pub enum Randomizer {
    Uniform(SimpleRng),
    Bag {
        rng: SimpleRng,
        bag: [PieceKind; 7],
        index: usize,
    },
    /// Cycles through a fixed sequence
    Scripted { sequence: Vec<PieceKind>, index: usize },
}

impl Randomizer {
    pub fn new(kind: RandomizerKind, seed: u32) -> Self {
        match kind {
            RandomizerKind::Uniform => Self::uniform(seed),
            RandomizerKind::Bag => Self::bag(seed),
        }
    }

    pub fn uniform(seed: u32) -> Self {
        Randomizer::Uniform(SimpleRng::new(seed))
    }

    pub fn bag(seed: u32) -> Self {
        Randomizer::Bag {
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            // Start exhausted so the first draw shuffles a fresh bag.
            index: PieceKind::ALL.len(),
        }
    }

    /// Replay `sequence` forever; an empty sequence falls back to the catalog order.
    pub fn scripted(sequence: impl Into<Vec<PieceKind>>) -> Self {
        let mut sequence = sequence.into();
        if sequence.is_empty() {
            sequence = PieceKind::ALL.to_vec();
        }
        Randomizer::Scripted { sequence, index: 0 }
    }

    /// Draw the next piece kind
    pub fn next(&mut self) -> PieceKind {
        match self {
            Randomizer::Uniform(rng) => {
                PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            Randomizer::Bag { rng, bag, index } => {
                if *index >= bag.len() {
                    *bag = PieceKind::ALL;
                    rng.shuffle(bag);
                    *index = 0;
                }
                let piece = bag[*index];
                *index += 1;
                piece
            }
            Randomizer::Scripted { sequence, index } => {
                let piece = sequence[*index % sequence.len()];
                *index = (*index + 1) % sequence.len();
                piece
            }
        }
    }

    /// Append draws while `queue.len() <= lookahead`
    pub fn refill_queue(&mut self, queue: &mut VecDeque<PieceKind>, lookahead: usize) {
        while queue.len() <= lookahead {
            queue.push_back(self.next());
        }
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::uniform(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_uniform_draws_every_kind() {
        let mut randomizer = Randomizer::uniform(99);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let kind = randomizer.next();
            let idx = PieceKind::ALL.iter().position(|&k| k == kind).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "uniform draws missed a kind: {seen:?}");
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut randomizer = Randomizer::bag(1);

        for _ in 0..3 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| randomizer.next()).collect();
            drawn.sort_by_key(|k| k.as_str());
            let mut all = PieceKind::ALL.to_vec();
            all.sort_by_key(|k| k.as_str());
            assert_eq!(drawn, all);
        }
    }

    #[test]
    fn test_scripted_cycles() {
        let mut randomizer = Randomizer::scripted(vec![PieceKind::O, PieceKind::I]);
        assert_eq!(randomizer.next(), PieceKind::O);
        assert_eq!(randomizer.next(), PieceKind::I);
        assert_eq!(randomizer.next(), PieceKind::O);
    }

    #[test]
    fn test_refill_queue_to_lookahead_plus_one() {
        let mut randomizer = Randomizer::uniform(5);
        let mut queue = VecDeque::new();

        randomizer.refill_queue(&mut queue, 1);
        assert_eq!(queue.len(), 2);

        // Already above lookahead: untouched
        randomizer.refill_queue(&mut queue, 1);
        assert_eq!(queue.len(), 2);

        queue.pop_front();
        queue.pop_front();
        randomizer.refill_queue(&mut queue, 3);
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Randomizer::new(RandomizerKind::Uniform, 42);
        let mut b = Randomizer::new(RandomizerKind::Uniform, 42);
        for _ in 0..50 {
            assert_eq!(a.next(), b.next());
        }
    }
}
