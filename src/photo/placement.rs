// SPDX-License-Identifier: GPL-3.0-only

//! Random tilt and ejection jitter for new cards

use super::record::{Offset, Position};
use crate::constants::placement::{
    EJECT_JITTER_MAX, EJECT_RISE, MAX_TILT_DEGREES, ORIGIN_BOTTOM_OFFSET, ORIGIN_X,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable source of placement randomness
#[derive(Debug, Clone)]
pub struct Placement {
    rng: StdRng,
}

impl Placement {
    /// Entropy-seeded generator for normal use
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic generator for tests and reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn point of a new card for a wall of the given height
    pub fn origin(wall_height: f32) -> Position {
        Position::new(ORIGIN_X, wall_height - ORIGIN_BOTTOM_OFFSET)
    }

    /// Tilt in degrees, uniform in `[-MAX_TILT_DEGREES, MAX_TILT_DEGREES)`
    pub fn tilt(&mut self) -> f32 {
        self.rng.random_range(-MAX_TILT_DEGREES..MAX_TILT_DEGREES)
    }

    /// Ejection offset: fixed rise, jitter uniform in `[0, EJECT_JITTER_MAX)`
    pub fn ejection(&mut self) -> Offset {
        Offset {
            dx: self.rng.random_range(0.0..EJECT_JITTER_MAX),
            dy: -EJECT_RISE,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilt_in_range() {
        let mut placement = Placement::seeded(7);
        for _ in 0..1000 {
            let tilt = placement.tilt();
            assert!((-5.0..5.0).contains(&tilt), "tilt {tilt} out of range");
        }
    }

    #[test]
    fn test_ejection_in_range() {
        let mut placement = Placement::seeded(7);
        for _ in 0..1000 {
            let offset = placement.ejection();
            assert_eq!(offset.dy, -200.0);
            assert!((0.0..50.0).contains(&offset.dx), "jitter {} out of range", offset.dx);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Placement::seeded(42);
        let mut b = Placement::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.tilt(), b.tilt());
            assert_eq!(a.ejection(), b.ejection());
        }
    }

    #[test]
    fn test_origin_sits_above_camera() {
        assert_eq!(Placement::origin(900.0), Position::new(50.0, 450.0));
    }
}
