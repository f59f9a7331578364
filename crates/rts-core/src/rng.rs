//! Deterministic scene-level RNG.
//!
//! The AI core itself is deterministic and never draws random numbers; the
//! RNG is used when populating a scene (scattering resource piles, jittering
//! spawn positions) so that the same seed always yields the same layout.
//! Child generators are derived by mixing an offset with the 64-bit
//! fractional golden-ratio constant, so independent setup stages never share
//! a stream.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Point;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG for scene setup.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` for an independent setup stage.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform point on the ground plane inside a disc of `radius` around
    /// `center` (rejection sampling; `radius <= 0` returns `center`).
    pub fn point_in_disc(&mut self, center: Point, radius: f32) -> Point {
        if radius <= 0.0 {
            return center;
        }
        loop {
            let dx = self.0.gen_range(-1.0f32..=1.0);
            let dz = self.0.gen_range(-1.0f32..=1.0);
            if dx * dx + dz * dz <= 1.0 {
                return Point::new(center.x + dx * radius, center.y, center.z + dz * radius);
            }
        }
    }
}
