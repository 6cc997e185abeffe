use crate::core::vec2::{Vec2, DIM};
use crate::error::{Error, Result};

/// A hard disk moving freely in the unit square.
///
/// Fields:
/// - `id`: stable identifier (also the particle's index in the simulation)
/// - `r`: position [x, y]
/// - `v`: velocity [vx, vy]
///
/// The disk radius sigma is shared by all particles and lives on the
/// simulation, not here; masses are equal and unit by convention.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Stable particle identifier.
    pub id: u32,
    /// Position (x, y).
    pub r: Vec2,
    /// Velocity (vx, vy).
    pub v: Vec2,
}

impl Particle {
    /// Create a new particle after validating that all components are finite.
    pub fn new(id: u32, r: Vec2, v: Vec2) -> Result<Self> {
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self { id, r, v })
    }

    /// Advance the position by straight-line motion over `dt`.
    #[inline]
    pub fn drift(&mut self, dt: f64) {
        for k in 0..DIM {
            self.r[k] += self.v[k] * dt;
        }
    }

    /// Kinetic energy with unit mass: 1/2 |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let vsq: f64 = self.v.iter().map(|&c| c * c).sum();
        0.5 * vsq
    }
}
