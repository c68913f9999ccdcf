//! Rectangular world bounds.

use crate::error::{PhysicsError, Result};
use crate::particle::Particle;
use crate::vec::Vec2;

/// Axis-aligned region particles are kept inside. Either side of either
/// axis may be infinite.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds { min: Vec2::NEG_INFINITY, max: Vec2::INFINITY };

    pub fn new(min: Vec2, max: Vec2) -> Self {
        Bounds { min, max }
    }

    /// The region `[0, width] x [0, height]`, like a canvas.
    pub fn from_size(width: f64, height: f64) -> Result<Self> {
        Ok(Bounds { min: Vec2::ZERO, max: Vec2::new(width, height)? })
    }

    /// Region a particle's centre may occupy: shrunk by `radius` on each side.
    pub fn inset(&self, radius: f64) -> Result<Self> {
        if !radius.is_finite() {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        let r = Vec2::splat(radius)?;
        Ok(Bounds { min: self.min + r, max: self.max - r })
    }

    /// Clamp the particle's centre into the inset region. No bounce: whatever
    /// motion carried it out is absorbed.
    pub fn confine(&self, particle: &mut Particle) {
        if particle.pinned {
            return;
        }
        let r = Vec2::ONE * particle.radius();
        let hi = self.max - r;
        let lo = self.min + r;
        particle.pos = particle.pos.clamp(lo, hi);
    }

    /// Fails if a side sits at the wrong infinity, which would clamp
    /// particles to infinite coordinates.
    pub fn check(&self) -> Result<()> {
        let low = [self.min.x(), self.min.y()];
        let high = [self.max.x(), self.max.y()];
        if low.contains(&f64::INFINITY) || high.contains(&f64::NEG_INFINITY) {
            return Err(PhysicsError::InvalidBounds);
        }
        Ok(())
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x() >= self.min.x()
            && point.x() <= self.max.x()
            && point.y() >= self.min.y()
            && point.y() <= self.max.y()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::UNBOUNDED
    }
}
