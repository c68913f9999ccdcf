//! Distance springs solved by positional relaxation.

use crate::engine::ParticleId;
use crate::error::{PhysicsError, Result};
use crate::particle::Particle;

/// Stand-in separation used when both ends sit on the same point.
pub const NEAREST_DISTANCE: f64 = 0.001;

/// A distance constraint between two particles.
///
/// Each [`relax`](Spring::relax) call moves both ends towards `rest_length`
/// by `stiffness` of the remaining error, split evenly. The spring does not
/// own its particles; it names them by id and the engine resolves them.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    pub a: ParticleId,
    pub b: ParticleId,
    rest_length: f64,
    stiffness: f64,
}

impl Spring {
    pub fn new(a: ParticleId, b: ParticleId, rest_length: f64, stiffness: f64) -> Result<Self> {
        if a == b {
            return Err(PhysicsError::DegenerateSpring(a));
        }
        check_stiffness(stiffness)?;
        check_rest_length(rest_length)?;
        Ok(Spring { a, b, rest_length, stiffness })
    }

    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }

    pub fn set_rest_length(&mut self, rest_length: f64) -> Result<()> {
        check_rest_length(rest_length)?;
        self.rest_length = rest_length;
        Ok(())
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Retune without rebuilding the spring.
    pub fn set_stiffness(&mut self, stiffness: f64) -> Result<()> {
        check_stiffness(stiffness)?;
        self.stiffness = stiffness;
        Ok(())
    }

    /// One relaxation pass. Pinned ends stay where they are.
    pub fn relax(&self, a: &mut Particle, b: &mut Particle) {
        let displacement = b.pos - a.pos;
        let mut distance = displacement.length();
        if distance == 0.0 {
            distance = NEAREST_DISTANCE;
        }
        let difference = self.rest_length - distance;
        let percent = difference / distance / 2.0;
        let force = displacement * (percent * self.stiffness);
        if !a.pinned {
            a.pos = a.pos - force;
        }
        if !b.pinned {
            b.pos = b.pos + force;
        }
    }

    /// Signed deviation from the rest length for the given ends.
    pub fn strain(&self, a: &Particle, b: &Particle) -> f64 {
        a.pos.distance(b.pos) - self.rest_length
    }
}

pub(crate) fn check_stiffness(stiffness: f64) -> Result<()> {
    if !stiffness.is_finite() || stiffness < 0.0 {
        return Err(PhysicsError::InvalidStiffness(stiffness));
    }
    Ok(())
}

fn check_rest_length(rest_length: f64) -> Result<()> {
    if !rest_length.is_finite() || rest_length < 0.0 {
        return Err(PhysicsError::InvalidRestLength(rest_length));
    }
    Ok(())
}
