//! Verlet particles with position-based dynamics.

use crate::error::{PhysicsError, Result};
use crate::vec::Vec2;

pub const DEFAULT_RADIUS: f64 = 1.0;
pub const DEFAULT_MASS: f64 = 1.0;

/// A Verlet particle: position-based dynamics with implicit velocity.
///
/// Velocity is never stored; it is the difference between `pos` and
/// `prev_pos` over the last integration step.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub acceleration: Vec2,
    radius: f64,
    mass: f64,
    pub pinned: bool,
}

impl Particle {
    /// A particle at rest at `(x, y)` with the default radius and mass.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        Self::at(Vec2::new(x, y)?)
    }

    /// A particle at rest at `pos`, which must be finite.
    pub fn at(pos: Vec2) -> Result<Self> {
        check_finite(pos)?;
        Ok(Particle {
            pos,
            prev_pos: pos,
            acceleration: Vec2::ZERO,
            radius: DEFAULT_RADIUS,
            mass: DEFAULT_MASS,
            pinned: false,
        })
    }

    /// A particle that only moves when external code moves it.
    pub fn pinned(pos: Vec2) -> Result<Self> {
        Ok(Particle { radius: 0.0, pinned: true, ..Self::at(pos)? })
    }

    /// Set the collision radius. Zero opts the particle out of collisions.
    pub fn with_radius(mut self, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        self.radius = radius;
        Ok(self)
    }

    pub fn with_mass(mut self, mass: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(self)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn collides(&self) -> bool {
        self.radius != 0.0
    }

    pub fn apply_acceleration(&mut self, accel: Vec2) {
        if !self.pinned {
            self.acceleration = self.acceleration + accel;
        }
    }

    /// Advance one position-Verlet step without damping.
    pub fn integrate(&mut self, dt: f64) -> Result<()> {
        self.integrate_damped(dt, 1.0)
    }

    /// Advance one position-Verlet step, scaling the carried displacement by
    /// `friction` (1.0 keeps all momentum).
    pub fn integrate_damped(&mut self, dt: f64, friction: f64) -> Result<()> {
        check_time_step(dt)?;
        if self.pinned {
            self.prev_pos = self.pos;
            self.acceleration = Vec2::ZERO;
            return Ok(());
        }
        let displacement = (self.pos - self.prev_pos) * friction;
        self.prev_pos = self.pos;
        self.pos = self.pos + displacement + self.acceleration * (dt * dt);
        self.acceleration = Vec2::ZERO;
        Ok(())
    }

    /// Arrange `prev_pos` so the next step carries velocity `v`.
    pub fn set_velocity(&mut self, v: Vec2, dt: f64) -> Result<()> {
        check_time_step(dt)?;
        let prev_pos = self.pos - v * dt;
        check_finite(prev_pos)?;
        self.prev_pos = prev_pos;
        Ok(())
    }

    /// Add `v` on top of the current implicit velocity.
    pub fn add_velocity(&mut self, v: Vec2, dt: f64) -> Result<()> {
        check_time_step(dt)?;
        let prev_pos = self.prev_pos - v * dt;
        check_finite(prev_pos)?;
        self.prev_pos = prev_pos;
        Ok(())
    }

    pub fn velocity(&self, dt: f64) -> Result<Vec2> {
        check_time_step(dt)?;
        (self.pos - self.prev_pos).div(dt)
    }

    /// Speed over the last step of length `dt`.
    pub fn current_velocity(&self, dt: f64) -> Result<f64> {
        Ok(self.velocity(dt)?.length())
    }

    /// Teleport without introducing velocity.
    pub fn move_to(&mut self, pos: Vec2) -> Result<()> {
        check_finite(pos)?;
        self.pos = pos;
        self.prev_pos = pos;
        Ok(())
    }

    /// Fails if any of the public state fields was set to a non-finite value.
    pub fn check_state(&self) -> Result<()> {
        check_finite(self.pos)?;
        check_finite(self.prev_pos)?;
        check_finite(self.acceleration)
    }
}

fn check_finite(v: Vec2) -> Result<()> {
    if !v.is_finite() {
        return Err(PhysicsError::InvalidPosition { x: v.x(), y: v.y() });
    }
    Ok(())
}

pub(crate) fn check_time_step(dt: f64) -> Result<()> {
    if dt == 0.0 {
        return Err(PhysicsError::MissingTimeStep);
    }
    if !dt.is_finite() || dt < 0.0 {
        return Err(PhysicsError::InvalidTimeStep(dt));
    }
    Ok(())
}
