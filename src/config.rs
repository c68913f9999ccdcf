//! Configuration types for the engine.

use crate::bounds::Bounds;
use crate::collision::DEFAULT_RESPONSE;
use crate::error::{PhysicsError, Result};
use crate::vec::Vec2;

/// Gravity tuned for millisecond frame deltas and pixel units.
pub const DEFAULT_GRAVITY: Vec2 = Vec2::constant(0.0, 0.0001);
pub const DEFAULT_MAX_SUBSTEP_SPAN: f64 = 20.0;
/// Upper limit on sub-steps per frame. Longer frames are rejected.
pub const MAX_SUBSTEPS: usize = 10_000;

/// Configuration for the engine.
///
/// # Builder Pattern
/// ```
/// use verlet_outline::{Bounds, EngineConfig, Vec2};
///
/// let config = EngineConfig::new()
///     .with_gravity(Vec2::new(0.0, 0.0002).unwrap())
///     .with_bounds(Bounds::from_size(1280.0, 720.0).unwrap())
///     .with_max_substep_span(10.0)
///     .unwrap()
///     .with_friction(0.99)
///     .unwrap();
/// assert_eq!(config.max_substep_span, 10.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Acceleration added to every particle each sub-step. Default: (0, 0.0001).
    pub gravity: Vec2,
    /// Region particles are clamped into. Default: unbounded.
    pub bounds: Bounds,
    /// Longest time span a single sub-step may cover. Default: 20.
    pub max_substep_span: f64,
    /// Multiplier on carried displacement each integration, in `[0, 1]`.
    /// 1.0 = no damping.
    pub friction: f64,
    /// Fraction of a collision overlap removed per pass. Default: 0.75.
    pub collision_response: f64,
}

impl EngineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        EngineConfig {
            gravity: DEFAULT_GRAVITY,
            bounds: Bounds::UNBOUNDED,
            max_substep_span: DEFAULT_MAX_SUBSTEP_SPAN,
            friction: 1.0,
            collision_response: DEFAULT_RESPONSE,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_max_substep_span(mut self, span: f64) -> Result<Self> {
        check_span(span)?;
        self.max_substep_span = span;
        Ok(self)
    }

    pub fn with_friction(mut self, friction: f64) -> Result<Self> {
        check_friction(friction)?;
        self.friction = friction;
        Ok(self)
    }

    pub fn with_collision_response(mut self, response: f64) -> Result<Self> {
        check_response(response)?;
        self.collision_response = response;
        Ok(self)
    }

    /// Check every field. The public fields can be set directly or come
    /// from a deserialised file, so the engine runs this before each frame.
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidGravity { x: self.gravity.x(), y: self.gravity.y() });
        }
        self.bounds.check()?;
        check_span(self.max_substep_span)?;
        check_friction(self.friction)?;
        check_response(self.collision_response)
    }

    /// Number of sub-steps and their length for a frame of `frame_dt`.
    ///
    /// Fails with [`PhysicsError::InvalidTimeStep`] when the frame would need
    /// more than [`MAX_SUBSTEPS`].
    pub fn substeps(&self, frame_dt: f64) -> Result<(usize, f64)> {
        let steps = libm::ceil(frame_dt / self.max_substep_span).max(1.0);
        if steps > MAX_SUBSTEPS as f64 {
            return Err(PhysicsError::InvalidTimeStep(frame_dt));
        }
        let steps = steps as usize;
        Ok((steps, frame_dt / steps as f64))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The span is squared during integration, so the square must stay finite.
fn check_span(span: f64) -> Result<()> {
    if !span.is_finite() || span <= 0.0 || !(span * span).is_finite() {
        return Err(PhysicsError::InvalidSubstepSpan(span));
    }
    Ok(())
}

fn check_friction(friction: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&friction) {
        return Err(PhysicsError::InvalidFriction(friction));
    }
    Ok(())
}

fn check_response(response: f64) -> Result<()> {
    if !response.is_finite() || response < 0.0 {
        return Err(PhysicsError::InvalidCollisionResponse(response));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_tuning_values_are_rejected() {
        let config = EngineConfig::new();
        assert!(matches!(
            config.clone().with_friction(f64::NAN),
            Err(PhysicsError::InvalidFriction(_))
        ));
        assert!(config.clone().with_friction(1.5).is_err());
        assert!(matches!(
            config.clone().with_collision_response(f64::NAN),
            Err(PhysicsError::InvalidCollisionResponse(_))
        ));
        assert!(config.clone().with_collision_response(f64::INFINITY).is_err());
        assert!(config.clone().with_max_substep_span(1e200).is_err());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_catches_direct_field_writes() {
        let mut config = EngineConfig::new();
        config.friction = f64::NAN;
        assert!(matches!(config.validate(), Err(PhysicsError::InvalidFriction(_))));

        let mut config = EngineConfig::new();
        config.gravity = Vec2::INFINITY;
        assert!(matches!(config.validate(), Err(PhysicsError::InvalidGravity { .. })));

        let mut config = EngineConfig::new();
        config.bounds = Bounds::new(Vec2::INFINITY, Vec2::INFINITY);
        assert_eq!(config.validate(), Err(PhysicsError::InvalidBounds));
    }

    #[test]
    fn substeps_are_capped() {
        let config = EngineConfig::new();
        assert_eq!(config.substeps(45.0).unwrap(), (3, 15.0));
        assert_eq!(config.substeps(5.0).unwrap(), (1, 5.0));
        let limit = DEFAULT_MAX_SUBSTEP_SPAN * MAX_SUBSTEPS as f64;
        assert_eq!(config.substeps(limit).unwrap().0, MAX_SUBSTEPS);
        assert!(matches!(config.substeps(1e300), Err(PhysicsError::InvalidTimeStep(_))));
    }
}
