//! Error types for physics operations.

use core::fmt;

use crate::engine::{ParticleId, SpringId};

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, PhysicsError>;

/// Errors that can occur during physics operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A vector component was NaN at construction.
    InvalidVector { x: f64, y: f64 },
    /// A particle position, previous position or acceleration was not finite.
    InvalidPosition { x: f64, y: f64 },
    /// Gravity must be finite.
    InvalidGravity { x: f64, y: f64 },
    /// World bounds must not start at `+inf` or end at `-inf`.
    InvalidBounds,
    /// Integration was asked to advance by a zero time delta.
    MissingTimeStep,
    /// The time delta was negative, not finite, or needs more than
    /// [`MAX_SUBSTEPS`](crate::config::MAX_SUBSTEPS) sub-steps.
    InvalidTimeStep(f64),
    /// A spring references a particle that is no longer in the engine.
    DanglingParticle { spring: SpringId, particle: ParticleId },
    /// No particle with this id is registered.
    UnknownParticle(ParticleId),
    /// No spring with this id is registered.
    UnknownSpring(SpringId),
    /// Mass must be positive and finite.
    InvalidMass(f64),
    /// Radius must be non-negative and finite.
    InvalidRadius(f64),
    /// Stiffness must be non-negative and finite.
    InvalidStiffness(f64),
    /// Rest length must be non-negative and finite.
    InvalidRestLength(f64),
    /// Friction must lie in `[0, 1]`.
    InvalidFriction(f64),
    /// Collision response must be non-negative and finite.
    InvalidCollisionResponse(f64),
    /// Probabilities must lie in `[0, 1]`.
    InvalidProbability(f64),
    /// The maximum sub-step span must be positive, with a finite square.
    InvalidSubstepSpan(f64),
    /// A spring cannot connect a particle to itself.
    DegenerateSpring(ParticleId),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidVector { x, y } => {
                write!(f, "cannot create vector with NaN component ({}, {})", x, y)
            }
            PhysicsError::InvalidPosition { x, y } => {
                write!(f, "particle state must be finite, got ({}, {})", x, y)
            }
            PhysicsError::InvalidGravity { x, y } => {
                write!(f, "gravity must be finite, got ({}, {})", x, y)
            }
            PhysicsError::InvalidBounds => {
                write!(f, "bounds must not start at +inf or end at -inf")
            }
            PhysicsError::MissingTimeStep => write!(f, "no time step given for integration"),
            PhysicsError::InvalidTimeStep(dt) => {
                write!(f, "time step must be positive, finite and plannable, got {}", dt)
            }
            PhysicsError::DanglingParticle { spring, particle } => write!(
                f,
                "spring {} references particle {} which was removed",
                spring, particle
            ),
            PhysicsError::UnknownParticle(id) => write!(f, "unknown particle {}", id),
            PhysicsError::UnknownSpring(id) => write!(f, "unknown spring {}", id),
            PhysicsError::InvalidMass(m) => write!(f, "mass must be positive and finite, got {}", m),
            PhysicsError::InvalidRadius(r) => {
                write!(f, "radius must be non-negative and finite, got {}", r)
            }
            PhysicsError::InvalidStiffness(s) => {
                write!(f, "stiffness must be non-negative and finite, got {}", s)
            }
            PhysicsError::InvalidRestLength(l) => {
                write!(f, "rest length must be non-negative and finite, got {}", l)
            }
            PhysicsError::InvalidFriction(v) => write!(f, "friction must be in [0, 1], got {}", v),
            PhysicsError::InvalidCollisionResponse(v) => {
                write!(f, "collision response must be non-negative and finite, got {}", v)
            }
            PhysicsError::InvalidProbability(p) => {
                write!(f, "probability must be in [0, 1], got {}", p)
            }
            PhysicsError::InvalidSubstepSpan(span) => {
                write!(f, "max sub-step span must be positive with a finite square, got {}", span)
            }
            PhysicsError::DegenerateSpring(id) => {
                write!(f, "spring cannot connect particle {} to itself", id)
            }
        }
    }
}
