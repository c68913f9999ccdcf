//! Position-Verlet particles, relaxation springs and circle collisions for
//! animating traced outlines.
//!
//! `verlet-outline` turns sampled vector outlines (a logo, some lettering)
//! into a wobbly particle network and keeps it moving under gravity, mutual
//! collisions, world bounds and pointer drags.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity
//! - **Relaxation springs**: One positional correction pass per sub-step
//! - **Circle collisions**: Mass-weighted positional separation, O(n²)
//! - **Sub-stepping**: Variable frame deltas split into bounded steps
//! - **Outline soft bodies**: Shell springs plus random cross-links
//! - **Drag handles**: Pull a shape around through a pinned anchor
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! ```
//! use verlet_outline::{Engine, EngineConfig, Particle, Vec2};
//!
//! let mut engine = Engine::new(EngineConfig::new());
//! let a = engine.add_particle(Particle::new(0.0, 0.0)?);
//! let b = engine.add_particle(Particle::new(10.0, 0.0)?);
//! engine.connect(a, b, 0.5)?;
//! assert_eq!(engine.update(45.0)?, 3);
//! # Ok::<(), verlet_outline::PhysicsError>(())
//! ```

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod bounds;
pub mod collision;
pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod observer;
pub mod particle;
pub mod softbody;
pub mod spring;
pub mod vec;

// Re-export primary API
pub use bounds::Bounds;
pub use config::EngineConfig;
pub use drag::{DragConfig, DragHandle};
pub use engine::{Engine, ParticleId, SpringId};
pub use error::{PhysicsError, Result};
pub use observer::{NoOpStepObserver, StepCounter, StepObserver};
pub use particle::Particle;
pub use softbody::{fit_to_width, OutlineConfig, SoftBody, SpringGroup};
pub use spring::Spring;
pub use vec::Vec2;
