//! Pointer dragging through a pinned anchor particle.

use alloc::vec::Vec;

use rand::Rng;

use crate::engine::{Engine, ParticleId, SpringId};
use crate::error::Result;
use crate::particle::Particle;
use crate::spring::check_stiffness;
use crate::vec::Vec2;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Only particles closer than this to the grab point are linked.
    pub reach: f64,
    /// Upper bound on links made per grab.
    pub max_links: usize,
    pub stiffness: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig { reach: 80.0, max_links: 100, stiffness: 0.005 }
    }
}

/// A live drag: an anchor that follows the pointer, tied by soft springs to
/// particles that were near the grab point.
#[derive(Debug)]
pub struct DragHandle {
    anchor: ParticleId,
    springs: Vec<SpringId>,
}

impl DragHandle {
    /// Drop an anchor at `point` and link it to a random selection of nearby
    /// free particles.
    ///
    /// On error the engine is left as it was.
    pub fn grab<R: Rng + ?Sized>(
        engine: &mut Engine,
        point: Vec2,
        config: &DragConfig,
        rng: &mut R,
    ) -> Result<Self> {
        check_stiffness(config.stiffness)?;
        let anchor_particle = Particle::pinned(point)?;
        let mut nearby: Vec<ParticleId> = engine
            .particles()
            .filter(|(_, p)| !p.pinned && p.pos.distance(point) < config.reach)
            .map(|(id, _)| id)
            .collect();

        let anchor = engine.add_particle(anchor_particle);
        let mut springs = Vec::with_capacity(config.max_links.min(nearby.len()));
        while springs.len() < config.max_links && !nearby.is_empty() {
            let picked = nearby.remove(rng.gen_range(0..nearby.len()));
            match engine.connect(anchor, picked, config.stiffness) {
                Ok(id) => springs.push(id),
                Err(err) => {
                    engine.remove_particle_with_springs(anchor)?;
                    return Err(err);
                }
            }
        }

        tracing::trace!(links = springs.len(), "drag grabbed");
        Ok(DragHandle { anchor, springs })
    }

    pub fn anchor(&self) -> ParticleId {
        self.anchor
    }

    pub fn springs(&self) -> &[SpringId] {
        &self.springs
    }

    /// Follow the pointer.
    pub fn move_to(&self, engine: &mut Engine, point: Vec2) -> Result<()> {
        engine.particle_mut(self.anchor)?.move_to(point)
    }

    /// Let go: the anchor and its springs leave the engine.
    pub fn release(self, engine: &mut Engine) -> Result<()> {
        engine.remove_particle_with_springs(self.anchor)?;
        Ok(())
    }
}
