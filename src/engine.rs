//! The simulation engine: particles, springs and the sub-stepped frame loop.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use crate::bounds::Bounds;
use crate::collision::{pair_mut, resolve_pair};
use crate::config::EngineConfig;
use crate::error::{PhysicsError, Result};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::{check_time_step, Particle};
use crate::spring::Spring;
use crate::vec::Vec2;

/// Stable handle to a particle owned by an [`Engine`]. Never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(u64);

/// Stable handle to a spring registered with an [`Engine`]. Never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpringId(u64);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for SpringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns every particle and spring and advances them frame by frame.
///
/// Particles keep insertion order, which fixes the order collision pairs
/// are visited in and so makes runs reproducible.
pub struct Engine {
    particles: Vec<Particle>,
    particle_ids: Vec<ParticleId>,
    index: BTreeMap<ParticleId, usize>,
    springs: Vec<Spring>,
    spring_ids: Vec<SpringId>,
    config: EngineConfig,
    next_particle: u64,
    next_spring: u64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            particles: Vec::new(),
            particle_ids: Vec::new(),
            index: BTreeMap::new(),
            springs: Vec::new(),
            spring_ids: Vec::new(),
            config,
            next_particle: 0,
            next_spring: 0,
        }
    }

    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        let id = ParticleId(self.next_particle);
        self.next_particle += 1;
        self.index.insert(id, self.particles.len());
        self.particles.push(particle);
        self.particle_ids.push(id);
        id
    }

    /// Remove a particle, keeping the order of the rest.
    ///
    /// Springs that still name it are left in place; the next
    /// [`update`](Engine::update) rejects them with
    /// [`PhysicsError::DanglingParticle`]. Use
    /// [`remove_particle_with_springs`](Engine::remove_particle_with_springs)
    /// to drop them together.
    pub fn remove_particle(&mut self, id: ParticleId) -> Result<Particle> {
        let slot = self.slot(id)?;
        self.particle_ids.remove(slot);
        let particle = self.particles.remove(slot);
        self.index.remove(&id);
        for (i, pid) in self.particle_ids.iter().enumerate().skip(slot) {
            self.index.insert(*pid, i);
        }
        Ok(particle)
    }

    pub fn remove_particle_with_springs(&mut self, id: ParticleId) -> Result<Particle> {
        let particle = self.remove_particle(id)?;
        let mut i = 0;
        while i < self.springs.len() {
            if self.springs[i].a == id || self.springs[i].b == id {
                self.springs.remove(i);
                self.spring_ids.remove(i);
            } else {
                i += 1;
            }
        }
        Ok(particle)
    }

    pub fn particle(&self, id: ParticleId) -> Result<&Particle> {
        let slot = self.slot(id)?;
        Ok(&self.particles[slot])
    }

    /// Mutable access between frames, e.g. for dragging a particle around.
    pub fn particle_mut(&mut self, id: ParticleId) -> Result<&mut Particle> {
        let slot = self.slot(id)?;
        Ok(&mut self.particles[slot])
    }

    pub fn contains_particle(&self, id: ParticleId) -> bool {
        self.index.contains_key(&id)
    }

    /// Particles in insertion order.
    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
        self.particle_ids.iter().copied().zip(self.particles.iter())
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Register a spring. Both ends must currently exist.
    pub fn add_spring(&mut self, spring: Spring) -> Result<SpringId> {
        self.slot(spring.a)?;
        self.slot(spring.b)?;
        let id = SpringId(self.next_spring);
        self.next_spring += 1;
        self.springs.push(spring);
        self.spring_ids.push(id);
        Ok(id)
    }

    /// Connect two particles with a spring whose rest length is their
    /// current separation.
    pub fn connect(&mut self, a: ParticleId, b: ParticleId, stiffness: f64) -> Result<SpringId> {
        let rest_length = self.particle(a)?.pos.distance(self.particle(b)?.pos);
        self.connect_with_length(a, b, rest_length, stiffness)
    }

    pub fn connect_with_length(
        &mut self,
        a: ParticleId,
        b: ParticleId,
        rest_length: f64,
        stiffness: f64,
    ) -> Result<SpringId> {
        self.add_spring(Spring::new(a, b, rest_length, stiffness)?)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Result<Spring> {
        let slot = self.spring_slot(id)?;
        self.spring_ids.remove(slot);
        Ok(self.springs.remove(slot))
    }

    pub fn spring(&self, id: SpringId) -> Result<&Spring> {
        let slot = self.spring_slot(id)?;
        Ok(&self.springs[slot])
    }

    /// Mutable access for live retuning of stiffness or rest length.
    pub fn spring_mut(&mut self, id: SpringId) -> Result<&mut Spring> {
        let slot = self.spring_slot(id)?;
        Ok(&mut self.springs[slot])
    }

    pub fn springs(&self) -> impl Iterator<Item = (SpringId, &Spring)> + '_ {
        self.spring_ids.iter().copied().zip(self.springs.iter())
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds
    }

    /// Resize the world, e.g. when the canvas is resized.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.config.bounds = bounds;
    }

    pub fn set_max_substep_span(&mut self, span: f64) -> Result<()> {
        self.config = self.config.clone().with_max_substep_span(span)?;
        Ok(())
    }

    pub fn set_friction(&mut self, friction: f64) -> Result<()> {
        self.config = self.config.clone().with_friction(friction)?;
        Ok(())
    }

    /// Advance the simulation by `frame_dt`, returning the number of
    /// sub-steps taken.
    pub fn update(&mut self, frame_dt: f64) -> Result<usize> {
        self.update_observed(frame_dt, &mut NoOpStepObserver)
    }

    /// [`update`](Engine::update) with callbacks for every stage.
    ///
    /// Everything that can fail is checked before the first sub-step, so an
    /// error leaves the engine exactly as it was.
    pub fn update_observed<O: StepObserver>(
        &mut self,
        frame_dt: f64,
        observer: &mut O,
    ) -> Result<usize> {
        let (substeps, substep_dt) = match self.validate(frame_dt) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::debug!(frame_dt, %err, "rejected engine update");
                return Err(err);
            }
        };
        tracing::trace!(
            frame_dt,
            substeps,
            substep_dt,
            particles = self.particles.len(),
            springs = self.springs.len(),
            "advancing frame"
        );

        for step in 0..substeps {
            observer.on_substep(step, substep_dt);
            self.apply_forces();
            self.resolve_collisions(observer);
            self.apply_bounds();
            self.integrate(substep_dt)?;
            self.relax_springs()?;
            observer.on_integrate();
        }

        observer.on_step_complete(substeps);
        Ok(substeps)
    }

    /// Checks the frame, the config and every particle, and plans the
    /// sub-steps.
    fn validate(&self, frame_dt: f64) -> Result<(usize, f64)> {
        check_time_step(frame_dt)?;
        self.config.validate()?;
        let plan = self.config.substeps(frame_dt)?;
        for p in &self.particles {
            p.check_state()?;
        }
        for (spring, id) in self.springs.iter().zip(&self.spring_ids) {
            for end in [spring.a, spring.b] {
                if !self.index.contains_key(&end) {
                    return Err(PhysicsError::DanglingParticle { spring: *id, particle: end });
                }
            }
        }
        Ok(plan)
    }

    fn apply_forces(&mut self) {
        let gravity = self.config.gravity;
        for p in self.particles.iter_mut() {
            p.apply_acceleration(gravity);
        }
    }

    fn resolve_collisions<O: StepObserver>(&mut self, observer: &mut O) {
        let response = self.config.collision_response;
        let n = self.particles.len();
        for i1 in 0..n {
            if !self.particles[i1].collides() {
                continue;
            }
            for i2 in (i1 + 1)..n {
                let (p1, p2) = pair_mut(&mut self.particles, i1, i2);
                if let Some(overlap) = resolve_pair(p1, p2, response) {
                    observer.on_collision(self.particle_ids[i1], self.particle_ids[i2], overlap);
                }
            }
        }
    }

    fn apply_bounds(&mut self) {
        let bounds = self.config.bounds;
        for p in self.particles.iter_mut() {
            bounds.confine(p);
        }
    }

    fn integrate(&mut self, dt: f64) -> Result<()> {
        let friction = self.config.friction;
        for p in self.particles.iter_mut() {
            p.integrate_damped(dt, friction)?;
        }
        Ok(())
    }

    fn relax_springs(&mut self) -> Result<()> {
        for (spring, id) in self.springs.iter().zip(&self.spring_ids) {
            let dangling = |particle| PhysicsError::DanglingParticle { spring: *id, particle };
            let ia = *self.index.get(&spring.a).ok_or_else(|| dangling(spring.a))?;
            let ib = *self.index.get(&spring.b).ok_or_else(|| dangling(spring.b))?;
            if ia < ib {
                let (a, b) = pair_mut(&mut self.particles, ia, ib);
                spring.relax(a, b);
            } else {
                let (b, a) = pair_mut(&mut self.particles, ib, ia);
                spring.relax(a, b);
            }
        }
        Ok(())
    }

    fn slot(&self, id: ParticleId) -> Result<usize> {
        self.index.get(&id).copied().ok_or(PhysicsError::UnknownParticle(id))
    }

    fn spring_slot(&self, id: SpringId) -> Result<usize> {
        self.spring_ids
            .iter()
            .position(|s| *s == id)
            .ok_or(PhysicsError::UnknownSpring(id))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
