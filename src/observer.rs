//! Step observer trait for monitoring physics simulation progress.

use crate::engine::ParticleId;

/// Trait for observing engine updates.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called before forces are applied in each sub-step.
    fn on_substep(&mut self, _index: usize, _dt: f64) {}

    /// Called for every pair pushed apart, with the penetration depth.
    fn on_collision(&mut self, _a: ParticleId, _b: ParticleId, _overlap: f64) {}

    /// Called after all particles have been integrated and springs relaxed.
    fn on_integrate(&mut self) {}

    /// Called once the whole frame has been simulated.
    fn on_step_complete(&mut self, _substeps: usize) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Tallies callbacks; handy for tests and profiling overlays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepCounter {
    pub substeps: usize,
    pub collisions: usize,
    pub integrations: usize,
    pub frames: usize,
    pub last_substep_dt: Option<f64>,
}

impl StepObserver for StepCounter {
    fn on_substep(&mut self, _index: usize, dt: f64) {
        self.substeps += 1;
        self.last_substep_dt = Some(dt);
    }

    fn on_collision(&mut self, _a: ParticleId, _b: ParticleId, _overlap: f64) {
        self.collisions += 1;
    }

    fn on_integrate(&mut self) {
        self.integrations += 1;
    }

    fn on_step_complete(&mut self, _substeps: usize) {
        self.frames += 1;
    }
}
