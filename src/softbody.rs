//! Soft bodies built from traced outlines.
//!
//! An outline is an ordered group of sampled points, e.g. one glyph contour
//! of a logo. Every point becomes a particle. Consecutive points are joined by
//! stiff *shell* springs, and sparse random cross-links inside a contour
//! (*intra*) and between contours (*inter*) give the whole shape its body.

use alloc::vec::Vec;

use rand::Rng;

use crate::engine::{Engine, ParticleId, SpringId};
use crate::error::{PhysicsError, Result};
use crate::particle::Particle;
use crate::spring::check_stiffness;
use crate::vec::Vec2;

/// Spring families a soft body is made of. Each can be retuned as a whole.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpringGroup {
    /// Neighbours along one outline.
    Shell,
    /// Random links across a single outline.
    Intra,
    /// Random links between different outlines.
    Inter,
}

/// Configuration for building an outline soft body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OutlineConfig {
    /// How many neighbours ahead each point is shell-linked to.
    pub shell_steps: usize,
    pub shell_stiffness: f64,
    /// Chance that a pair of non-neighbouring points on one outline is linked.
    pub intra_probability: f64,
    pub intra_stiffness: f64,
    /// Chance that a pair of points on different outlines is linked.
    pub inter_probability: f64,
    pub inter_stiffness: f64,
    /// Collision radius of the generated particles; 0 keeps them out of
    /// collision resolution.
    pub particle_radius: f64,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        OutlineConfig {
            shell_steps: 1,
            shell_stiffness: 0.2,
            intra_probability: 0.03,
            intra_stiffness: 0.003,
            inter_probability: 0.0002,
            inter_stiffness: 0.001,
            particle_radius: 0.0,
        }
    }
}

impl OutlineConfig {
    pub fn validate(&self) -> Result<()> {
        for stiffness in [self.shell_stiffness, self.intra_stiffness, self.inter_stiffness] {
            check_stiffness(stiffness)?;
        }
        for probability in [self.intra_probability, self.inter_probability] {
            if !(0.0..=1.0).contains(&probability) {
                return Err(PhysicsError::InvalidProbability(probability));
            }
        }
        if !self.particle_radius.is_finite() || self.particle_radius < 0.0 {
            return Err(PhysicsError::InvalidRadius(self.particle_radius));
        }
        Ok(())
    }
}

/// Translate the point groups so their joint bounding box starts at the
/// origin, then scale them uniformly to `width`.
///
/// A set with no horizontal extent is only translated.
pub fn fit_to_width(paths: &[Vec<(f64, f64)>], width: f64) -> Result<Vec<Vec<Vec2>>> {
    let mut min = Vec2::INFINITY;
    let mut max = Vec2::NEG_INFINITY;
    let mut points: Vec<Vec<Vec2>> = Vec::with_capacity(paths.len());
    for path in paths {
        let mut converted = Vec::with_capacity(path.len());
        for &(x, y) in path {
            let p = Vec2::new(x, y)?;
            min = min.min(p);
            max = max.max(p);
            converted.push(p);
        }
        points.push(converted);
    }

    let current_width = max.x() - min.x();
    let scale = if current_width > 0.0 && current_width.is_finite() {
        width / current_width
    } else {
        1.0
    };
    for path in points.iter_mut() {
        for p in path.iter_mut() {
            *p = (*p - min) * scale;
        }
    }
    Ok(points)
}

/// Handles to the particles and springs of one outline soft body.
#[derive(Clone, Debug, Default)]
pub struct SoftBody {
    paths: Vec<Vec<ParticleId>>,
    shell: Vec<SpringId>,
    intra: Vec<SpringId>,
    inter: Vec<SpringId>,
}

impl SoftBody {
    /// Spawn particles for every point and wire up the three spring groups.
    ///
    /// On error nothing is left behind in the engine.
    pub fn build<R: Rng + ?Sized>(
        engine: &mut Engine,
        paths: &[Vec<Vec2>],
        config: &OutlineConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let particles = paths
            .iter()
            .map(|path| {
                path.iter()
                    .map(|&point| Particle::at(point)?.with_radius(config.particle_radius))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let mut body = SoftBody::default();
        for path in particles {
            body.paths.push(path.into_iter().map(|p| engine.add_particle(p)).collect());
        }
        if let Err(err) = body.link(engine, config, rng) {
            tracing::debug!(%err, "outline soft body rolled back");
            body.despawn(engine)?;
            return Err(err);
        }

        tracing::debug!(
            paths = body.paths.len(),
            shell = body.shell.len(),
            intra = body.intra.len(),
            inter = body.inter.len(),
            "built outline soft body"
        );
        Ok(body)
    }

    fn link<R: Rng + ?Sized>(
        &mut self,
        engine: &mut Engine,
        config: &OutlineConfig,
        rng: &mut R,
    ) -> Result<()> {
        for ids in &self.paths {
            let n = ids.len();
            for i in 0..n {
                for step in 1..=config.shell_steps {
                    let j = (i + step) % n;
                    if j != i {
                        self.shell.push(engine.connect(ids[i], ids[j], config.shell_stiffness)?);
                    }
                }
                for j in (i + 1 + config.shell_steps)..n {
                    if rng.gen::<f64>() < config.intra_probability {
                        self.intra.push(engine.connect(ids[i], ids[j], config.intra_stiffness)?);
                    }
                }
            }
        }

        for (k, from) in self.paths.iter().enumerate() {
            for (l, to) in self.paths.iter().enumerate() {
                if k == l {
                    continue;
                }
                for (i, &a) in from.iter().enumerate() {
                    for &b in to.iter().skip(i + 1) {
                        if rng.gen::<f64>() < config.inter_probability {
                            self.inter.push(engine.connect(a, b, config.inter_stiffness)?);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Particle ids per outline, in point order.
    pub fn paths(&self) -> &[Vec<ParticleId>] {
        &self.paths
    }

    pub fn particle_ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.paths.iter().flatten().copied()
    }

    pub fn springs(&self, group: SpringGroup) -> &[SpringId] {
        match group {
            SpringGroup::Shell => &self.shell,
            SpringGroup::Intra => &self.intra,
            SpringGroup::Inter => &self.inter,
        }
    }

    /// Retune every spring of one group in place.
    pub fn set_group_stiffness(
        &self,
        engine: &mut Engine,
        group: SpringGroup,
        stiffness: f64,
    ) -> Result<()> {
        for &id in self.springs(group) {
            engine.spring_mut(id)?.set_stiffness(stiffness)?;
        }
        Ok(())
    }

    /// Current positions of one outline, ready to be drawn as a closed shape.
    pub fn outline(&self, engine: &Engine, path: usize) -> Result<Vec<Vec2>> {
        let Some(ids) = self.paths.get(path) else {
            return Ok(Vec::new());
        };
        ids.iter().map(|&id| Ok(engine.particle(id)?.pos)).collect()
    }

    /// Average position of all particles; zero for an empty body.
    pub fn centroid(&self, engine: &Engine) -> Result<Vec2> {
        let mut sum = Vec2::ZERO;
        let mut count = 0usize;
        for id in self.particle_ids() {
            sum = sum + engine.particle(id)?.pos;
            count += 1;
        }
        if count == 0 {
            return Ok(Vec2::ZERO);
        }
        sum.div(count as f64)
    }

    /// Remove the body's particles and every spring attached to them.
    pub fn despawn(self, engine: &mut Engine) -> Result<()> {
        for id in self.particle_ids() {
            engine.remove_particle_with_springs(id)?;
        }
        Ok(())
    }
}
