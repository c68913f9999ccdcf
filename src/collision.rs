//! Positional collision response between circular particles.

use crate::particle::Particle;

/// Fraction of the overlap removed per pass; the reference tuning.
pub const DEFAULT_RESPONSE: f64 = 0.75;

/// Push two overlapping particles apart, heavier one moving less.
///
/// Returns the penetration depth when the pair overlapped. Particles with a
/// zero radius never collide. The correction scales with the un-normalised
/// centre offset, so coincident centres produce no push.
pub fn resolve_pair(p1: &mut Particle, p2: &mut Particle, response: f64) -> Option<f64> {
    if !p1.collides() || !p2.collides() {
        return None;
    }
    let offset = p1.pos - p2.pos;
    let dist = offset.length();
    let min_dist = p1.radius() + p2.radius();
    if dist >= min_dist {
        return None;
    }

    let total_mass = p1.mass() + p2.mass();
    let mass_ratio_1 = p1.mass() / total_mass;
    let mass_ratio_2 = p2.mass() / total_mass;
    let delta = 0.5 * response * (dist - min_dist);

    if !p1.pinned {
        p1.pos = p1.pos - offset * (mass_ratio_2 * delta);
    }
    if !p2.pinned {
        p2.pos = p2.pos + offset * (mass_ratio_1 * delta);
    }
    Some(min_dist - dist)
}

/// Two distinct mutable elements of one slice, `i < j`.
pub(crate) fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j);
    let (head, tail) = items.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
