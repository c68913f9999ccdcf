use rand::rngs::SmallRng;
use rand::SeedableRng;
use verlet_outline::{
    fit_to_width, Bounds, DragConfig, DragHandle, Engine, EngineConfig, OutlineConfig, Particle,
    SoftBody, SpringGroup, Vec2,
};

fn ring(cx: f64, cy: f64, r: f64, n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * core::f64::consts::TAU;
            (cx + r * t.cos(), cy + r * t.sin())
        })
        .collect()
}

fn canvas() -> Engine {
    Engine::new(EngineConfig::new().with_bounds(Bounds::from_size(640.0, 480.0).unwrap()))
}

#[test]
fn outline_settles_inside_the_canvas() {
    let mut engine = canvas();
    let paths = fit_to_width(&[ring(0.0, 0.0, 50.0, 32), ring(120.0, 0.0, 30.0, 20)], 600.0).unwrap();
    let mut rng = SmallRng::seed_from_u64(9);
    let body = SoftBody::build(&mut engine, &paths, &OutlineConfig::default(), &mut rng).unwrap();

    assert_eq!(body.paths().len(), 2);
    assert_eq!(engine.particle_count(), 52);
    assert_eq!(body.springs(SpringGroup::Shell).len(), 52);

    let start = body.centroid(&engine).unwrap();
    for _ in 0..300 {
        engine.update(16.0).unwrap();
    }
    let end = body.centroid(&engine).unwrap();
    assert!(end.y() > start.y(), "body should sag under gravity");

    // Bounds are enforced before integration, so allow one sub-step of drift.
    let bounds = engine.bounds().inset(-5.0).unwrap();
    for (_, p) in engine.particles() {
        assert!(bounds.contains(p.pos), "particle escaped: {:?}", p.pos);
    }
}

#[test]
fn drag_pulls_the_shape_towards_the_pointer() {
    let mut engine = Engine::new(EngineConfig::new().with_gravity(Vec2::ZERO));
    let paths = fit_to_width(&[ring(0.0, 0.0, 20.0, 16)], 40.0).unwrap();
    let mut rng = SmallRng::seed_from_u64(5);
    let body = SoftBody::build(&mut engine, &paths, &OutlineConfig::default(), &mut rng).unwrap();
    let particles_before = engine.particle_count();
    let springs_before = engine.spring_count();

    let grab_point = Vec2::new(20.0, 20.0).unwrap();
    let drag = DragHandle::grab(&mut engine, grab_point, &DragConfig::default(), &mut rng).unwrap();
    assert_eq!(drag.springs().len(), 16);
    assert!(engine.particle(drag.anchor()).unwrap().pinned);

    let start = body.centroid(&engine).unwrap();
    let target = Vec2::new(200.0, 20.0).unwrap();
    drag.move_to(&mut engine, target).unwrap();
    for _ in 0..60 {
        engine.update(16.0).unwrap();
    }
    assert_eq!(engine.particle(drag.anchor()).unwrap().pos, target);
    let end = body.centroid(&engine).unwrap();
    assert!(end.x() > start.x() + 10.0, "centroid moved from {:?} to {:?}", start, end);

    drag.release(&mut engine).unwrap();
    assert_eq!(engine.particle_count(), particles_before);
    assert_eq!(engine.spring_count(), springs_before);
    assert!(engine.update(16.0).is_ok());
}

#[test]
fn drag_respects_reach_and_link_limit() {
    let mut engine = Engine::new(EngineConfig::new());
    for i in 0..10 {
        engine.add_particle(Particle::new(i as f64 * 10.0, 0.0).unwrap());
    }
    let mut rng = SmallRng::seed_from_u64(11);
    let config = DragConfig { reach: 25.0, max_links: 2, stiffness: 0.01 };
    let drag = DragHandle::grab(&mut engine, Vec2::ZERO, &config, &mut rng).unwrap();
    assert_eq!(drag.springs().len(), 2);
    for &s in drag.springs() {
        let spring = engine.spring(s).unwrap();
        let other = engine.particle(spring.b).unwrap();
        assert!(other.pos.x() < 25.0);
    }

    let wide = DragConfig { reach: 1000.0, ..DragConfig::default() };
    let second = DragHandle::grab(&mut engine, Vec2::ZERO, &wide, &mut rng).unwrap();
    // The first anchor is pinned and never picked up.
    assert_eq!(second.springs().len(), 10);
}

#[test]
fn despawn_removes_everything() {
    let mut engine = canvas();
    let paths = fit_to_width(&[ring(0.0, 0.0, 10.0, 12)], 100.0).unwrap();
    let mut rng = SmallRng::seed_from_u64(2);
    let body = SoftBody::build(&mut engine, &paths, &OutlineConfig::default(), &mut rng).unwrap();
    body.despawn(&mut engine).unwrap();
    assert_eq!(engine.particle_count(), 0);
    assert_eq!(engine.spring_count(), 0);
}

#[test]
fn rejected_grab_leaves_engine_untouched() {
    let mut engine = Engine::new(EngineConfig::new());
    for i in 0..5 {
        engine.add_particle(Particle::new(i as f64, 0.0).unwrap());
    }
    let mut rng = SmallRng::seed_from_u64(3);
    let config = DragConfig::default();
    let bad = DragConfig { stiffness: f64::NAN, ..DragConfig::default() };
    assert!(DragHandle::grab(&mut engine, Vec2::ZERO, &bad, &mut rng).is_err());
    assert!(DragHandle::grab(&mut engine, Vec2::INFINITY, &config, &mut rng).is_err());
    assert_eq!(engine.particle_count(), 5);
    assert_eq!(engine.spring_count(), 0);

    let drag = DragHandle::grab(&mut engine, Vec2::ZERO, &config, &mut rng).unwrap();
    assert!(drag.move_to(&mut engine, Vec2::INFINITY).is_err());
    assert_eq!(engine.particle(drag.anchor()).unwrap().pos, Vec2::ZERO);
}
