//! Integration test: grinding dust particle field.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use teacraft::workshop::grinding::{
    ParticleField, PressureLevel, CANVAS_HEIGHT, CANVAS_WIDTH, SPAWN_SPREAD,
};

#[test]
fn test_removed_particles_are_spent() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut field = ParticleField::default();
    let mut removed_total = 0;

    for frame in 0..2000 {
        // Grind for the first half, then let the dust settle.
        if frame < 1000 {
            field.spawn(&mut rng, PressureLevel::Heavy);
        }
        let removed = field.update();
        removed_total += removed;

        assert_eq!(field.last_removed().len(), removed);
        for p in field.last_removed() {
            assert!(p.size <= 0.0 || p.opacity <= 0.0);
        }
        for p in field.particles() {
            assert!(p.size > 0.0 && p.opacity > 0.0);
        }
    }

    assert!(removed_total > 0);
    assert!(field.is_empty());
}

#[test]
fn test_burst_sizes_follow_pressure() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for level in PressureLevel::ALL {
        let mut field = ParticleField::default();
        for _ in 0..200 {
            let added = field.spawn(&mut rng, level);
            assert!(added == 0 || added == level.burst_size());
        }
    }
}

#[test]
fn test_spawn_rate_scales_with_pressure() {
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let rolls = 5000;
    let hits = |level: PressureLevel, rng: &mut ChaCha8Rng| {
        let mut field = ParticleField::default();
        (0..rolls).filter(|_| field.spawn(&mut *rng, level) > 0).count() as f64 / rolls as f64
    };

    let light = hits(PressureLevel::Light, &mut rng);
    let medium = hits(PressureLevel::Medium, &mut rng);
    let heavy = hits(PressureLevel::Heavy, &mut rng);
    assert!((light - 0.3).abs() < 0.05, "light {light}");
    assert!((medium - 0.6).abs() < 0.05, "medium {medium}");
    assert!((heavy - 0.9).abs() < 0.05, "heavy {heavy}");
}

#[test]
fn test_particles_spawn_around_centre() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut field = ParticleField::default();
    for _ in 0..100 {
        field.spawn(&mut rng, PressureLevel::Heavy);
    }
    let (cx, cy) = (CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
    assert!(!field.is_empty());
    for p in field.particles() {
        assert!((p.x - cx).abs() <= SPAWN_SPREAD / 2.0);
        assert!((p.y - cy).abs() <= SPAWN_SPREAD / 2.0);
    }
}

#[test]
fn test_clear_empties_field() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let mut field = ParticleField::default();
    for _ in 0..20 {
        field.frame(&mut rng, PressureLevel::Medium);
    }
    field.clear();
    assert_eq!(field.len(), 0);
    assert!(field.last_removed().is_empty());
}
