//! Integration test: workshop routing across the three stations.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use teacraft::assets::AssetKind;
use teacraft::process::Verdict;
use teacraft::workshop::{CraftStep, PressureLevel, Workshop, WorkshopInput};
use teacraft::WorkshopConfig;

fn config_with(stations: Vec<CraftStep>) -> WorkshopConfig {
    WorkshopConfig {
        stations,
        assets_dir: Some(PathBuf::from("/nonexistent/teacraft-assets")),
        ..Default::default()
    }
}

fn run_for(workshop: &mut Workshop, rng: &mut ChaCha8Rng, ms: u64) {
    for _ in 0..ms / 16 {
        workshop.advance(16, rng);
    }
}

#[test]
fn test_missing_station_ignores_input() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut workshop = Workshop::new(&config_with(vec![CraftStep::Grinding]), &mut rng);

    workshop.handle_input(WorkshopInput::SelectStep(CraftStep::Steaming), &mut rng);
    assert_eq!(workshop.selected(), CraftStep::Steaming);
    assert!(workshop.steaming().is_none());

    assert_eq!(workshop.handle_input(WorkshopInput::Toggle, &mut rng), None);
    assert_eq!(workshop.handle_input(WorkshopInput::Increase, &mut rng), None);
    assert!(!workshop.advance(100, &mut rng));
}

#[test]
fn test_grinding_assets_load_when_shown() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut workshop = Workshop::new(&config_with(CraftStep::ALL.to_vec()), &mut rng);
    assert_eq!(workshop.selected(), CraftStep::Steaming);
    assert!(workshop.grinding().is_some_and(|g| g.assets.is_none()));

    workshop.handle_input(WorkshopInput::NextStep, &mut rng);
    assert_eq!(workshop.selected(), CraftStep::Grinding);

    let assets = workshop
        .grinding()
        .and_then(|g| g.assets.clone())
        .expect("assets loaded on first display");
    // The assets directory does not exist, so these are the fallbacks.
    let stone = AssetKind::GrindStone.dimensions();
    let leaves = AssetKind::TeaLeaves.dimensions();
    assert_eq!((assets.stone.width(), assets.stone.height()), stone);
    assert_eq!((assets.leaves.width(), assets.leaves.height()), leaves);
}

#[test]
fn test_assets_load_from_directory() {
    let dir = std::env::temp_dir().join(format!("teacraft_assets_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("grind-stone.txt"), "####\n#  #\n####\n").unwrap();
    std::fs::write(dir.join("tea-leaves.txt"), "").unwrap();

    let config = WorkshopConfig {
        stations: vec![CraftStep::Grinding],
        assets_dir: Some(dir.clone()),
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let workshop = Workshop::new(&config, &mut rng);
    let assets = workshop.grinding().and_then(|g| g.assets.clone()).unwrap();

    // Loaded art is padded to the declared size.
    assert_eq!(assets.stone.lines()[0], format!("{:<16}", "####"));
    assert_eq!(assets.stone.height(), 8);
    // The empty file falls back to a generated pile of the same size.
    assert_eq!(assets.leaves.width(), 20);
    assert!(assets.leaves.filled_cells() > 0);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_runs_continue_on_other_steps() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut workshop = Workshop::new(&config_with(CraftStep::ALL.to_vec()), &mut rng);

    workshop.handle_input(WorkshopInput::Toggle, &mut rng);
    assert!(workshop.is_running(CraftStep::Steaming));

    workshop.handle_input(WorkshopInput::SelectStep(CraftStep::Pressing), &mut rng);
    workshop.handle_input(WorkshopInput::Toggle, &mut rng);
    assert!(workshop.is_running(CraftStep::Pressing));

    // Steaming at heat 50 takes 15s, pressing 10s.
    run_for(&mut workshop, &mut rng, 11_000);
    assert!(workshop.is_running(CraftStep::Steaming));
    assert!(!workshop.is_running(CraftStep::Pressing));
    assert_eq!(
        workshop.last_verdict(),
        Some((CraftStep::Pressing, Verdict::Optimal))
    );

    run_for(&mut workshop, &mut rng, 5_000);
    assert!(!workshop.is_running(CraftStep::Steaming));
    assert_eq!(
        workshop.last_verdict(),
        Some((CraftStep::Steaming, Verdict::Optimal))
    );
}

#[test]
fn test_cake_revealed_half_second_after_pressing() {
    let config = config_with(vec![CraftStep::Pressing]);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut workshop = Workshop::new(&config, &mut rng);
    workshop.handle_input(WorkshopInput::Toggle, &mut rng);

    for _ in 0..100 {
        workshop.advance(100, &mut rng);
    }
    let press = workshop.pressing().unwrap();
    assert!(!press.driver.is_running());
    assert!(!press.cake_visible);

    workshop.advance(100, &mut rng);
    workshop.advance(100, &mut rng);
    workshop.advance(100, &mut rng);
    workshop.advance(100, &mut rng);
    assert!(!workshop.pressing().unwrap().cake_visible);
    workshop.advance(100, &mut rng);
    assert!(workshop.pressing().unwrap().cake_visible);
}

#[test]
fn test_toggle_stop_records_verdict() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut workshop = Workshop::new(&config_with(vec![CraftStep::Steaming]), &mut rng);
    workshop.handle_input(WorkshopInput::Toggle, &mut rng);
    run_for(&mut workshop, &mut rng, 480);

    let verdict = workshop.handle_input(WorkshopInput::Toggle, &mut rng);
    assert_eq!(verdict, Some(Verdict::InsufficientProcess));
    assert_eq!(
        workshop.last_verdict(),
        Some((CraftStep::Steaming, Verdict::InsufficientProcess))
    );
}

#[test]
fn test_pressure_controls_route_to_grinding() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let config = WorkshopConfig {
        initial_pressure: PressureLevel::Light,
        ..config_with(vec![CraftStep::Grinding])
    };
    let mut workshop = Workshop::new(&config, &mut rng);
    assert_eq!(workshop.selected(), CraftStep::Grinding);

    workshop.handle_input(WorkshopInput::Increase, &mut rng);
    workshop.handle_input(WorkshopInput::Increase, &mut rng);
    let grinding = workshop.grinding().unwrap();
    assert_eq!(grinding.pressure, PressureLevel::Heavy);
    assert_eq!(grinding.driver.state().control_value(), 80.0);

    workshop.handle_input(WorkshopInput::Decrease, &mut rng);
    assert_eq!(workshop.grinding().unwrap().pressure, PressureLevel::Medium);
}

#[test]
fn test_heat_controls_route_to_steaming() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut workshop = Workshop::new(&config_with(CraftStep::ALL.to_vec()), &mut rng);
    workshop.handle_input(WorkshopInput::Increase, &mut rng);
    assert_eq!(workshop.steaming().unwrap().heat(), 55.0);
    workshop.handle_input(WorkshopInput::Decrease, &mut rng);
    workshop.handle_input(WorkshopInput::Decrease, &mut rng);
    assert_eq!(workshop.steaming().unwrap().heat(), 45.0);
}
