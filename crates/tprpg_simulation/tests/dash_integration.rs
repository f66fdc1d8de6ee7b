//! Integration тесты dash + movement (FixedUpdate 60Hz, 1 tick на frame)

use bevy::prelude::*;
use tprpg_simulation::scenario::WizardDriver;
use tprpg_simulation::{DashAbility, Dead, PhysicsBody, PlayerInputEvent, WizardTuning};

fn driver() -> WizardDriver {
    WizardDriver::new(7, WizardTuning::default())
}

fn velocity(driver: &WizardDriver) -> Vec3 {
    driver
        .app
        .world()
        .get::<PhysicsBody>(driver.wizard)
        .map_or(Vec3::ZERO, |body| body.velocity)
}

fn ability(driver: &WizardDriver) -> Option<DashAbility> {
    driver.app.world().get::<DashAbility>(driver.wizard).copied()
}

#[test]
fn test_dash_launches_along_last_input() {
    let mut driver = driver();

    driver.frame(PlayerInputEvent::moving(Vec2::new(0.0, 1.0)));
    // Dash snapshot без движения: направление берётся из last_direction
    driver.frame(PlayerInputEvent::dash());

    assert_eq!(driver.stats().dashes, 1);
    let launch = velocity(&driver);
    assert!((launch.z + 10.0).abs() < 1e-4, "velocity = {:?}", launch);
    assert_eq!(launch.y, 0.0);

    driver.idle(30);

    // Halt на 12-м tick'е (Timers раньше Movement): 1 tick ходьбы (5/60) + 11 tick'ов launch (10/60)
    assert_eq!(velocity(&driver), Vec3::ZERO);
    let z = driver.position().z;
    let expected = -(5.0 / 60.0 + 11.0 * 10.0 / 60.0);
    assert!((z - expected).abs() < 1e-3, "z = {}, expected {}", z, expected);
}

#[test]
fn test_dash_is_latched_until_cooldown() {
    let mut driver = driver();

    driver.frame(PlayerInputEvent::moving(Vec2::new(1.0, 0.0)));
    driver.frame(PlayerInputEvent::dash());
    assert_eq!(driver.stats().dashes, 1);

    // ~0.1 s спустя (cooldown 1.0 s) — no-op
    driver.idle(6);
    driver.frame(PlayerInputEvent::dash());
    assert_eq!(driver.stats().dashes, 1);
    assert!(!ability(&driver).is_some_and(|a| a.can_dash()));

    // После cooldown ability снова Ready
    driver.idle(60);
    assert_eq!(ability(&driver), Some(DashAbility::Ready));
    driver.frame(PlayerInputEvent::dash());
    assert_eq!(driver.stats().dashes, 2);
}

#[test]
fn test_dash_without_input_still_uses_cooldown() {
    let mut driver = driver();

    driver.frame(PlayerInputEvent::dash());
    assert_eq!(driver.stats().dashes, 1);
    assert_eq!(velocity(&driver), Vec3::ZERO);

    driver.frame(PlayerInputEvent::dash());
    assert_eq!(driver.stats().dashes, 1);
}

#[test]
fn test_walking_resumes_after_halt() {
    let mut driver = driver();

    driver.frame(PlayerInputEvent::moving(Vec2::new(1.0, 0.0)));
    driver.frame(PlayerInputEvent::dash());

    for _ in 0..30 {
        driver.frame(PlayerInputEvent::moving(Vec2::new(1.0, 0.0)));
    }

    let v = velocity(&driver);
    assert!((v.x - 5.0).abs() < 1e-4, "velocity = {:?}", v);
}

#[test]
fn test_dead_wizard_cannot_dash() {
    let mut driver = driver();
    driver.app.world_mut().entity_mut(driver.wizard).insert(Dead);

    driver.frame(PlayerInputEvent::moving(Vec2::new(1.0, 0.0)));
    driver.frame(PlayerInputEvent::dash());

    assert_eq!(driver.stats().dashes, 0);
    assert_eq!(ability(&driver), Some(DashAbility::Ready));
}
