//! Integration тесты spell crafting state machine
//!
//! Headless App + WizardDriver: input snapshots и CursorHit пишем сами,
//! время двигается по 1/60 s на frame.

use bevy::prelude::*;
use tprpg_simulation::scenario::WizardDriver;
use tprpg_simulation::spell::SpellGridPoint;
use tprpg_simulation::{
    CraftingSession, CurrentSpell, CursorHit, Dead, LookState, PlayerInputEvent, SpellEffect, SpellEffectActor,
    SpellGrid, WizardActions, WizardTuning, CRAFTING_TIME_SCALE,
};

fn driver() -> WizardDriver {
    WizardDriver::new(42, WizardTuning::default())
}

fn time_scale(driver: &WizardDriver) -> f32 {
    driver.app.world().resource::<Time<Virtual>>().relative_speed()
}

fn count<T: Component>(driver: &mut WizardDriver) -> usize {
    let world = driver.app.world_mut();
    world.query::<&T>().iter(world).count()
}

fn spell_actors(driver: &mut WizardDriver) -> Vec<(SpellEffectActor, Vec3)> {
    let world = driver.app.world_mut();
    world
        .query::<(&SpellEffectActor, &Transform)>()
        .iter(world)
        .map(|(actor, transform)| (*actor, transform.translation))
        .collect()
}

#[test]
fn test_start_crafting_spawns_grid_and_slows_time() {
    let mut driver = driver();
    let target = Vec3::new(3.0, 0.0, -2.0);

    driver.start_crafting_at(target);

    assert_eq!(driver.look_state(), Some(LookState::Crafting));
    assert_eq!(time_scale(&driver), CRAFTING_TIME_SCALE);
    assert_eq!(count::<SpellGrid>(&mut driver), 1);
    assert_eq!(count::<SpellGridPoint>(&mut driver), 9);

    let session = driver.session().expect("session should exist");
    assert_eq!(session.origin, target);
    assert!(session.code.is_empty());
}

#[test]
fn test_cursor_miss_falls_back_to_caster_position() {
    let mut driver = driver();

    driver.set_cursor(CursorHit::default());
    driver.frame(PlayerInputEvent::start_crafting());

    let origin = driver.session().map(|s| s.origin);
    assert_eq!(origin, Some(driver.position()));
}

#[test]
fn test_fireball_cast_end_to_end() {
    let mut driver = driver();
    let target = Vec3::new(3.0, 0.0, -2.0);

    driver.start_crafting_at(target);
    assert!(driver.trace(&SpellEffect::Fireball.pattern(), 2));

    // Cast resolution закрывает session сама, RMB ещё зажата
    assert_eq!(driver.look_state(), Some(LookState::Aiming));
    assert!(driver.session().is_none());
    assert_eq!(count::<SpellGrid>(&mut driver), 0);
    assert_eq!(count::<SpellGridPoint>(&mut driver), 0);
    assert_eq!(time_scale(&driver), 1.0);

    let actors = spell_actors(&mut driver);
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0].0.effect, SpellEffect::Fireball);
    assert_eq!(actors[0].0.caster, driver.wizard);
    assert_eq!(actors[0].1, target + Vec3::Y * WizardTuning::default().spell_spawn_height);

    let current = driver.app.world().get::<CurrentSpell>(driver.wizard).copied();
    assert_eq!(current.map(|c| c.effect), Some(SpellEffect::Fireball));

    // Отпускание RMB после cast: Aiming сохраняется
    driver.frame(PlayerInputEvent::end_crafting());
    assert_eq!(driver.look_state(), Some(LookState::Aiming));

    let stats = driver.stats();
    assert_eq!(stats.spells_cast, 1);
    assert_eq!(stats.casts_of(SpellEffect::Fireball), 1);
}

#[test]
fn test_each_spell_spawns_with_its_offset() {
    for effect in SpellEffect::ALL {
        let mut driver = driver();
        let target = Vec3::new(-1.0, 0.0, -5.0);

        driver.cast(effect, target);

        let actors = spell_actors(&mut driver);
        assert_eq!(actors.len(), 1, "{:?}", effect);
        assert_eq!(actors[0].0.effect, effect);

        let expected_y = match effect {
            SpellEffect::Lightningbolt => 0.0,
            SpellEffect::Fireball | SpellEffect::Frostbolt => 1.0,
        };
        assert_eq!(actors[0].1.y, expected_y, "{:?}", effect);
    }
}

#[test]
fn test_unknown_code_fizzles_without_spawn() {
    let mut driver = driver();

    driver.start_crafting_at(Vec3::new(0.0, 0.0, -3.0));
    driver.trace(&[1, 2, 3, 4, 5], 1);

    assert_eq!(driver.look_state(), Some(LookState::Default));
    assert!(driver.session().is_none());
    assert!(spell_actors(&mut driver).is_empty());
    assert_eq!(count::<SpellGrid>(&mut driver), 0);
    assert_eq!(time_scale(&driver), 1.0);

    let stats = driver.stats();
    assert_eq!(stats.spells_fizzled, 1);
    assert_eq!(stats.spells_cast, 0);
}

#[test]
fn test_four_points_never_cast() {
    let mut driver = driver();

    driver.start_crafting_at(Vec3::new(0.0, 0.0, -3.0));
    driver.trace(&[2, 7, 5, 4], 3);

    assert_eq!(driver.look_state(), Some(LookState::Crafting));
    assert_eq!(driver.session().map(|s| s.code.to_string()), Some("2754".to_string()));
    assert!(spell_actors(&mut driver).is_empty());
}

#[test]
fn test_hovering_one_point_does_not_grow_code() {
    let mut driver = driver();

    driver.start_crafting_at(Vec3::ZERO);
    driver.trace(&[5], 10);

    assert_eq!(driver.session().map(|s| s.code.len()), Some(1));
}

#[test]
fn test_cursor_on_ground_does_not_touch() {
    let mut driver = driver();

    driver.start_crafting_at(Vec3::new(0.0, 0.0, -3.0));
    driver.set_cursor(CursorHit::ground(Vec3::new(1.0, 0.0, -3.0)));
    driver.frame(PlayerInputEvent::draw());

    assert_eq!(driver.session().map(|s| s.code.is_empty()), Some(true));
}

#[test]
fn test_early_end_clears_state_and_restores_time() {
    let mut driver = driver();

    driver.start_crafting_at(Vec3::new(0.0, 0.0, -3.0));
    driver.trace(&[2, 7], 1);
    driver.frame(PlayerInputEvent::end_crafting());

    assert_eq!(driver.look_state(), Some(LookState::Default));
    assert!(driver.session().is_none());
    assert_eq!(count::<SpellGrid>(&mut driver), 0);
    assert_eq!(time_scale(&driver), 1.0);

    // Повторный end безопасен
    driver.frame(PlayerInputEvent::end_crafting());
    driver.frame(PlayerInputEvent::end_crafting());
    assert_eq!(driver.look_state(), Some(LookState::Default));
    assert_eq!(time_scale(&driver), 1.0);

    // Новый session начинается с пустого code
    driver.start_crafting_at(Vec3::ZERO);
    assert_eq!(driver.session().map(|s| s.code.len()), Some(0));
}

#[test]
fn test_fire_releases_prepared_spell() {
    let mut driver = driver();

    // Fire без заготовки — no-op
    driver.frame(PlayerInputEvent::fire());
    assert_eq!(driver.stats().projectiles_fired, 0);

    driver.cast(SpellEffect::Frostbolt, Vec3::new(0.0, 0.0, -4.0));
    assert_eq!(driver.look_state(), Some(LookState::Aiming));

    driver.frame(PlayerInputEvent::fire());
    assert_eq!(driver.look_state(), Some(LookState::Default));
    assert!(driver.app.world().get::<CurrentSpell>(driver.wizard).is_none());
    assert_eq!(driver.stats().projectiles_fired, 1);

    driver.frame(PlayerInputEvent::fire());
    assert_eq!(driver.stats().projectiles_fired, 1);
}

#[test]
fn test_start_while_aiming_is_ignored() {
    let mut driver = driver();

    driver.cast(SpellEffect::Fireball, Vec3::new(0.0, 0.0, -4.0));
    driver.start_crafting_at(Vec3::new(5.0, 0.0, 0.0));

    assert_eq!(driver.look_state(), Some(LookState::Aiming));
    assert!(driver.session().is_none());
    assert_eq!(driver.stats().crafting_started, 1);
}

#[test]
fn test_death_aborts_crafting() {
    let mut driver = driver();

    driver.start_crafting_at(Vec3::new(0.0, 0.0, -3.0));
    driver.trace(&[2, 7, 5], 1);

    driver.app.world_mut().entity_mut(driver.wizard).insert(Dead);
    driver.idle(1);

    assert_eq!(driver.look_state(), Some(LookState::Default));
    assert!(driver.session().is_none());
    assert_eq!(count::<SpellGrid>(&mut driver), 0);
    assert_eq!(time_scale(&driver), 1.0);

    // Мёртвый не начинает новый crafting
    driver.start_crafting_at(Vec3::ZERO);
    assert!(driver.session().is_none());
}

#[test]
fn test_death_while_aiming_drops_prepared_spell() {
    let mut driver = driver();

    driver.cast(SpellEffect::Fireball, Vec3::new(0.0, 0.0, -4.0));
    assert_eq!(driver.look_state(), Some(LookState::Aiming));

    driver.app.world_mut().entity_mut(driver.wizard).insert(Dead);
    driver.idle(1);

    assert_eq!(driver.look_state(), Some(LookState::Default));
    assert!(driver.app.world().get::<CurrentSpell>(driver.wizard).is_none());
    assert_eq!(driver.stats().projectiles_fired, 0);
    // Effect actor не удаляется
    assert_eq!(spell_actors(&mut driver).len(), 1);
}

#[test]
fn test_unbound_wizard_only_walks() {
    let mut driver = driver();
    driver.app.world_mut().entity_mut(driver.wizard).remove::<WizardActions>();

    driver.start_crafting_at(Vec3::new(0.0, 0.0, -3.0));
    assert!(driver.session().is_none());

    driver.frame(PlayerInputEvent::dash());
    assert_eq!(driver.stats().dashes, 0);

    for _ in 0..30 {
        driver.frame(PlayerInputEvent::moving(Vec2::new(1.0, 0.0)));
    }
    assert!(driver.position().x > 1.0, "position = {:?}", driver.position());
}

#[test]
fn test_crafting_faces_frozen_origin() {
    let mut driver = driver();

    driver.start_crafting_at(Vec3::new(-5.0, 0.0, 0.0));
    // Курсор уходит в сторону — взгляд остаётся на origin
    driver.set_cursor(CursorHit::ground(Vec3::new(0.0, 0.0, 5.0)));
    driver.idle(1);

    let rotation = driver
        .app
        .world()
        .get::<Transform>(driver.wizard)
        .map(|t| t.rotation)
        .expect("wizard transform");
    let forward = rotation * Vec3::NEG_Z;
    assert!(forward.distance(Vec3::NEG_X) < 1e-3, "forward = {:?}", forward);

    // Session component на месте
    assert!(driver.app.world().get::<CraftingSession>(driver.wizard).is_some());
}
