//! TPRPG Simulation Core
//!
//! ECS-симуляция волшебника на Bevy 0.16 (headless):
//! - movement + dash (FixedUpdate)
//! - spell crafting state machine (Update)
//! - look direction + world time dilation
//!
//! Host (рендер, камера, input devices) пишет `PlayerInputEvent` и
//! `CursorHit`, читает domain events (`SpellCast`, `DashStarted`, ...).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod components;
pub mod config;
pub mod dash;
pub mod input;
pub mod logger;
pub mod look;
pub mod physics;
pub mod player;
pub mod scenario;
pub mod spell;
pub mod world_time;

pub use components::*;
pub use config::{ConfigError, WizardTuning};
pub use dash::{DashAbility, DashHalted, DashIntent, DashPlugin, DashReady, DashStarted};
pub use input::{PlayerInputEvent, PlayerInputPlugin};
pub use logger::*;
pub use look::{LookPlugin, LookState};
pub use physics::{CursorHit, CursorHitResult, CursorRay, CursorRaycastPlugin, KinematicController, KinematicControllerPlugin};
pub use player::{spawn_unbound_wizard, spawn_wizard};
pub use spell::{
    CraftingEnded, CraftingSession, CraftingStarted, CurrentSpell, ProjectileFired, SpellCast, SpellCode, SpellEffect,
    SpellEffectActor, SpellFizzled, SpellGrid, SpellPointId, SpellPointTouched, SpellcraftPlugin, CRAFTING_TIME_SCALE,
    MAX_SPELL_LENGTH,
};
pub use world_time::{TimeDilationRequest, WorldTimePlugin};

/// Порядок gameplay систем в Update
///
/// Input → Abilities (dash / crafting / fire) → Look → Effects (time dilation)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardSet {
    Input,
    Abilities,
    Look,
    Effects,
}

/// Порядок в FixedUpdate: таймеры (dash halt) раньше movement
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedWizardSet {
    Timers,
    Movement,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `WizardTuning` можно вставить заранее (например из tuning.ron), иначе defaults.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let tuning = app.world().get_resource::<WizardTuning>().cloned().unwrap_or_default();

        app.configure_sets(
            Update,
            (WizardSet::Input, WizardSet::Abilities, WizardSet::Look, WizardSet::Effects).chain(),
        )
        .configure_sets(FixedUpdate, (FixedWizardSet::Timers, FixedWizardSet::Movement).chain())
        .insert_resource(Time::<Fixed>::from_hz(tuning.fixed_hz))
        .insert_resource(tuning)
        .init_resource::<CursorHit>()
        .add_plugins((
            PlayerInputPlugin,
            KinematicControllerPlugin,
            DashPlugin,
            SpellcraftPlugin,
            LookPlugin,
            WorldTimePlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (MinimalPlugins + SimulationPlugin)
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_tuning(seed, WizardTuning::default())
}

pub fn create_headless_app_with_tuning(seed: u64, tuning: WizardTuning) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(tuning)
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
