//! Headless wizard driver
//!
//! Заменяет host: пишет `PlayerInputEvent` и `CursorHit` frame за frame'ом,
//! время двигается вручную (`TimeUpdateStrategy::ManualDuration`), поэтому
//! прогон полностью воспроизводим.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::Rng;

use crate::config::WizardTuning;
use crate::dash::DashStarted;
use crate::input::PlayerInputEvent;
use crate::look::LookState;
use crate::physics::{CursorHit, CursorRay};
use crate::player::spawn_wizard;
use crate::spell::{
    locate_grid_point, CraftingSession, CraftingStarted, ProjectileFired, SpellCast, SpellEffect, SpellFizzled,
    SpellPointId,
};
use crate::{create_headless_app_with_tuning, DeterministicRng, WizardSet};

/// Счётчики domain events за прогон
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub crafting_started: u32,
    pub spells_cast: u32,
    pub spells_fizzled: u32,
    pub projectiles_fired: u32,
    pub dashes: u32,
    pub casts_by_effect: Vec<(SpellEffect, u32)>,
}

impl SessionStats {
    pub fn casts_of(&self, effect: SpellEffect) -> u32 {
        self.casts_by_effect
            .iter()
            .find(|(e, _)| *e == effect)
            .map_or(0, |(_, count)| *count)
    }
}

pub fn record_session_stats(
    mut stats: ResMut<SessionStats>,
    mut crafting: EventReader<CraftingStarted>,
    mut casts: EventReader<SpellCast>,
    mut fizzles: EventReader<SpellFizzled>,
    mut fired: EventReader<ProjectileFired>,
    mut dashes: EventReader<DashStarted>,
) {
    stats.crafting_started += crafting.read().count() as u32;
    stats.spells_fizzled += fizzles.read().count() as u32;
    stats.projectiles_fired += fired.read().count() as u32;
    stats.dashes += dashes.read().count() as u32;

    for cast in casts.read() {
        stats.spells_cast += 1;
        match stats.casts_by_effect.iter().position(|(e, _)| *e == cast.effect) {
            Some(index) => stats.casts_by_effect[index].1 += 1,
            None => stats.casts_by_effect.push((cast.effect, 1)),
        }
    }
}

/// Headless App + один волшебник
pub struct WizardDriver {
    pub app: App,
    pub wizard: Entity,
}

impl WizardDriver {
    pub fn new(seed: u64, tuning: WizardTuning) -> Self {
        let app = create_headless_app_with_tuning(seed, tuning.clone());
        Self::from_app(app, &tuning)
    }

    /// Driver поверх уже собранного App (например с Rapier + CursorRaycastPlugin)
    ///
    /// App должен содержать SimulationPlugin; `finish`/`cleanup` вызываются здесь.
    pub fn from_app(mut app: App, tuning: &WizardTuning) -> Self {
        let step = Duration::from_secs_f64(1.0 / tuning.fixed_hz);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(step))
            .init_resource::<SessionStats>()
            .add_systems(Update, record_session_stats.after(WizardSet::Effects));

        let world = app.world_mut();
        let wizard = {
            let mut commands = world.commands();
            spawn_wizard(&mut commands, Vec3::ZERO, tuning)
        };
        world.flush();

        app.finish();
        app.cleanup();

        // Первый update: Time стартует с нулевым delta
        app.update();

        Self { app, wizard }
    }

    pub fn frame(&mut self, input: PlayerInputEvent) {
        self.app.world_mut().send_event(input);
        self.app.update();
    }

    pub fn idle(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.update();
        }
    }

    /// Cursor ray для CursorRaycastPlugin (луч сверху вниз на `target`)
    pub fn aim_ray_down_at(&mut self, target: Vec3) {
        let ray = Ray3d::new(target + Vec3::Y * 10.0, Dir3::NEG_Y);
        self.app.insert_resource(CursorRay(Some(ray)));
    }

    pub fn set_cursor(&mut self, hit: CursorHit) {
        *self.app.world_mut().resource_mut::<CursorHit>() = hit;
    }

    pub fn look_state(&self) -> Option<LookState> {
        self.app.world().get::<LookState>(self.wizard).copied()
    }

    pub fn session(&self) -> Option<&CraftingSession> {
        self.app.world().get::<CraftingSession>(self.wizard)
    }

    pub fn position(&self) -> Vec3 {
        self.app
            .world()
            .get::<Transform>(self.wizard)
            .map_or(Vec3::ZERO, |t| t.translation)
    }

    pub fn stats(&self) -> SessionStats {
        self.app.world().resource::<SessionStats>().clone()
    }

    /// Начать crafting с курсором на земле в `target`
    pub fn start_crafting_at(&mut self, target: Vec3) {
        self.set_cursor(CursorHit::ground(target));
        self.frame(PlayerInputEvent::start_crafting());
    }

    /// Провести курсор по точкам активного grid'а (каждая точка — `hover` frame'ов)
    ///
    /// Возвращает false если session пропала раньше, чем закончился trace.
    pub fn trace(&mut self, digits: &[u8], hover: usize) -> bool {
        for digit in digits {
            let Some(grid) = self.session().and_then(|session| session.grid) else {
                return false;
            };
            let Ok(id) = SpellPointId::new(*digit) else {
                return false;
            };
            let Some((point, location)) = locate_grid_point(self.app.world_mut(), grid, id) else {
                return false;
            };

            self.set_cursor(CursorHit::on_entity(point, location));
            for _ in 0..hover.max(1) {
                self.frame(PlayerInputEvent::draw());
            }
        }
        true
    }

    /// Полный цикл: start → trace pattern → release RMB
    pub fn cast(&mut self, effect: SpellEffect, target: Vec3) {
        self.start_crafting_at(target);
        self.trace(&effect.pattern(), 2);
        self.frame(PlayerInputEvent::end_crafting());
    }

    /// Seeded-random сессия: ходьба, dash, crafting (иногда с ошибками), fire
    pub fn run_random_session(&mut self, frames: usize) {
        let mut frame = 0;
        while frame < frames {
            let (roll, direction, effect_index, digits, target) = {
                let mut rng = self.app.world_mut().resource_mut::<DeterministicRng>();
                let rng = &mut rng.rng;
                let roll: f32 = rng.gen();
                let direction = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
                let effect_index = rng.gen_range(0..SpellEffect::ALL.len());
                let digits: Vec<u8> = (0..5).map(|_| rng.gen_range(1..=9)).collect();
                let target = Vec3::new(rng.gen_range(-8.0..8.0), 0.0, rng.gen_range(-8.0..8.0));
                (roll, direction, effect_index, digits, target)
            };

            match roll {
                r if r < 0.05 => self.frame(PlayerInputEvent::dash()),
                r if r < 0.08 => {
                    self.cast(SpellEffect::ALL[effect_index], target);
                    frame += 12;
                }
                r if r < 0.10 => {
                    // Случайный trace: чаще всего fizzle
                    self.start_crafting_at(target);
                    self.trace(&digits, 1);
                    self.frame(PlayerInputEvent::end_crafting());
                    frame += 7;
                }
                r if r < 0.15 => self.frame(PlayerInputEvent::fire()),
                _ => self.frame(PlayerInputEvent::moving(direction)),
            }
            frame += 1;
        }
    }
}
