//! Spell crafting systems (ECS)
//!
//! State machine `Default → Crafting → Aiming → Default`:
//! - `start_crafting`  — StartCraftingIntent, только из Default
//! - `draw_spell`      — DrawSpellIntent, касания spell points + cast resolution
//! - `end_crafting`    — EndCraftingIntent, из любого state
//! - `fire_prepared_spell` — FireIntent, только из Aiming
//! - `abort_crafting_on_death` / `drop_prepared_spell_on_death` — `Added<Dead>`
//!
//! Системы chained в этом порядке (commands применяются между ними).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::actors::{spawn_spell_effect, CurrentSpell};
use super::events::*;
use super::grid::{spawn_spell_grid, SpellGrid};
use super::point::SpellPointNode;
use super::session::{CastResolution, CraftingSession, TouchOutcome};
use crate::components::Dead;
use crate::config::WizardTuning;
use crate::logger::{log, log_error, log_info};
use crate::look::{facing_direction, LookState};
use crate::physics::CursorHit;
use crate::world_time::TimeDilationRequest;

/// Общий teardown crafting session (end intent, cast resolution, смерть)
#[derive(SystemParam)]
pub struct CraftingTeardown<'w, 's> {
    commands: Commands<'w, 's>,
    grids: Query<'w, 's, (), With<SpellGrid>>,
    time_requests: EventWriter<'w, TimeDilationRequest>,
    ended: EventWriter<'w, CraftingEnded>,
}

impl CraftingTeardown<'_, '_> {
    /// Закрыть session caster'а
    ///
    /// - Crafting → Default (Aiming после успешного cast сохраняется)
    /// - grid despawn идемпотентен: уже удалённый grid — no-op
    /// - время мира всегда возвращается к 1.0
    pub fn close(&mut self, caster: Entity, session: &mut CraftingSession, state: &mut LookState) {
        if *state == LookState::Crafting {
            *state = LookState::Default;
        }

        if let Some(grid) = session.take_grid() {
            if self.grids.contains(grid) {
                self.commands.entity(grid).despawn();
            }
        }

        let code = std::mem::take(&mut session.code);
        session.last_point = None;
        self.commands.entity(caster).remove::<CraftingSession>();

        self.time_requests.write(TimeDilationRequest::normal());
        self.ended.write(CraftingEnded { caster, code });
    }

    /// End без активной session: только state и время мира
    pub fn close_without_session(&mut self, state: &mut LookState) {
        if *state == LookState::Crafting {
            *state = LookState::Default;
        }
        self.time_requests.write(TimeDilationRequest::normal());
    }
}

/// System: StartCraftingIntent → CraftingSession + grid + time dilation
///
/// Origin замораживается в точке под курсором; нет hit'а — позиция caster'а.
pub fn start_crafting(
    mut commands: Commands,
    mut intents: EventReader<StartCraftingIntent>,
    mut casters: Query<(&Transform, &mut LookState, Has<CraftingSession>), Without<Dead>>,
    cursor: Res<CursorHit>,
    tuning: Res<WizardTuning>,
    mut time_requests: EventWriter<TimeDilationRequest>,
    mut started: EventWriter<CraftingStarted>,
) {
    for intent in intents.read() {
        let Ok((transform, mut state, in_session)) = casters.get_mut(intent.caster) else {
            continue;
        };

        if *state != LookState::Default || in_session {
            continue;
        }

        let origin = cursor.location().unwrap_or(transform.translation);
        let grid = spawn_spell_grid(&mut commands, intent.caster, origin, &tuning);

        *state = LookState::Crafting;
        commands
            .entity(intent.caster)
            .insert(CraftingSession::new(origin).with_grid(grid));

        log(&format!("🪄 Crafting started by {:?} at {:?}", intent.caster, origin));
        time_requests.write(TimeDilationRequest::crafting());
        started.write(CraftingStarted {
            caster: intent.caster,
            origin,
            grid,
        });
    }
}

/// System: DrawSpellIntent → касание spell point под курсором
///
/// Code растёт только если point отличается от предыдущего касания.
/// На длине MAX_SPELL_LENGTH — cast resolution и закрытие session.
pub fn draw_spell(
    mut intents: EventReader<DrawSpellIntent>,
    mut casters: Query<(&mut CraftingSession, &mut LookState), Without<Dead>>,
    mut points: Query<&mut SpellPointNode>,
    cursor: Res<CursorHit>,
    tuning: Res<WizardTuning>,
    mut teardown: CraftingTeardown,
    mut touched: EventWriter<SpellPointTouched>,
    mut cast_events: EventWriter<SpellCast>,
    mut fizzled: EventWriter<SpellFizzled>,
) {
    for intent in intents.read() {
        let Ok((mut session, mut state)) = casters.get_mut(intent.caster) else {
            continue;
        };

        // Session уже разрешена в этом frame (remove ещё не применён)
        if *state != LookState::Crafting || session.is_ready_to_cast() {
            continue;
        }

        let Some(point_entity) = cursor.entity() else {
            continue;
        };
        let Ok(mut node) = points.get_mut(point_entity) else {
            continue;
        };

        let id = node.enable_point();
        let outcome = session.touch(id);
        touched.write(SpellPointTouched {
            caster: intent.caster,
            point: point_entity,
            id,
            appended: matches!(outcome, TouchOutcome::Appended { .. } | TouchOutcome::Completed),
        });

        if outcome != TouchOutcome::Completed {
            continue;
        }

        match session.resolve() {
            CastResolution::Matched(effect) => {
                let position = session.spawn_position(effect, tuning.spell_spawn_height);
                let spell = spawn_spell_effect(&mut teardown.commands, effect, intent.caster, position);
                teardown
                    .commands
                    .entity(intent.caster)
                    .insert(CurrentSpell { spell, effect });

                *state = LookState::Aiming;
                log_info(&format!("✨ {} cast by {:?} at {:?}", effect.name(), intent.caster, position));
                cast_events.write(SpellCast {
                    caster: intent.caster,
                    effect,
                    spell,
                    position,
                });
            }
            CastResolution::NoMatch(code) => {
                log_error(&format!("INVALID SPELL COMBINATION: {}", code));
                fizzled.write(SpellFizzled {
                    caster: intent.caster,
                    code,
                });
            }
        }

        teardown.close(intent.caster, &mut session, &mut state);
    }
}

/// System: EndCraftingIntent → teardown (валиден из любого state)
pub fn end_crafting(
    mut intents: EventReader<EndCraftingIntent>,
    mut casters: Query<(Option<&mut CraftingSession>, &mut LookState)>,
    mut teardown: CraftingTeardown,
) {
    for intent in intents.read() {
        let Ok((session, mut state)) = casters.get_mut(intent.caster) else {
            continue;
        };

        match session {
            // Пустая session без grid — уже закрыта этим frame (remove ещё не применён)
            Some(mut session) if session.grid.is_some() || !session.code.is_empty() => {
                log(&format!("Crafting ended by {:?} with code '{}'", intent.caster, session.code));
                teardown.close(intent.caster, &mut session, &mut state);
            }
            Some(_) | None => teardown.close_without_session(&mut state),
        }
    }
}

/// System: смерть прерывает crafting
pub fn abort_crafting_on_death(
    mut casters: Query<(Entity, &mut CraftingSession, &mut LookState), Added<Dead>>,
    mut teardown: CraftingTeardown,
) {
    for (caster, mut session, mut state) in casters.iter_mut() {
        log(&format!("💀 {:?} died while crafting, session aborted", caster));
        teardown.close(caster, &mut session, &mut state);
    }
}

/// System: смерть во время Aiming — заготовка отпускается без выстрела
///
/// Effect actor остаётся в мире (его судьба — забота host'а), caster только
/// теряет `CurrentSpell` и возвращается в Default.
pub fn drop_prepared_spell_on_death(
    mut commands: Commands,
    mut casters: Query<(Entity, &mut LookState, Has<CurrentSpell>), Added<Dead>>,
) {
    for (caster, mut state, has_spell) in casters.iter_mut() {
        if *state == LookState::Aiming {
            *state = LookState::Default;
            log(&format!("💀 {:?} died while aiming, prepared spell dropped", caster));
        }
        if has_spell {
            commands.entity(caster).remove::<CurrentSpell>();
        }
    }
}

/// System: FireIntent → выпустить заготовленное заклинание (Aiming → Default)
pub fn fire_prepared_spell(
    mut commands: Commands,
    mut intents: EventReader<FireIntent>,
    mut casters: Query<(&Transform, &mut LookState, Option<&CurrentSpell>), Without<Dead>>,
    mut fired: EventWriter<ProjectileFired>,
) {
    for intent in intents.read() {
        let Ok((transform, mut state, current)) = casters.get_mut(intent.caster) else {
            continue;
        };

        if *state != LookState::Aiming {
            continue;
        }

        *state = LookState::Default;
        let spell = current.map(|current| current.spell);
        if spell.is_some() {
            commands.entity(intent.caster).remove::<CurrentSpell>();
        }

        let direction = facing_direction(transform);
        log_info(&format!("🔥 Projectile fired by {:?} towards {:?}", intent.caster, direction));
        fired.write(ProjectileFired {
            caster: intent.caster,
            spell,
            direction,
        });
    }
}
