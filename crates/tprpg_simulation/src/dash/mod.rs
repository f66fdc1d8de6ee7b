//! Dash ability
//!
//! Один явный state вместо двух timer callbacks:
//! - `remaining` — сколько ещё держится launch velocity (потом halt)
//! - `cooldown_remaining` — когда ability снова доступна
//!
//! Оба счётчика уменьшаются в FixedUpdate (`tick_dash`).

use bevy::prelude::*;

use crate::components::{Dead, MovementIntent, PhysicsBody};
use crate::config::WizardTuning;
use crate::logger::log;

/// Остаток таймера, который считаем нулём (f32 накопление 1/60 s не даёт ровный 0)
pub const DASH_TIMER_EPSILON: f32 = 1e-5;

/// Intent: dash (Shift)
#[derive(Event, Debug, Clone, Copy)]
pub struct DashIntent {
    pub entity: Entity,
}

/// Dash начался (velocity уже выставлена)
#[derive(Event, Debug, Clone, Copy)]
pub struct DashStarted {
    pub entity: Entity,
    pub velocity: Vec3,
}

/// Launch закончился: velocity погашена
#[derive(Event, Debug, Clone, Copy)]
pub struct DashHalted {
    pub entity: Entity,
}

/// Cooldown прошёл, dash снова доступен
#[derive(Event, Debug, Clone, Copy)]
pub struct DashReady {
    pub entity: Entity,
}

/// Dash state персонажа
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum DashAbility {
    #[default]
    Ready,
    Dashing {
        /// Секунды до halt (0 = launch закончен)
        remaining: f32,
        /// Секунды до re-arm
        cooldown_remaining: f32,
    },
}

/// Что произошло за tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashTick {
    pub halted: bool,
    pub ready: bool,
}

impl DashAbility {
    pub fn can_dash(&self) -> bool {
        matches!(self, DashAbility::Ready)
    }

    /// Launch velocity ещё активна (movement input не перетирает её)
    pub fn is_launch_active(&self) -> bool {
        matches!(self, DashAbility::Dashing { remaining, .. } if *remaining > DASH_TIMER_EPSILON)
    }

    /// Начать dash. `false` если ещё на cooldown (latch)
    pub fn try_start(&mut self, duration: f32, cooldown: f32) -> bool {
        if !self.can_dash() {
            return false;
        }
        *self = DashAbility::Dashing {
            remaining: duration,
            cooldown_remaining: cooldown,
        };
        true
    }

    /// Продвинуть оба счётчика
    ///
    /// Re-arm ждёт и cooldown, и halt: если cooldown короче duration,
    /// ability вернётся в Ready в тот же tick, что и halt.
    pub fn tick(&mut self, delta: f32) -> DashTick {
        let DashAbility::Dashing {
            remaining,
            cooldown_remaining,
        } = self
        else {
            return DashTick::default();
        };

        let was_active = *remaining > DASH_TIMER_EPSILON;
        *remaining = expire(*remaining - delta);
        *cooldown_remaining = expire(*cooldown_remaining - delta);

        let halted = was_active && *remaining <= 0.0;
        let ready = *remaining <= 0.0 && *cooldown_remaining <= 0.0;
        if ready {
            *self = DashAbility::Ready;
        }

        DashTick { halted, ready }
    }
}

fn expire(value: f32) -> f32 {
    if value <= DASH_TIMER_EPSILON {
        0.0
    } else {
        value
    }
}

/// Launch velocity: последний movement input × dash_speed, Y обнулён
///
/// Input не нормализуем — dash масштабируется силой последнего input.
pub fn dash_velocity(last_direction: Vec2, dash_speed: f32) -> Vec3 {
    MovementIntent::world_direction(last_direction) * dash_speed
}

/// System: DashIntent → launch
///
/// Мёртвые не dash'ат. В воздухе dash разрешён (как и на земле).
pub fn start_dash(
    mut intents: EventReader<DashIntent>,
    mut dashers: Query<(&mut DashAbility, &MovementIntent, &mut PhysicsBody), Without<Dead>>,
    tuning: Res<WizardTuning>,
    mut started: EventWriter<DashStarted>,
) {
    for intent in intents.read() {
        let Ok((mut ability, movement, mut body)) = dashers.get_mut(intent.entity) else {
            continue;
        };

        if !ability.try_start(tuning.dash_duration, tuning.dash_cooldown) {
            continue;
        }

        let velocity = dash_velocity(movement.last_direction, tuning.dash_speed);
        body.velocity = velocity;

        log(&format!("💨 Dash {:?} velocity {:?}", intent.entity, velocity));
        started.write(DashStarted {
            entity: intent.entity,
            velocity,
        });
    }
}

/// System: advance dash state (FixedUpdate)
pub fn tick_dash(
    mut query: Query<(Entity, &mut DashAbility, &mut PhysicsBody)>,
    time: Res<Time<Fixed>>,
    mut halted_events: EventWriter<DashHalted>,
    mut ready_events: EventWriter<DashReady>,
) {
    let delta = time.delta_secs();

    for (entity, mut ability, mut body) in query.iter_mut() {
        if ability.can_dash() {
            continue;
        }

        let tick = ability.tick(delta);
        if tick.halted {
            body.velocity = Vec3::ZERO;
            halted_events.write(DashHalted { entity });
        }
        if tick.ready {
            ready_events.write(DashReady { entity });
        }
    }
}

pub struct DashPlugin;

impl Plugin for DashPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DashIntent>()
            .add_event::<DashStarted>()
            .add_event::<DashHalted>()
            .add_event::<DashReady>()
            .add_systems(Update, start_dash.in_set(crate::WizardSet::Abilities))
            .add_systems(FixedUpdate, tick_dash.in_set(crate::FixedWizardSet::Timers));
    }
}
