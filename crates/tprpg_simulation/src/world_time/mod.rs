//! World time dilation
//!
//! Gameplay НЕ трогает `Time<Virtual>` напрямую: state machine пишет
//! `TimeDilationRequest`, а `apply_time_dilation` применяет последний запрос
//! frame'а. FixedUpdate считается от virtual clock, поэтому замедление
//! касается и dash таймеров.

use bevy::prelude::*;

use crate::logger::log;

/// Нормальный ход времени
pub const NORMAL_TIME_SCALE: f32 = 1.0;

/// Request: выставить relative speed мира
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TimeDilationRequest {
    pub scale: f32,
}

impl TimeDilationRequest {
    pub fn normal() -> Self {
        Self {
            scale: NORMAL_TIME_SCALE,
        }
    }

    pub fn crafting() -> Self {
        Self {
            scale: crate::spell::CRAFTING_TIME_SCALE,
        }
    }
}

/// System: последний request frame'а → Time<Virtual>
pub fn apply_time_dilation(
    mut requests: EventReader<TimeDilationRequest>,
    mut virtual_time: ResMut<Time<Virtual>>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };

    if (virtual_time.relative_speed() - request.scale).abs() > f32::EPSILON {
        log(&format!("⏳ World time scale → {:.2}", request.scale));
    }
    virtual_time.set_relative_speed(request.scale);
}

pub struct WorldTimePlugin;

impl Plugin for WorldTimePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TimeDilationRequest>()
            .add_systems(Update, apply_time_dilation.in_set(crate::WizardSet::Effects));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_request_of_frame_wins() {
        let mut app = App::new();
        app.init_resource::<Time<Virtual>>()
            .add_event::<TimeDilationRequest>()
            .add_systems(Update, apply_time_dilation);

        app.world_mut().send_event(TimeDilationRequest::crafting());
        app.update();
        assert_eq!(app.world().resource::<Time<Virtual>>().relative_speed(), 0.65);

        // crafting → end в одном frame: итог — нормальное время
        app.world_mut().send_event(TimeDilationRequest::crafting());
        app.world_mut().send_event(TimeDilationRequest::normal());
        app.update();
        assert_eq!(app.world().resource::<Time<Virtual>>().relative_speed(), NORMAL_TIME_SCALE);
    }
}
