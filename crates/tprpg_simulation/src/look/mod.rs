//! Look-direction resolver
//!
//! Каждый frame поворачивает персонажа (yaw вокруг +Y) к:
//! - живой точке под курсором (Default, Aiming)
//! - замороженному crafting origin (Crafting)
//!
//! Во время crafting курсор уходит на spell points, поэтому facing берём из
//! origin — персонаж не дёргается.

use bevy::prelude::*;

use crate::components::Player;
use crate::physics::CursorHit;
use crate::spell::CraftingSession;

/// Откуда персонаж берёт направление взгляда
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum LookState {
    #[default]
    Default,
    Crafting,
    Aiming,
}

/// Yaw (Bevy forward = -Z) на точку `to`. None если точки совпадают по XZ
pub fn yaw_towards(from: Vec3, to: Vec3) -> Option<f32> {
    let delta = to - from;
    if delta.x.abs() < 1e-4 && delta.z.abs() < 1e-4 {
        return None;
    }
    Some((-delta.x).atan2(-delta.z))
}

/// Чистый resolver: state + cursor/origin → yaw
///
/// Нет цели (курсор мимо, session пропала, цель под ногами) → `previous_yaw`.
pub fn resolve_facing_yaw(
    state: LookState,
    actor_position: Vec3,
    live_cursor: Option<Vec3>,
    frozen_origin: Option<Vec3>,
    previous_yaw: f32,
) -> f32 {
    let target = match state {
        LookState::Default | LookState::Aiming => live_cursor,
        LookState::Crafting => frozen_origin,
    };

    target
        .and_then(|target| yaw_towards(actor_position, target))
        .unwrap_or(previous_yaw)
}

/// System: повернуть игрока к курсору / crafting origin
///
/// Меняется только yaw, pitch и roll сохраняются.
pub fn look_at_cursor(
    cursor: Res<CursorHit>,
    mut query: Query<(&mut Transform, &LookState, Option<&CraftingSession>), With<Player>>,
) {
    for (mut transform, state, session) in query.iter_mut() {
        let (previous_yaw, pitch, roll) = transform.rotation.to_euler(EulerRot::YXZ);

        let yaw = resolve_facing_yaw(
            *state,
            transform.translation,
            cursor.location(),
            session.map(|s| s.origin),
            previous_yaw,
        );

        if yaw != previous_yaw {
            transform.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll);
        }
    }
}

/// Горизонтальное направление взгляда (forward, Y = 0)
pub fn facing_direction(transform: &Transform) -> Vec3 {
    let forward = transform.rotation * Vec3::NEG_Z;
    Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero()
}

pub struct LookPlugin;

impl Plugin for LookPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, look_at_cursor.in_set(crate::WizardSet::Look));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_yaw_towards_axes() {
        // Forward (-Z) → yaw 0
        assert!(approx(yaw_towards(Vec3::ZERO, Vec3::NEG_Z).unwrap(), 0.0));
        // Влево (-X) → +90°
        assert!(approx(yaw_towards(Vec3::ZERO, Vec3::NEG_X).unwrap(), FRAC_PI_2));
        // Назад (+Z) → ±180°
        assert!(approx(yaw_towards(Vec3::ZERO, Vec3::Z).unwrap().abs(), PI));
    }

    #[test]
    fn test_yaw_rotation_faces_target() {
        let target = Vec3::new(3.0, 0.0, 4.0);
        let yaw = yaw_towards(Vec3::ZERO, target).unwrap();
        let forward = Quat::from_rotation_y(yaw) * Vec3::NEG_Z;

        assert!(forward.distance(target.normalize()) < 1e-4, "forward = {:?}", forward);
    }

    #[test]
    fn test_default_and_aiming_follow_live_cursor() {
        let live = Some(Vec3::NEG_X * 5.0);
        let frozen = Some(Vec3::X * 5.0);

        for state in [LookState::Default, LookState::Aiming] {
            let yaw = resolve_facing_yaw(state, Vec3::ZERO, live, frozen, 0.0);
            assert!(approx(yaw, FRAC_PI_2), "state {:?} yaw {}", state, yaw);
        }
    }

    #[test]
    fn test_crafting_uses_frozen_origin() {
        let live = Some(Vec3::NEG_X * 5.0);
        let frozen = Some(Vec3::X * 5.0);

        let yaw = resolve_facing_yaw(LookState::Crafting, Vec3::ZERO, live, frozen, 0.0);
        assert!(approx(yaw, -FRAC_PI_2));
    }

    #[test]
    fn test_missing_hit_keeps_previous_yaw() {
        let yaw = resolve_facing_yaw(LookState::Default, Vec3::ZERO, None, None, 1.25);
        assert_eq!(yaw, 1.25);

        // Цель прямо под персонажем — тоже без snap
        let yaw = resolve_facing_yaw(LookState::Default, Vec3::ONE, Some(Vec3::new(1.0, -3.0, 1.0)), None, 0.5);
        assert_eq!(yaw, 0.5);
    }

    #[test]
    fn test_facing_direction_is_horizontal() {
        let transform = Transform::from_rotation(Quat::from_rotation_y(FRAC_PI_2));
        let direction = facing_direction(&transform);
        assert!(direction.distance(Vec3::NEG_X) < 1e-4);
    }
}
