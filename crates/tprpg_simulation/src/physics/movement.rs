//! Kinematic контроллер волшебника
//!
//! Архитектура:
//! - Rapier только для коллизий и cursor raycast (RigidBody::KinematicPositionBased)
//! - Custom velocity integration (не используем Rapier forces)
//! - Gravity + ground check + movement input
//!
//! Все системы в FixedUpdate, после dash таймеров (halt раньше movement).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::collision;
use crate::components::{MovementIntent, PhysicsBody};
use crate::config::WizardTuning;
use crate::dash::DashAbility;

/// Уровень пола (headless: плоскость y = 0)
pub const GROUND_LEVEL: f32 = 0.0;

/// Kinematic контроллер компонент
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KinematicController {
    /// Скорость движения (m/s)
    pub move_speed: f32,
    /// Сила гравитации (m/s², отрицательная)
    pub gravity: f32,
    /// На земле ли персонаж
    pub grounded: bool,
}

impl Default for KinematicController {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            gravity: -9.81,
            grounded: false,
        }
    }
}

impl KinematicController {
    pub fn from_tuning(tuning: &WizardTuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            gravity: tuning.gravity,
            grounded: false,
        }
    }

    /// Горизонтальная velocity от input (analog input не больше 1.0)
    pub fn horizontal_velocity(&self, input: Vec2) -> Vec3 {
        MovementIntent::world_direction(input.clamp_length_max(1.0)) * self.move_speed
    }
}

/// Ground detection: grounded если стоим на полу или ниже
pub fn ground_detection(mut query: Query<(&Transform, &mut KinematicController)>) {
    for (transform, mut controller) in query.iter_mut() {
        controller.grounded = transform.translation.y <= GROUND_LEVEL;
    }
}

/// MovementIntent → horizontal velocity
///
/// Пока launch dash активен, velocity не трогаем.
pub fn apply_movement_input(
    mut query: Query<(&KinematicController, &MovementIntent, &mut PhysicsBody, Option<&DashAbility>)>,
) {
    for (controller, intent, mut body, dash) in query.iter_mut() {
        if dash.is_some_and(DashAbility::is_launch_active) {
            continue;
        }

        let horizontal = controller.horizontal_velocity(intent.direction);
        // Y velocity остается (gravity handling)
        body.velocity.x = horizontal.x;
        body.velocity.z = horizontal.z;
    }
}

pub fn apply_gravity(mut query: Query<(&KinematicController, &mut PhysicsBody)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (controller, mut body) in query.iter_mut() {
        if !controller.grounded {
            body.velocity.y += controller.gravity * delta;
        }
    }
}

/// velocity → Transform, с clamp на полу
pub fn integrate_velocity_to_transform(
    mut query: Query<(&mut PhysicsBody, &mut Transform), With<KinematicController>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut body, mut transform) in query.iter_mut() {
        transform.translation += body.velocity * delta;

        if transform.translation.y < GROUND_LEVEL {
            transform.translation.y = GROUND_LEVEL;
            body.velocity.y = body.velocity.y.max(0.0);
        }
    }
}

pub struct KinematicControllerPlugin;

impl Plugin for KinematicControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                ground_detection,
                apply_movement_input,
                apply_gravity,
                integrate_velocity_to_transform,
            )
                .chain()
                .in_set(crate::FixedWizardSet::Movement),
        );
    }
}

/// Spawn helper: kinematic персонаж с capsule collider
///
/// - Transform
/// - PhysicsBody + KinematicController + MovementIntent
/// - Rapier: RigidBody + Collider (capsule) + actor collision groups
pub fn spawn_kinematic_character(commands: &mut Commands, position: Vec3, tuning: &WizardTuning) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            PhysicsBody::default(),
            KinematicController::from_tuning(tuning),
            MovementIntent::default(),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.4),
            collision::actor_groups(),
        ))
        .id()
}
