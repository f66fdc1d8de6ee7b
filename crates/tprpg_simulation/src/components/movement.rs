//! Movement компоненты: input intent и velocity

use bevy::prelude::*;

/// Текущий movement input персонажа
///
/// # Coordinate System
/// - `x`: -1.0 (left) → +1.0 (right), world +X
/// - `y`: -1.0 (backward) → +1.0 (forward), world -Z
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Input этого frame (Vec2::ZERO когда клавиши отпущены)
    pub direction: Vec2,
    /// Последний НЕнулевой input — источник направления dash
    pub last_direction: Vec2,
}

impl MovementIntent {
    pub fn set_direction(&mut self, direction: Vec2) {
        // NaN от host'а считаем отсутствием input
        let direction = if direction.is_nan() { Vec2::ZERO } else { direction };

        self.direction = direction;
        if direction.length_squared() > 0.0 {
            self.last_direction = direction;
        }
    }

    /// Input направление в world space (XZ plane, Y = 0)
    pub fn world_direction(input: Vec2) -> Vec3 {
        Vec3::new(input.x, 0.0, -input.y)
    }
}

/// Velocity тела (интегрируем сами, без Rapier forces)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    pub mass: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 70.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_direction_survives_release() {
        let mut intent = MovementIntent::default();

        intent.set_direction(Vec2::new(1.0, 0.0));
        intent.set_direction(Vec2::ZERO); // Клавиша отпущена

        assert_eq!(intent.direction, Vec2::ZERO);
        assert_eq!(intent.last_direction, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_nan_input_ignored() {
        let mut intent = MovementIntent::default();
        intent.set_direction(Vec2::new(0.0, 1.0));
        intent.set_direction(Vec2::NAN);

        assert_eq!(intent.direction, Vec2::ZERO);
        assert_eq!(intent.last_direction, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_world_direction_forward_is_negative_z() {
        assert_eq!(MovementIntent::world_direction(Vec2::new(0.0, 1.0)), Vec3::NEG_Z);
        assert_eq!(MovementIntent::world_direction(Vec2::new(1.0, 0.0)), Vec3::X);
    }
}
