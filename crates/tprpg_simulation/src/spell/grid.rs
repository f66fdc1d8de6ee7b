//! Spell grid — девять spell points на земле вокруг crafting origin
//!
//! Раскладка как на numpad (вид сверху, forward = -Z):
//!
//! ```text
//!   7 8 9      z = -spacing
//!   4 5 6      z = 0
//!   1 2 3      z = +spacing
//! ```

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::code::SpellPointId;
use super::point::{GlowingSpellPoint, SpellPointNode};
use crate::config::WizardTuning;
use crate::physics::spell_point_groups;

/// Корень grid'а (despawn рекурсивно уносит точки)
#[derive(Component, Debug, Clone, Copy)]
pub struct SpellGrid {
    pub owner: Entity,
}

/// Метка точки grid'а (id дублирует SpellPointNode для поиска без dyn вызова)
#[derive(Component, Debug, Clone, Copy)]
pub struct SpellGridPoint {
    pub id: SpellPointId,
    pub grid: Entity,
}

/// Локальный offset точки `digit` (1..=9) относительно центра grid'а
pub fn grid_point_offset(digit: u8, spacing: f32) -> Vec3 {
    let index = digit.saturating_sub(1);
    let row = (index / 3) as f32;
    let col = (index % 3) as f32;
    Vec3::new((col - 1.0) * spacing, 0.0, (1.0 - row) * spacing)
}

/// Spawn grid в `origin` (9 child spell points, sensor colliders)
pub fn spawn_spell_grid(commands: &mut Commands, owner: Entity, origin: Vec3, tuning: &WizardTuning) -> Entity {
    let mut grid = commands.spawn((
        Name::new("SpellGrid"),
        SpellGrid { owner },
        Transform::from_translation(origin),
    ));
    let grid_entity = grid.id();

    grid.with_children(|parent| {
        for digit in 1..=9u8 {
            let Ok(id) = SpellPointId::new(digit) else {
                continue;
            };
            parent.spawn((
                Name::new(format!("SpellPoint{}", digit)),
                SpellGridPoint { id, grid: grid_entity },
                SpellPointNode::new(GlowingSpellPoint::new(id)),
                Transform::from_translation(grid_point_offset(digit, tuning.grid_spacing)),
                Collider::ball(tuning.spell_point_radius),
                Sensor,
                spell_point_groups(),
            ));
        }
    });

    grid_entity
}

/// Найти точку `id` в grid'е и её world position (grid origin + local offset)
///
/// Headless helper для scripted runs: host вместо этого делает cursor raycast.
pub fn locate_grid_point(world: &mut World, grid: Entity, id: SpellPointId) -> Option<(Entity, Vec3)> {
    let origin = world.get::<Transform>(grid)?.translation;

    let mut points = world.query::<(Entity, &SpellGridPoint, &Transform)>();
    points
        .iter(world)
        .find(|(_, point, _)| point.grid == grid && point.id == id)
        .map(|(entity, _, transform)| (entity, origin + transform.translation))
}
