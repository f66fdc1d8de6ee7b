//! Cursor → world hit
//!
//! `CursorHit` — то, что лежит под курсором в этом frame. Пишет либо host
//! напрямую, либо `raycast_cursor` (CursorRaycastPlugin) из `CursorRay`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::collision::cursor_trace_groups;
use crate::config::WizardTuning;

/// Точка попадания cursor ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorHitResult {
    /// World location попадания
    pub location: Vec3,
    /// Entity, в который попал луч (None — "голый" пол без entity)
    pub entity: Option<Entity>,
}

/// Результат cursor raycast текущего frame (None — курсор ни во что не попал)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorHit(pub Option<CursorHitResult>);

impl CursorHit {
    pub fn ground(location: Vec3) -> Self {
        Self(Some(CursorHitResult {
            location,
            entity: None,
        }))
    }

    pub fn on_entity(entity: Entity, location: Vec3) -> Self {
        Self(Some(CursorHitResult {
            location,
            entity: Some(entity),
        }))
    }

    pub fn location(&self) -> Option<Vec3> {
        self.0.map(|hit| hit.location)
    }

    pub fn entity(&self) -> Option<Entity> {
        self.0.and_then(|hit| hit.entity)
    }
}

/// Луч из камеры через курсор (пишет host: camera.viewport_to_world)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CursorRay(pub Option<Ray3d>);

/// System: CursorRay → CursorHit через Rapier query pipeline
///
/// Фильтр — `cursor_trace_groups()` (Ground + Spell points).
pub fn raycast_cursor(
    rapier_context: ReadRapierContext,
    cursor_ray: Res<CursorRay>,
    tuning: Res<WizardTuning>,
    mut cursor_hit: ResMut<CursorHit>,
) {
    let Some(ray) = cursor_ray.0 else {
        cursor_hit.0 = None;
        return;
    };

    let Ok(context) = rapier_context.single() else {
        return;
    };

    let filter = QueryFilter::new().groups(cursor_trace_groups());
    cursor_hit.0 = context
        .cast_ray_and_get_normal(ray.origin, *ray.direction, tuning.cursor_max_distance, true, filter)
        .map(|(entity, intersection)| CursorHitResult {
            location: intersection.point,
            entity: Some(entity),
        });
}

/// Plugin: cursor raycast через Rapier
///
/// Требует RapierPhysicsPlugin (добавляет host). Большинство headless
/// тестов пишут `CursorHit` напрямую, см. tests/cursor_raycast_integration.rs.
pub struct CursorRaycastPlugin;

impl Plugin for CursorRaycastPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorRay>()
            .init_resource::<CursorHit>()
            // До Update: intents читают уже свежий hit
            .add_systems(PreUpdate, raycast_cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_hit_accessors() {
        let entity = Entity::from_raw(7);

        let hit = CursorHit::on_entity(entity, Vec3::X);
        assert_eq!(hit.entity(), Some(entity));
        assert_eq!(hit.location(), Some(Vec3::X));

        let ground = CursorHit::ground(Vec3::Z);
        assert_eq!(ground.entity(), None);
        assert_eq!(ground.location(), Some(Vec3::Z));

        assert_eq!(CursorHit::default().location(), None);
    }
}
