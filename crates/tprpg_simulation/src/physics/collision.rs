//! Collision groups (Rapier)
//!
//! ## Groups:
//! - GROUP_1: Ground (пол, по которому ходит курсор)
//! - GROUP_2: Spell points (sensor сферы grid'а)
//! - GROUP_3: Actors (персонажи)
//! - GROUP_4: Cursor trace (membership луча из камеры)
//!
//! Cursor ray видит только Ground + Spell points, actors прозрачны для курсора.

use bevy_rapier3d::prelude::{CollisionGroups, Group};

pub const GROUND: Group = Group::GROUP_1;
pub const SPELL_POINTS: Group = Group::GROUP_2;
pub const ACTORS: Group = Group::GROUP_3;
pub const CURSOR_TRACE: Group = Group::GROUP_4;

/// Пол: коллайдит с actors, виден курсору
pub fn ground_groups() -> CollisionGroups {
    CollisionGroups::new(GROUND, ACTORS | CURSOR_TRACE)
}

/// Spell point: виден только курсору
pub fn spell_point_groups() -> CollisionGroups {
    CollisionGroups::new(SPELL_POINTS, CURSOR_TRACE)
}

/// Actors коллайдят друг с другом и с полом
pub fn actor_groups() -> CollisionGroups {
    CollisionGroups::new(ACTORS, ACTORS | GROUND)
}

/// Фильтр cursor raycast
pub fn cursor_trace_groups() -> CollisionGroups {
    CollisionGroups::new(CURSOR_TRACE, GROUND | SPELL_POINTS)
}
