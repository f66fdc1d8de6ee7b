//! Physics module
//!
//! Kinematic контроллер (своя интеграция velocity), collision groups и
//! cursor raycast через Rapier.

pub mod collision;
pub mod cursor;
pub mod movement;

// Re-export основных типов
pub use collision::{actor_groups, cursor_trace_groups, ground_groups, spell_point_groups};
pub use cursor::{raycast_cursor, CursorHit, CursorHitResult, CursorRay, CursorRaycastPlugin};
pub use movement::{spawn_kinematic_character, KinematicController, KinematicControllerPlugin};
