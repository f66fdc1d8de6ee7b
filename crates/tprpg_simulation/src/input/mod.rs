//! Player input module
//!
//! Преобразует host input в ECS intents.
//!
//! # Архитектура
//!
//! ```text
//! Host input (keyboard/mouse)
//!     ↓
//! PlayerInputEvent (ECS event) - events.rs
//!     ↓
//! route_player_input (ECS) - systems.rs
//!     ↓
//! MovementIntent / DashIntent / crafting intents / FireIntent
//! ```

pub mod events;
pub mod systems;

pub use events::*;
pub use systems::*;

use bevy::prelude::*;

/// Plugin: PlayerInputEvent + router
pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInputEvent>()
            .add_systems(Update, route_player_input.in_set(crate::WizardSet::Input));
    }
}
