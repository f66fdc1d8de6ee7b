//! Wizard spawn
//!
//! Host spawn'ит волшебника через `spawn_wizard` (game mode pawn selection
//! остаётся на стороне host'а).

use bevy::prelude::*;

use crate::components::{Player, WizardActions};
use crate::config::WizardTuning;
use crate::dash::DashAbility;
use crate::look::LookState;
use crate::physics::spawn_kinematic_character;

/// Spawn player-controlled волшебника
///
/// Kinematic character + Player + WizardActions + DashAbility + LookState.
pub fn spawn_wizard(commands: &mut Commands, position: Vec3, tuning: &WizardTuning) -> Entity {
    let entity = spawn_kinematic_character(commands, position, tuning);
    commands.entity(entity).insert((
        Name::new("Wizard"),
        Player,
        WizardActions,
        DashAbility::default(),
        LookState::default(),
    ));
    entity
}

/// Debug: волшебник без wizard action bindings (только ходьба)
pub fn spawn_unbound_wizard(commands: &mut Commands, position: Vec3, tuning: &WizardTuning) -> Entity {
    let entity = spawn_wizard(commands, position, tuning);
    commands.entity(entity).remove::<WizardActions>();
    entity
}
