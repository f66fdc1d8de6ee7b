//! Player control marker components
//!
//! Отмечают entity которым управляет игрок через input.

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Input router ищет ровно один entity с этим компонентом.
/// В single-player режиме обычно только один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Wizard action bindings (dash, fire, crafting, draw) подключены
///
/// Без этого компонента игрок только ходит: wizard actions отбрасываются
/// с error в логе (один раз).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct WizardActions;
