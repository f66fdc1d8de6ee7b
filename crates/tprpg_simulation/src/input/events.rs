//! Player input events
//!
//! Генерируются host'ом (один snapshot на frame) и обрабатываются
//! `route_player_input`.

use bevy::prelude::{Event, Vec2};

/// Player input snapshot за frame
///
/// # Fields
/// - `move_direction`: WASD (x = right, y = forward), Vec2::ZERO если нет движения
/// - `dash`: Shift (triggered)
/// - `fire`: LMB (triggered) — выпустить заготовленное заклинание
/// - `craft_pressed`: RMB started — начать crafting
/// - `craft_released`: RMB completed — закончить crafting
/// - `draw`: RMB held — вести курсором по spell points
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlayerInputEvent {
    pub move_direction: Vec2,
    pub dash: bool,
    pub fire: bool,
    pub craft_pressed: bool,
    pub craft_released: bool,
    pub draw: bool,
}

impl PlayerInputEvent {
    pub fn moving(direction: Vec2) -> Self {
        Self {
            move_direction: direction,
            ..Default::default()
        }
    }

    pub fn dash() -> Self {
        Self {
            dash: true,
            ..Default::default()
        }
    }

    pub fn fire() -> Self {
        Self {
            fire: true,
            ..Default::default()
        }
    }

    pub fn start_crafting() -> Self {
        Self {
            craft_pressed: true,
            ..Default::default()
        }
    }

    pub fn end_crafting() -> Self {
        Self {
            craft_released: true,
            ..Default::default()
        }
    }

    pub fn draw() -> Self {
        Self {
            draw: true,
            ..Default::default()
        }
    }

    pub(crate) fn has_wizard_action(&self) -> bool {
        self.dash || self.fire || self.craft_pressed || self.craft_released || self.draw
    }
}
