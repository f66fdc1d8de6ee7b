//! Player input routing (ECS)
//!
//! Читает `PlayerInputEvent`, пишет `MovementIntent` НАПРЯМУЮ и intent events
//! для dash / crafting / fire.

use bevy::prelude::*;

use super::events::PlayerInputEvent;
use crate::components::{Dead, MovementIntent, Player, WizardActions};
use crate::dash::DashIntent;
use crate::logger::log_error;
use crate::spell::{DrawSpellIntent, EndCraftingIntent, FireIntent, StartCraftingIntent};

/// Input router: PlayerInputEvent → intents
///
/// # Архитектура
/// - Query: With<Player>, Without<Dead> (мёртвые не управляются)
/// - Movement применяется всегда
/// - Wizard actions только при наличии `WizardActions`
///
/// # Порядок intents внутри snapshot
/// dash → fire → start → draw → end (системы-потребители chained в том же порядке)
pub fn route_player_input(
    mut input_events: EventReader<PlayerInputEvent>,
    mut player_query: Query<(Entity, &mut MovementIntent, Has<WizardActions>), (With<Player>, Without<Dead>)>,
    mut dash_events: EventWriter<DashIntent>,
    mut fire_events: EventWriter<FireIntent>,
    mut start_events: EventWriter<StartCraftingIntent>,
    mut draw_events: EventWriter<DrawSpellIntent>,
    mut end_events: EventWriter<EndCraftingIntent>,
    mut unbound_reported: Local<bool>,
) {
    // Guard: нет живого player entity
    let Ok((player, mut movement, wizard_bound)) = player_query.single_mut() else {
        input_events.clear();
        return;
    };

    for input in input_events.read() {
        movement.set_direction(input.move_direction);

        if !input.has_wizard_action() {
            continue;
        }

        if !wizard_bound {
            if !*unbound_reported {
                log_error(&format!(
                    "Player {:?}: wizard actions not bound (no WizardActions), actions dropped",
                    player
                ));
                *unbound_reported = true;
            }
            continue;
        }

        if input.dash {
            dash_events.write(DashIntent { entity: player });
        }
        if input.fire {
            fire_events.write(FireIntent { caster: player });
        }
        if input.craft_pressed {
            start_events.write(StartCraftingIntent { caster: player });
        }
        if input.draw {
            draw_events.write(DrawSpellIntent { caster: player });
        }
        if input.craft_released {
            end_events.write(EndCraftingIntent { caster: player });
        }
    }
}
