//! Spell crafting
//!
//! Волшебник входит в crafting (время мира замедляется), ведёт курсором по
//! девяти spell points на земле и набирает code. Полный code (5 точек)
//! сверяется с фиксированным словарём:
//!
//! ```text
//! 2 7 5 4 2 → Fireball
//! 2 7 4 5 2 → Frostbolt
//! 7 6 3 2 1 → Lightningbolt
//! ```

pub mod actors;
pub mod book;
pub mod code;
pub mod events;
pub mod grid;
pub mod point;
pub mod session;
pub mod systems;


use bevy::prelude::*;

pub use actors::{spawn_spell_effect, CurrentSpell, SpellEffectActor};
pub use book::SpellEffect;
pub use code::{SpellCode, SpellError, SpellPointId, MAX_SPELL_LENGTH};
pub use events::*;
pub use grid::{grid_point_offset, locate_grid_point, spawn_spell_grid, SpellGrid, SpellGridPoint};
pub use point::{GlowingSpellPoint, SpellPoint, SpellPointNode};
pub use session::{resolve_cast, CastResolution, CraftingSession, TouchOutcome};
pub use systems::*;

/// Relative speed мира во время crafting
pub const CRAFTING_TIME_SCALE: f32 = 0.65;

pub struct SpellcraftPlugin;

impl Plugin for SpellcraftPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StartCraftingIntent>()
            .add_event::<EndCraftingIntent>()
            .add_event::<DrawSpellIntent>()
            .add_event::<FireIntent>()
            .add_event::<CraftingStarted>()
            .add_event::<CraftingEnded>()
            .add_event::<SpellPointTouched>()
            .add_event::<SpellCast>()
            .add_event::<SpellFizzled>()
            .add_event::<ProjectileFired>()
            .add_systems(
                Update,
                (
                    abort_crafting_on_death,
                    drop_prepared_spell_on_death,
                    fire_prepared_spell,
                    start_crafting,
                    draw_spell,
                    end_crafting,
                )
                    .chain()
                    .in_set(crate::WizardSet::Abilities),
            );
    }
}
