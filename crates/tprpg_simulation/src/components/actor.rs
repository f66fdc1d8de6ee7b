//! Actor state компоненты

use bevy::prelude::*;

/// Marker: персонаж мёртв
///
/// Input router игнорирует мёртвых игроков, crafting session прерывается
/// (см. `spell::systems::abort_crafting_on_death`). Dash в полёте НЕ
/// отменяется — таймеры дотикают сами.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;
