//! Spell crafting events
//!
//! Intents (вход): пишет `route_player_input`.
//! Domain events (выход): читает host (визуалы, звук, UI).

use bevy::prelude::*;

use super::book::SpellEffect;
use super::code::{SpellCode, SpellPointId};

/// Intent: начать crafting (RMB started)
#[derive(Event, Debug, Clone, Copy)]
pub struct StartCraftingIntent {
    pub caster: Entity,
}

/// Intent: закончить crafting (RMB completed)
#[derive(Event, Debug, Clone, Copy)]
pub struct EndCraftingIntent {
    pub caster: Entity,
}

/// Intent: вести курсором по spell points (RMB held, каждый frame)
#[derive(Event, Debug, Clone, Copy)]
pub struct DrawSpellIntent {
    pub caster: Entity,
}

/// Intent: выпустить заготовленное заклинание (LMB)
#[derive(Event, Debug, Clone, Copy)]
pub struct FireIntent {
    pub caster: Entity,
}

/// Crafting начат: grid заспавнен, время замедлено
#[derive(Event, Debug, Clone, Copy)]
pub struct CraftingStarted {
    pub caster: Entity,
    pub origin: Vec3,
    pub grid: Entity,
}

/// Crafting закончен (явно или после cast resolution)
#[derive(Event, Debug, Clone)]
pub struct CraftingEnded {
    pub caster: Entity,
    /// Code на момент окончания (пустой если session не было)
    pub code: SpellCode,
}

/// Cursor коснулся spell point во время crafting
#[derive(Event, Debug, Clone, Copy)]
pub struct SpellPointTouched {
    pub caster: Entity,
    pub point: Entity,
    pub id: SpellPointId,
    /// false — повторное касание того же point (code не вырос)
    pub appended: bool,
}

/// Заклинание сработало: effect actor заспавнен
#[derive(Event, Debug, Clone, Copy)]
pub struct SpellCast {
    pub caster: Entity,
    pub effect: SpellEffect,
    pub spell: Entity,
    pub position: Vec3,
}

/// Code полный, но в словаре нет — попытка отброшена
#[derive(Event, Debug, Clone)]
pub struct SpellFizzled {
    pub caster: Entity,
    pub code: SpellCode,
}

/// Заготовленное заклинание выпущено (Aiming → Default)
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileFired {
    pub caster: Entity,
    /// Effect actor из CurrentSpell (None если его уже нет)
    pub spell: Option<Entity>,
    /// Горизонтальное направление взгляда caster'а
    pub direction: Vec3,
}
