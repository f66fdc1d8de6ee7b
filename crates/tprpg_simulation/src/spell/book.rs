//! Spell book — фиксированный словарь spell code → SpellEffect

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::code::SpellCode;

/// Заклинания, доступные волшебнику
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum SpellEffect {
    Fireball,
    Frostbolt,
    Lightningbolt,
}

impl SpellEffect {
    pub const ALL: [SpellEffect; 3] = [
        SpellEffect::Fireball,
        SpellEffect::Frostbolt,
        SpellEffect::Lightningbolt,
    ];

    /// Exact match накопленного code. Неполный или чужой code → None
    pub fn from_code(code: &SpellCode) -> Option<Self> {
        match code.digits() {
            [2, 7, 5, 4, 2] => Some(SpellEffect::Fireball),
            [2, 7, 4, 5, 2] => Some(SpellEffect::Frostbolt),
            [7, 6, 3, 2, 1] => Some(SpellEffect::Lightningbolt),
            _ => None,
        }
    }

    /// Digit sequence, которую нужно начертить
    pub fn pattern(self) -> [u8; 5] {
        match self {
            SpellEffect::Fireball => [2, 7, 5, 4, 2],
            SpellEffect::Frostbolt => [2, 7, 4, 5, 2],
            SpellEffect::Lightningbolt => [7, 6, 3, 2, 1],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpellEffect::Fireball => "Fire Ball",
            SpellEffect::Frostbolt => "Frost Bolt",
            SpellEffect::Lightningbolt => "Lightning Bolt",
        }
    }

    /// Вертикальный offset spawn'а над crafting origin
    ///
    /// Lightning bolt бьёт с земли, снаряды висят на `spawn_height`.
    pub fn spawn_offset(self, spawn_height: f32) -> Vec3 {
        match self {
            SpellEffect::Fireball | SpellEffect::Frostbolt => Vec3::Y * spawn_height,
            SpellEffect::Lightningbolt => Vec3::ZERO,
        }
    }
}
