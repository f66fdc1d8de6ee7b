//! Spell point capability
//!
//! Любой entity в мире может стать spell point, если на нём висит
//! `SpellPointNode`. Crafting session вызывает `enable_point()` когда
//! cursor raycast попадает в entity, и использует только возвращённый id.

use bevy::prelude::*;

use super::code::SpellPointId;

/// Capability: entity отвечает на касание курсора своим identifier
///
/// Реализация может реагировать как угодно (подсветка, звук и т.п.).
pub trait SpellPoint: Send + Sync {
    fn enable_point(&mut self) -> SpellPointId;
}

/// Component-обёртка над `dyn SpellPoint`
#[derive(Component)]
pub struct SpellPointNode(pub Box<dyn SpellPoint>);

impl SpellPointNode {
    pub fn new(point: impl SpellPoint + 'static) -> Self {
        Self(Box::new(point))
    }

    pub fn enable_point(&mut self) -> SpellPointId {
        self.0.enable_point()
    }
}

impl std::fmt::Debug for SpellPointNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpellPointNode").finish_non_exhaustive()
    }
}

/// Стандартный spell point grid'а: загорается при касании
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlowingSpellPoint {
    pub id: SpellPointId,
    pub lit: bool,
    pub times_enabled: u32,
}

impl GlowingSpellPoint {
    pub fn new(id: SpellPointId) -> Self {
        Self {
            id,
            lit: false,
            times_enabled: 0,
        }
    }
}

impl SpellPoint for GlowingSpellPoint {
    fn enable_point(&mut self) -> SpellPointId {
        self.lit = true;
        self.times_enabled += 1;
        self.id
    }
}
