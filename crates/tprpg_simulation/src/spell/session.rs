//! Crafting session — состояние одного сеанса черчения заклинания
//!
//! Session живёт как компонент на caster'е:
//! - insert на StartCraftingIntent (только из LookState::Default)
//! - remove на EndCraftingIntent или после cast resolution
//!
//! Логика здесь чистая (без ECS), системы в `systems.rs` только вызывают её.

use bevy::prelude::*;

use super::book::SpellEffect;
use super::code::{SpellCode, SpellPointId};

/// Активный crafting session
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CraftingSession {
    /// Накопленный code
    pub code: SpellCode,
    /// Последний затронутый point (подавляет повтор при hover)
    pub last_point: Option<SpellPointId>,
    /// Cursor location на момент старта — origin spawn'а заклинания
    pub origin: Vec3,
    /// Визуальный grid (None после despawn)
    pub grid: Option<Entity>,
}

/// Результат касания spell point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// Тот же point что и в прошлый раз — code не растёт
    Repeated,
    /// Point добавлен, code ещё неполный
    Appended { len: usize },
    /// Point добавлен и code достиг MAX_SPELL_LENGTH → cast resolution
    Completed,
    /// Code уже полный, касание отброшено
    Full,
}

/// Результат сверки code со словарём
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastResolution {
    Matched(SpellEffect),
    NoMatch(SpellCode),
}

impl CraftingSession {
    pub fn new(origin: Vec3) -> Self {
        Self {
            code: SpellCode::new(),
            last_point: None,
            origin,
            grid: None,
        }
    }

    pub fn with_grid(mut self, grid: Entity) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Касание spell point
    ///
    /// Append только если id отличается от ПРЕДЫДУЩЕГО касания.
    /// Повторное посещение того же point через другой — легально ("2-7-2").
    pub fn touch(&mut self, point: SpellPointId) -> TouchOutcome {
        if self.code.is_complete() {
            return TouchOutcome::Full;
        }

        let repeated = self.last_point == Some(point);
        self.last_point = Some(point);
        if repeated {
            return TouchOutcome::Repeated;
        }

        self.code.push(point);
        if self.code.is_complete() {
            TouchOutcome::Completed
        } else {
            TouchOutcome::Appended { len: self.code.len() }
        }
    }

    pub fn is_ready_to_cast(&self) -> bool {
        self.code.is_complete()
    }

    pub fn resolve(&self) -> CastResolution {
        resolve_cast(&self.code)
    }

    /// Позиция spawn'а заклинания (origin + per-spell offset)
    pub fn spawn_position(&self, effect: SpellEffect, spawn_height: f32) -> Vec3 {
        self.origin + effect.spawn_offset(spawn_height)
    }

    /// Забрать grid entity (второй вызов → None)
    pub fn take_grid(&mut self) -> Option<Entity> {
        self.grid.take()
    }
}

pub fn resolve_cast(code: &SpellCode) -> CastResolution {
    match SpellEffect::from_code(code) {
        Some(effect) => CastResolution::Matched(effect),
        None => CastResolution::NoMatch(code.clone()),
    }
}
