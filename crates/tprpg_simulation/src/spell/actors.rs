//! Spell effect actors
//!
//! Visual/gameplay поведение заклинания (полёт, урон) — забота host'а.
//! Симуляция только spawn'ит entity и держит ссылку на него у caster'а до Fire.

use bevy::prelude::*;

use super::book::SpellEffect;

/// Заспавненное заклинание
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpellEffectActor {
    pub effect: SpellEffect,
    pub caster: Entity,
}

/// Заготовленное заклинание caster'а (Aiming). Снимается на Fire
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CurrentSpell {
    pub spell: Entity,
    pub effect: SpellEffect,
}

pub fn spawn_spell_effect(commands: &mut Commands, effect: SpellEffect, caster: Entity, position: Vec3) -> Entity {
    commands
        .spawn((
            Name::new(effect.name()),
            SpellEffectActor { effect, caster },
            Transform::from_translation(position),
        ))
        .id()
}
