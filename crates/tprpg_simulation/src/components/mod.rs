//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовое состояние персонажа (Dead marker)
//! - movement: input intent + velocity (MovementIntent, PhysicsBody)
//! - player: player control markers (Player, WizardActions)

pub mod actor;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use player::*;
