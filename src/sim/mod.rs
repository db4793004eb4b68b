//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Stable iteration order (by entity ID)
//! - No rendering, input or timing dependencies

pub mod collision;
pub mod entity;
pub mod rect;
pub mod registry;
pub mod state;
pub mod tick;

pub use collision::{Circle, Hit, Resolution, find_hits, resolve_collisions};
pub use entity::{
    Body, Character, Entity, EntityKind, Faction, GameObject, Projectile, ProjectileSpec, Role,
};
pub use rect::Rect;
pub use registry::{EntityId, EntityRegistry, Group, StaleTargetError};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{DirectionKeys, TickInput, tick};
