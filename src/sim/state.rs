//! Game state and session setup
//!
//! Everything the frame step mutates lives in [`GameState`]. Nothing here
//! survives the session.

use std::collections::BTreeSet;

use glam::Vec2;

use super::entity::{Character, EntityKind, GameObject, Projectile};
use super::rect::Rect;
use super::registry::{EntityId, EntityRegistry, Group};
use crate::renderer::SpriteCache;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player alive, frames advance
    Playing,
    /// Player died; the session is over
    GameOver,
}

/// Something that happened during a tick (drained every tick)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Spawned { id: EntityId, kind: EntityKind },
    /// Projectile left the arena
    Expired { id: EntityId },
    Hit {
        projectile: EntityId,
        victim: EntityId,
        damage: f32,
        health: f32,
    },
    Died { id: EntityId },
    /// Enemy's target is gone; the enemy idles from now on
    TargetLost { enemy: EntityId, target: EntityId },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub arena: Rect,
    pub registry: EntityRegistry,
    pub sprites: SpriteCache,
    /// Player handle (may be dangling once the player dies)
    pub player: EntityId,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Enemies whose lost target has already been reported
    pub(crate) stranded: BTreeSet<EntityId>,
}

impl GameState {
    /// Standard session: player in the middle, one enemy at the middle of
    /// each arena edge, enemies chasing each other around a ring.
    pub fn new(settings: &Settings) -> Self {
        let mut state = Self::empty(settings.arena(), settings.supersample());
        let arena = state.arena;
        let player = state.spawn_player(arena.center());

        let anchors = [arena.midright(), arena.midbottom(), arena.midleft(), arena.midtop()];
        let ring: Vec<EntityId> = anchors
            .into_iter()
            .map(|pos| state.spawn_enemy(pos, player))
            .collect();
        for (i, &enemy) in ring.iter().enumerate() {
            let next = ring[(i + 1) % ring.len()];
            if let Some(c) = state.registry.character_mut(enemy) {
                c.retarget(next);
            }
        }

        log::info!(
            "Session ready: arena {}x{}, {} enemies",
            arena.w,
            arena.h,
            ring.len()
        );
        state
    }

    /// Arena with no entities, for custom scenarios
    pub fn empty(arena: Rect, supersample: u32) -> Self {
        Self {
            arena,
            registry: EntityRegistry::new(),
            sprites: SpriteCache::new(supersample),
            player: EntityId(0),
            time_ticks: 0,
            phase: GamePhase::Playing,
            events: Vec::new(),
            stranded: BTreeSet::new(),
        }
    }

    /// Spawn the player and make it the session's player
    pub fn spawn_player(&mut self, position: Vec2) -> EntityId {
        let player = Character::player(position, &mut self.sprites);
        let id = self.registry.insert(player);
        self.player = id;
        self.events.push(GameEvent::Spawned {
            id,
            kind: EntityKind::Player,
        });
        id
    }

    pub fn spawn_enemy(&mut self, position: Vec2, target: EntityId) -> EntityId {
        let enemy = Character::enemy(position, target, &mut self.sprites);
        let id = self.registry.insert(enemy);
        self.events.push(GameEvent::Spawned {
            id,
            kind: EntityKind::Enemy,
        });
        id
    }

    pub fn spawn_projectile(&mut self, projectile: Projectile) -> EntityId {
        let kind = projectile.kind();
        let id = self.registry.insert(projectile);
        self.events.push(GameEvent::Spawned { id, kind });
        id
    }

    pub fn player(&self) -> Option<&Character> {
        self.registry.character(self.player)
    }

    pub fn player_alive(&self) -> bool {
        self.player().is_some_and(|p| p.is_alive())
    }

    pub fn enemy_count(&self) -> usize {
        self.registry.len(Group::Enemies)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
