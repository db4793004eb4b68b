//! Fixed-step frame update
//!
//! One call to [`tick`] advances the simulation by exactly one frame:
//! update every live entity once, sweep the dead, resolve collisions,
//! then admit the projectiles fired this frame.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::entity::{Entity, GameObject, Projectile, Role};
use super::registry::{EntityId, Group};
use super::state::{GameEvent, GamePhase, GameState};

/// Four directional keys as held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionKeys {
    /// Collapse to an axis vector with components in {-1, 0, 1} (y down)
    pub fn axis(self) -> IVec2 {
        IVec2::new(
            self.right as i32 - self.left as i32,
            self.down as i32 - self.up as i32,
        )
    }
}

/// Player intent for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement direction, components in {-1, 0, 1}
    pub movement: IVec2,
    /// Fire direction, components in {-1, 0, 1}; zero means not firing
    pub fire: IVec2,
    /// Quit the session immediately
    pub quit: bool,
}

impl TickInput {
    pub fn from_keys(movement: DirectionKeys, fire: DirectionKeys) -> Self {
        Self {
            movement: movement.axis(),
            fire: fire.axis(),
            quit: false,
        }
    }
}

/// What an entity does this frame, decided before it is borrowed mutably
enum Step {
    Projectile,
    Player,
    Enemy(EntityId),
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.time_ticks += 1;

    // Shots fired this frame join after collisions, so they are neither
    // updated nor collision-checked until the next frame.
    let mut fired: Vec<Projectile> = Vec::new();

    for id in state.registry.members(Group::AllActive) {
        let step = match state.registry.get(id) {
            Some(entity) if entity.is_alive() => match entity {
                Entity::Projectile(_) => Step::Projectile,
                Entity::Character(c) => match c.role {
                    Role::Player => Step::Player,
                    Role::Enemy { target } => Step::Enemy(target),
                },
            },
            _ => continue,
        };

        match step {
            Step::Projectile => {
                if let Some(p) = state.registry.projectile_mut(id) {
                    p.update(&state.arena);
                    if !p.is_alive() {
                        state.events.push(GameEvent::Expired { id });
                    }
                }
            }
            Step::Player => {
                if let Some(c) = state.registry.character_mut(id) {
                    fired.extend(c.steer_player(
                        input.movement,
                        input.fire,
                        &state.arena,
                        &mut state.sprites,
                    ));
                }
            }
            Step::Enemy(target) => match state.registry.target_position(id, target) {
                Ok(aim) => {
                    if let Some(c) = state.registry.character_mut(id) {
                        fired.extend(c.steer_enemy(aim, &mut state.sprites));
                    }
                }
                Err(err) => {
                    if state.stranded.insert(id) {
                        log::debug!("{err}; idling");
                        state.events.push(GameEvent::TargetLost { enemy: id, target });
                    }
                }
            },
        }
    }

    state.registry.sweep_dead();

    let resolution = resolve_collisions(&mut state.registry);
    for hit in &resolution.hits {
        state.events.push(GameEvent::Hit {
            projectile: hit.projectile,
            victim: hit.victim,
            damage: hit.damage,
            health: hit.health,
        });
    }
    for &id in &resolution.casualties {
        state.stranded.remove(&id);
        state.events.push(GameEvent::Died { id });
    }

    for projectile in fired {
        state.spawn_projectile(projectile);
    }

    if !state.player_alive() {
        state.phase = GamePhase::GameOver;
        log::info!("Player down after {} ticks", state.time_ticks);
    }
}
