//! Circle collision and damage resolution
//!
//! Projectiles only hit characters of the opposing faction:
//! enemy projectiles vs players, player projectiles vs enemies.

use glam::Vec2;

use super::entity::GameObject;
use super::registry::{EntityId, EntityRegistry, Group};
use crate::distance;

/// Collision shape shared by every entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Touching circles count as colliding
    #[inline]
    pub fn collides(&self, other: &Circle) -> bool {
        distance(self.center, other.center) <= self.radius + other.radius
    }
}

/// A projectile striking a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub projectile: EntityId,
    pub victim: EntityId,
    pub damage: f32,
    /// Victim health after this hit was applied
    pub health: f32,
}

/// Outcome of one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub hits: Vec<Hit>,
    /// Characters removed because their health dropped to zero or below
    pub casualties: Vec<EntityId>,
}

/// Opposing (projectile, victim) group pairs, in resolution order
const PAIRS: [(Group, Group); 2] = [
    (Group::EnemyProjectiles, Group::Players),
    (Group::PlayerProjectiles, Group::Enemies),
];

/// Match each live projectile of `projectiles` to at most one live character
/// of `victims`. Projectiles are visited in id order and take the lowest-id
/// character they overlap.
pub fn find_hits(
    registry: &EntityRegistry,
    projectiles: Group,
    victims: Group,
) -> Vec<(EntityId, EntityId)> {
    let targets: Vec<(EntityId, Circle)> = registry
        .iter_group(victims)
        .filter(|(_, e)| e.is_alive())
        .map(|(id, e)| (id, e.collision_shape()))
        .collect();

    registry
        .iter_group(projectiles)
        .filter(|(_, e)| e.is_alive())
        .filter_map(|(pid, e)| {
            let shape = e.collision_shape();
            targets
                .iter()
                .find(|(_, target)| shape.collides(target))
                .map(|(vid, _)| (pid, *vid))
        })
        .collect()
}

/// Resolve all projectile/character collisions for this frame.
///
/// Matches for a pair are computed before any damage is applied, so a
/// character can absorb several projectiles in one frame. Consumed
/// projectiles and characters at or below zero health are removed
/// from the registry before returning.
pub fn resolve_collisions(registry: &mut EntityRegistry) -> Resolution {
    let mut resolution = Resolution::default();

    for (projectiles, victims) in PAIRS {
        let matches = find_hits(registry, projectiles, victims);
        let mut struck: Vec<EntityId> = Vec::new();

        for (pid, vid) in matches {
            let Some(damage) = registry.projectile(pid).map(|p| p.damage) else {
                continue;
            };
            registry.remove(pid);

            let Some(victim) = registry.character_mut(vid) else {
                continue;
            };
            let health = victim.apply_damage(damage);
            resolution.hits.push(Hit {
                projectile: pid,
                victim: vid,
                damage,
                health,
            });
            if !struck.contains(&vid) {
                struck.push(vid);
            }
        }

        for vid in struck {
            let dead = registry.character(vid).is_some_and(|c| c.health <= 0.0);
            if dead {
                if let Some(victim) = registry.character_mut(vid) {
                    victim.kill();
                }
                registry.remove(vid);
                resolution.casualties.push(vid);
            }
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::SpriteCache;
    use crate::sim::entity::{Character, Faction, Projectile, ProjectileSpec};
    use proptest::prelude::*;

    fn player_shot(reg: &mut EntityRegistry, sprites: &mut SpriteCache, at: Vec2) -> EntityId {
        reg.insert(Projectile::spawn(
            at,
            Vec2::ZERO,
            &ProjectileSpec::PLAYER,
            Faction::Player,
            sprites,
        ))
    }

    #[test]
    fn test_touching_boundary_inclusive() {
        let enemy = Circle::new(Vec2::new(100.0, 100.0), CHARACTER_RADIUS);
        let shot = Circle::new(Vec2::new(132.0, 100.0), PLAYER_SHOT_RADIUS);
        assert!(shot.collides(&enemy));

        let shot = Circle::new(Vec2::new(132.01, 100.0), PLAYER_SHOT_RADIUS);
        assert!(!shot.collides(&enemy));
    }

    #[test]
    fn test_damage_below_health() {
        let mut sprites = SpriteCache::new(0);
        let mut reg = EntityRegistry::new();
        let player = reg.insert(Character::player(Vec2::ZERO, &mut sprites));
        let enemy = reg.insert(Character::enemy(Vec2::new(100.0, 100.0), player, &mut sprites));
        let shot = player_shot(&mut reg, &mut sprites, Vec2::new(110.0, 100.0));

        let res = resolve_collisions(&mut reg);
        assert_eq!(res.hits.len(), 1);
        assert_eq!(res.hits[0].projectile, shot);
        assert!(res.casualties.is_empty());
        assert_eq!(
            reg.character(enemy).map(|c| c.health),
            Some(ENEMY_HEALTH - PLAYER_SHOT_DAMAGE)
        );
        assert!(reg.get(shot).is_none());
    }

    #[test]
    fn test_lethal_damage_removes_same_frame() {
        let mut sprites = SpriteCache::new(0);
        let mut reg = EntityRegistry::new();
        let player = reg.insert(Character::player(Vec2::ZERO, &mut sprites));
        let enemy = reg.insert(Character::enemy(Vec2::new(100.0, 100.0), player, &mut sprites));
        if let Some(c) = reg.character_mut(enemy) {
            c.health = PLAYER_SHOT_DAMAGE;
        }
        player_shot(&mut reg, &mut sprites, Vec2::new(100.0, 100.0));

        let res = resolve_collisions(&mut reg);
        assert_eq!(res.casualties, vec![enemy]);
        assert!(reg.get(enemy).is_none());
        assert_eq!(reg.len(Group::Enemies), 0);
        assert_eq!(reg.len(Group::AllActive), 1);
    }

    #[test]
    fn test_projectile_hits_one_character_only() {
        let mut sprites = SpriteCache::new(0);
        let mut reg = EntityRegistry::new();
        let player = reg.insert(Character::player(Vec2::ZERO, &mut sprites));
        let first = reg.insert(Character::enemy(Vec2::new(100.0, 100.0), player, &mut sprites));
        let second = reg.insert(Character::enemy(Vec2::new(110.0, 100.0), player, &mut sprites));
        player_shot(&mut reg, &mut sprites, Vec2::new(105.0, 100.0));

        let res = resolve_collisions(&mut reg);
        assert_eq!(res.hits.len(), 1);
        assert_eq!(res.hits[0].victim, first);
        assert_eq!(reg.character(second).map(|c| c.health), Some(ENEMY_HEALTH));
    }

    #[test]
    fn test_multiple_hits_stack() {
        let mut sprites = SpriteCache::new(0);
        let mut reg = EntityRegistry::new();
        let player = reg.insert(Character::player(Vec2::ZERO, &mut sprites));
        let enemy = reg.insert(Character::enemy(Vec2::new(100.0, 100.0), player, &mut sprites));
        player_shot(&mut reg, &mut sprites, Vec2::new(100.0, 90.0));
        player_shot(&mut reg, &mut sprites, Vec2::new(100.0, 110.0));
        player_shot(&mut reg, &mut sprites, Vec2::new(95.0, 100.0));

        let res = resolve_collisions(&mut reg);
        assert_eq!(res.hits.len(), 3);
        assert_eq!(res.hits[2].health, ENEMY_HEALTH - 3.0 * PLAYER_SHOT_DAMAGE);
        assert_eq!(reg.character(enemy).map(|c| c.health), Some(res.hits[2].health));
        assert_eq!(reg.len(Group::AllProjectiles), 0);
    }

    #[test]
    fn test_same_faction_ignored() {
        let mut sprites = SpriteCache::new(0);
        let mut reg = EntityRegistry::new();
        let player = reg.insert(Character::player(Vec2::new(50.0, 50.0), &mut sprites));
        let shot = player_shot(&mut reg, &mut sprites, Vec2::new(50.0, 50.0));

        let res = resolve_collisions(&mut reg);
        assert!(res.hits.is_empty());
        assert!(reg.get(shot).is_some());
        assert_eq!(reg.character(player).map(|c| c.health), Some(PLAYER_HEALTH));
    }

    #[test]
    fn test_enemy_shot_hits_player() {
        let mut sprites = SpriteCache::new(0);
        let mut reg = EntityRegistry::new();
        let player = reg.insert(Character::player(Vec2::new(50.0, 50.0), &mut sprites));
        reg.insert(Projectile::spawn(
            Vec2::new(70.0, 60.0),
            Vec2::ZERO,
            &ProjectileSpec::ENEMY,
            Faction::Enemy,
            &mut sprites,
        ));

        let res = resolve_collisions(&mut reg);
        assert_eq!(res.hits.len(), 1);
        assert_eq!(res.hits[0].victim, player);
        assert_eq!(
            reg.character(player).map(|c| c.health),
            Some(PLAYER_HEALTH - ENEMY_SHOT_DAMAGE)
        );
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(
            ax in -300.0f32..300.0,
            ay in -300.0f32..300.0,
            ar in 0.0f32..50.0,
            bx in -300.0f32..300.0,
            by in -300.0f32..300.0,
            br in 0.0f32..50.0,
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = Circle::new(Vec2::new(bx, by), br);
            prop_assert_eq!(a.collides(&b), b.collides(&a));
        }
    }
}
