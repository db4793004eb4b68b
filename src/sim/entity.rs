//! Entity model: circular bodies, projectiles and characters
//!
//! Entities are a closed set of variants ([`Entity`]) sharing the
//! [`GameObject`] capability. Characters own a [`ProjectileSpec`] describing
//! what they shoot rather than being bound to a projectile type.

use std::sync::Arc;

use glam::{IVec2, Vec2};
use image::{Rgba, RgbaImage};

use super::collision::Circle;
use super::rect::Rect;
use super::registry::{EntityId, Group};
use crate::consts::*;
use crate::renderer::{SpriteCache, sprite_side};
use crate::scale_to_speed;

/// Which side an entity fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Enemy,
}

/// Concrete entity kind (decides group membership)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
}

impl EntityKind {
    /// Groups an entity of this kind belongs to for its whole lifetime
    pub fn groups(self) -> &'static [Group] {
        match self {
            EntityKind::Player => &[Group::Players, Group::AllActive],
            EntityKind::Enemy => &[Group::Enemies, Group::AllActive],
            EntityKind::PlayerProjectile => &[
                Group::PlayerProjectiles,
                Group::AllProjectiles,
                Group::AllActive,
            ],
            EntityKind::EnemyProjectile => &[
                Group::EnemyProjectiles,
                Group::AllProjectiles,
                Group::AllActive,
            ],
        }
    }
}

/// Shared capability of everything that lives in the arena
pub trait GameObject {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn collision_shape(&self) -> Circle {
        self.body().collision_shape()
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }

    fn kill(&mut self) {
        self.body_mut().alive = false;
    }
}

/// A circle with a position and a generated sprite
#[derive(Debug, Clone)]
pub struct Body {
    /// Center point
    pub position: Vec2,
    /// Collision and render radius, whole pixels
    radius: f32,
    pub color: Rgba<u8>,
    image: Arc<RgbaImage>,
    pub alive: bool,
}

impl Body {
    pub fn new(position: Vec2, radius: f32, color: Rgba<u8>, sprites: &mut SpriteCache) -> Self {
        let radius = radius.max(0.0).trunc();
        Self {
            position,
            radius,
            color,
            image: sprites.get(radius, color),
            alive: true,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn image(&self) -> &Arc<RgbaImage> {
        &self.image
    }

    /// Resize and regenerate the sprite, keeping the current center
    pub fn set_radius(&mut self, radius: f32, sprites: &mut SpriteCache) {
        self.radius = radius.max(0.0).trunc();
        self.image = sprites.get(self.radius, self.color);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Bounding box of the sprite, side `2 * radius + 1`, centered on `position`
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position, Vec2::splat(sprite_side(self.radius) as f32))
    }

    pub fn direction_to(&self, point: Vec2) -> Vec2 {
        crate::direction_to(self.position, point)
    }

    pub fn collision_shape(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }
}

/// What a character fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub radius: f32,
    pub speed: f32,
    pub damage: f32,
    pub color: Rgba<u8>,
}

impl ProjectileSpec {
    pub const PLAYER: ProjectileSpec = ProjectileSpec {
        radius: PLAYER_SHOT_RADIUS,
        speed: PLAYER_SHOT_SPEED,
        damage: PLAYER_SHOT_DAMAGE,
        color: Rgba(PLAYER_SHOT_COLOR),
    };

    pub const ENEMY: ProjectileSpec = ProjectileSpec {
        radius: ENEMY_SHOT_RADIUS,
        speed: ENEMY_SHOT_SPEED,
        damage: ENEMY_SHOT_DAMAGE,
        color: Rgba(ENEMY_SHOT_COLOR),
    };
}

/// A shot travelling in a straight line
#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    /// Per-frame displacement, fixed at spawn
    pub velocity: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub faction: Faction,
}

impl Projectile {
    pub fn spawn(
        position: Vec2,
        direction: Vec2,
        spec: &ProjectileSpec,
        faction: Faction,
        sprites: &mut SpriteCache,
    ) -> Self {
        Self {
            body: Body::new(position, spec.radius, spec.color, sprites),
            velocity: scale_to_speed(direction, spec.speed),
            speed: spec.speed,
            damage: spec.damage,
            faction,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self.faction {
            Faction::Player => EntityKind::PlayerProjectile,
            Faction::Enemy => EntityKind::EnemyProjectile,
        }
    }

    /// Advance one frame; dies once the sprite no longer overlaps the arena
    pub fn update(&mut self, arena: &Rect) {
        self.body.position += self.velocity;
        if !self.body.rect().intersects(arena) {
            self.kill();
        }
    }
}

impl GameObject for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Behavior of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Driven by per-frame intent
    Player,
    /// Chases and shoots at another character
    Enemy { target: EntityId },
}

/// A character with health and a weapon
#[derive(Debug, Clone)]
pub struct Character {
    pub body: Body,
    pub health: f32,
    pub speed: f32,
    /// Idle fire attempts required between two shots
    pub reload_time: u32,
    /// Fire attempts left before the next shot
    pub reload_counter: u32,
    pub weapon: ProjectileSpec,
    pub role: Role,
}

impl Character {
    pub fn player(position: Vec2, sprites: &mut SpriteCache) -> Self {
        Self {
            body: Body::new(position, CHARACTER_RADIUS, Rgba(PLAYER_COLOR), sprites),
            health: PLAYER_HEALTH,
            speed: PLAYER_SPEED,
            reload_time: PLAYER_RELOAD,
            reload_counter: 0,
            weapon: ProjectileSpec::PLAYER,
            role: Role::Player,
        }
    }

    pub fn enemy(position: Vec2, target: EntityId, sprites: &mut SpriteCache) -> Self {
        Self {
            body: Body::new(position, CHARACTER_RADIUS, Rgba(ENEMY_COLOR), sprites),
            health: ENEMY_HEALTH,
            speed: ENEMY_SPEED,
            reload_time: ENEMY_RELOAD,
            reload_counter: 0,
            weapon: ProjectileSpec::ENEMY,
            role: Role::Enemy { target },
        }
    }

    pub fn faction(&self) -> Faction {
        match self.role {
            Role::Player => Faction::Player,
            Role::Enemy { .. } => Faction::Enemy,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self.role {
            Role::Player => EntityKind::Player,
            Role::Enemy { .. } => EntityKind::Enemy,
        }
    }

    /// Current target handle (enemies only)
    pub fn target(&self) -> Option<EntityId> {
        match self.role {
            Role::Enemy { target } => Some(target),
            Role::Player => None,
        }
    }

    /// Point an enemy at a different character; no-op for the player
    pub fn retarget(&mut self, new_target: EntityId) {
        if let Role::Enemy { target } = &mut self.role {
            *target = new_target;
        }
    }

    /// One fire attempt. While reloading this only counts the reload down,
    /// so the cooldown advances per attempt rather than per frame. A shot
    /// resets the counter to `reload_time`, so shots are `reload_time + 1`
    /// attempts apart.
    pub fn try_fire(&mut self, direction: Vec2, sprites: &mut SpriteCache) -> Option<Projectile> {
        if self.reload_counter > 0 {
            self.reload_counter -= 1;
            return None;
        }

        self.reload_counter = self.reload_time;
        Some(Projectile::spawn(
            self.body.position,
            direction,
            &self.weapon,
            self.faction(),
            sprites,
        ))
    }

    /// Subtract damage and return the remaining health
    pub fn apply_damage(&mut self, damage: f32) -> f32 {
        self.health -= damage;
        self.health
    }

    /// Player step: move by intent, stay fully inside the arena, fire if asked.
    /// Without fire intent no attempt is made, so the reload does not tick.
    pub fn steer_player(
        &mut self,
        movement: IVec2,
        fire: IVec2,
        arena: &Rect,
        sprites: &mut SpriteCache,
    ) -> Option<Projectile> {
        let movement = movement.as_vec2();
        self.body.position += scale_to_speed(movement, self.speed);
        let clamped = self.body.rect().clamp_inside(arena);
        self.body.set_position(clamped.center());

        if fire == IVec2::ZERO {
            return None;
        }
        let direction = movement * FIRE_MOVE_BLEND + fire.as_vec2();
        self.try_fire(direction, sprites)
    }

    /// Enemy step: shoot at the target every frame while closing in on it
    pub fn steer_enemy(&mut self, target: Vec2, sprites: &mut SpriteCache) -> Option<Projectile> {
        let direction = self.body.direction_to(target);
        let shot = self.try_fire(direction, sprites);
        self.body.position += scale_to_speed(direction, self.speed);
        shot
    }
}

impl GameObject for Character {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Anything stored in the registry
#[derive(Debug, Clone)]
pub enum Entity {
    Projectile(Projectile),
    Character(Character),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Projectile(p) => p.kind(),
            Entity::Character(c) => c.kind(),
        }
    }

    pub fn as_character(&self) -> Option<&Character> {
        match self {
            Entity::Character(c) => Some(c),
            Entity::Projectile(_) => None,
        }
    }

    pub fn as_character_mut(&mut self) -> Option<&mut Character> {
        match self {
            Entity::Character(c) => Some(c),
            Entity::Projectile(_) => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&Projectile> {
        match self {
            Entity::Projectile(p) => Some(p),
            Entity::Character(_) => None,
        }
    }

    pub fn as_projectile_mut(&mut self) -> Option<&mut Projectile> {
        match self {
            Entity::Projectile(p) => Some(p),
            Entity::Character(_) => None,
        }
    }
}

impl GameObject for Entity {
    fn body(&self) -> &Body {
        match self {
            Entity::Projectile(p) => p.body(),
            Entity::Character(c) => c.body(),
        }
    }

    fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Projectile(p) => p.body_mut(),
            Entity::Character(c) => c.body_mut(),
        }
    }
}

impl From<Projectile> for Entity {
    fn from(p: Projectile) -> Self {
        Entity::Projectile(p)
    }
}

impl From<Character> for Entity {
    fn from(c: Character) -> Self {
        Entity::Character(c)
    }
}
