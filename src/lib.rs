//! Arena Shooter - a top-down arena shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `renderer`: Procedural circle sprites and per-frame draw lists
//! - `session`: Frame loop (intent, tick, render, pacing)
//! - `autopilot`: Seeded intent source for headless play
//! - `settings`: Data-driven session configuration

pub mod autopilot;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 640.0;
    pub const ARENA_HEIGHT: f32 = 480.0;
    /// Largest accepted arena side, keeps the compositor canvas allocatable
    pub const MAX_ARENA_SIDE: f32 = 16384.0;

    /// Target frame rate
    pub const FPS: u32 = 30;
    /// Sprite quality: 0 = hard edge, 1 = anti-aliased, 2+ = anti-aliased and supersampled
    pub const SUPERSAMPLE: u32 = 2;
    /// Arena background color
    pub const BACKGROUND: [u8; 4] = [64, 64, 64, 255];
    /// Pause after the player dies before the session shuts down
    pub const END_DELAY_MS: u64 = 1000;

    /// Shared character body size
    pub const CHARACTER_RADIUS: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 8.0;
    pub const PLAYER_HEALTH: f32 = 100.0;
    pub const PLAYER_RELOAD: u32 = 4;
    pub const PLAYER_COLOR: [u8; 4] = [255, 255, 255, 255];

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 3.0;
    pub const ENEMY_HEALTH: f32 = 10.0;
    pub const ENEMY_RELOAD: u32 = 15;
    pub const ENEMY_COLOR: [u8; 4] = [230, 80, 70, 255];

    /// Player projectile
    pub const PLAYER_SHOT_RADIUS: f32 = 12.0;
    pub const PLAYER_SHOT_SPEED: f32 = 10.0;
    pub const PLAYER_SHOT_DAMAGE: f32 = 2.0;
    pub const PLAYER_SHOT_COLOR: [u8; 4] = [140, 210, 255, 255];

    /// Enemy projectile
    pub const ENEMY_SHOT_RADIUS: f32 = 8.0;
    pub const ENEMY_SHOT_SPEED: f32 = 5.0;
    pub const ENEMY_SHOT_DAMAGE: f32 = 5.0;
    pub const ENEMY_SHOT_COLOR: [u8; 4] = [255, 190, 70, 255];

    /// Weight of the movement intent when blended into the player's fire direction
    pub const FIRE_MOVE_BLEND: f32 = 0.4;
}

/// Scale `v` to unit length; the zero vector stays zero
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 0.0 { v / len } else { Vec2::ZERO }
}

/// Direction of `v` with magnitude `speed` (zero stays zero)
#[inline]
pub fn scale_to_speed(v: Vec2, speed: f32) -> Vec2 {
    normalize(v) * speed
}

/// Unit vector pointing from `a` toward `b`
#[inline]
pub fn direction_to(a: Vec2, b: Vec2) -> Vec2 {
    normalize(b - a)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit vector for an angle in degrees (screen space, y down)
#[inline]
pub fn angle_to_vec(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Angle of `v` in degrees in (-180, 180]; the zero vector maps to 0
#[inline]
pub fn vec_to_angle(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_zero() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(scale_to_speed(Vec2::ZERO, 8.0), Vec2::ZERO);
    }

    #[test]
    fn test_scale_to_speed_diagonal() {
        let v = scale_to_speed(Vec2::new(1.0, 1.0), 8.0);
        assert!((v.length() - 8.0).abs() < 1e-4);
        assert!((v.x - v.y).abs() < 1e-6);
    }

    #[test]
    fn test_direction_and_distance() {
        let a = Vec2::new(10.0, 10.0);
        let b = Vec2::new(13.0, 14.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-6);
        let d = direction_to(a, b);
        assert!((d - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert_eq!(direction_to(a, a), Vec2::ZERO);
    }

    #[test]
    fn test_angle_round_trip() {
        let v = angle_to_vec(90.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
        assert!((vec_to_angle(Vec2::new(-1.0, 0.0)) - 180.0).abs() < 1e-4);
        assert_eq!(vec_to_angle(Vec2::ZERO), 0.0);
    }

    proptest! {
        #[test]
        fn normalize_has_unit_length(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
            let v = Vec2::new(x, y);
            let n = normalize(v);
            if v.length() > 0.0 {
                prop_assert!((n.length() - 1.0).abs() < 1e-4);
            } else {
                prop_assert_eq!(n, Vec2::ZERO);
            }
        }

        #[test]
        fn distance_is_symmetric(ax in -500.0f32..500.0, ay in -500.0f32..500.0,
                                 bx in -500.0f32..500.0, by in -500.0f32..500.0) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(distance(a, b), distance(b, a));
        }
    }
}
