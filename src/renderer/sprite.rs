//! Procedural circle sprites
//!
//! Every entity is drawn as a filled circle generated from its radius and
//! color. Output is deterministic for fixed inputs, so images are shared
//! through [`SpriteCache`] instead of being rebuilt on every spawn.

use std::collections::HashMap;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Edge length of the square sprite for a circle of `radius` pixels
#[inline]
pub fn sprite_side(radius: f32) -> u32 {
    whole_radius(radius) * 2 + 1
}

#[inline]
fn whole_radius(radius: f32) -> u32 {
    radius.max(0.0) as u32
}

/// Background pixel: the circle's own RGB at zero alpha, so smoothing never
/// pulls dark fringes in from the transparent area.
#[inline]
fn clear_of(color: Rgba<u8>) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 0])
}

/// Generate a filled circle sprite of side `2 * radius + 1`
///
/// - `supersample == 0`: hard-edged fill at target resolution
/// - `supersample == 1`: anti-aliased fill at target resolution
/// - `supersample >= 2`: anti-aliased fill at `radius * supersample`, then a
///   smoothing resize down to the target size
pub fn generate_circle_image(radius: f32, color: Rgba<u8>, supersample: u32) -> RgbaImage {
    let r = whole_radius(radius);
    if supersample == 0 {
        return hard_circle(r, color);
    }

    let big_r = r * supersample;
    let canvas = smooth_circle(big_r, color);
    if big_r == r {
        return canvas;
    }

    let side = r * 2 + 1;
    imageops::resize(&canvas, side, side, FilterType::Triangle)
}

/// Rasterized fill: a pixel is either the circle color or fully transparent
fn hard_circle(r: u32, color: Rgba<u8>) -> RgbaImage {
    let side = r * 2 + 1;
    let c = r as f32;
    let r_sq = c * c;
    let clear = clear_of(color);

    RgbaImage::from_fn(side, side, |x, y| {
        let dx = x as f32 - c;
        let dy = y as f32 - c;
        if dx * dx + dy * dy <= r_sq { color } else { clear }
    })
}

/// Filled disc with a one-pixel anti-aliased rim centred on the radius
fn smooth_circle(r: u32, color: Rgba<u8>) -> RgbaImage {
    let side = r * 2 + 1;
    let c = r as f32;
    // A zero-radius disc is still one solid pixel
    let edge = c.max(0.5);
    let clear = clear_of(color);

    RgbaImage::from_fn(side, side, |x, y| {
        let d = (x as f32 - c).hypot(y as f32 - c);
        // Half coverage exactly on the radius, so the rim fits the canvas
        let coverage = (edge + 0.5 - d).clamp(0.0, 1.0);
        if coverage <= 0.0 {
            return clear;
        }
        let alpha = (color[3] as f32 * coverage).round() as u8;
        Rgba([color[0], color[1], color[2], alpha])
    })
}

/// Memoized sprites keyed by (whole radius, color) at a fixed quality
#[derive(Debug, Clone, Default)]
pub struct SpriteCache {
    supersample: u32,
    sprites: HashMap<(u32, [u8; 4]), Arc<RgbaImage>>,
}

impl SpriteCache {
    pub fn new(supersample: u32) -> Self {
        Self {
            supersample,
            sprites: HashMap::new(),
        }
    }

    pub fn supersample(&self) -> u32 {
        self.supersample
    }

    /// Get (or generate) the sprite for a circle
    pub fn get(&mut self, radius: f32, color: Rgba<u8>) -> Arc<RgbaImage> {
        let supersample = self.supersample;
        self.sprites
            .entry((whole_radius(radius), color.0))
            .or_insert_with(|| Arc::new(generate_circle_image(radius, color, supersample)))
            .clone()
    }

    /// Number of distinct sprites generated so far
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_sprite_dimensions() {
        for supersample in 0..4 {
            let img = generate_circle_image(12.0, WHITE, supersample);
            assert_eq!(img.dimensions(), (25, 25));
        }
        assert_eq!(sprite_side(20.0), 41);
        assert_eq!(sprite_side(7.9), 15);
    }

    #[test]
    fn test_hard_edge_is_binary() {
        let img = generate_circle_image(10.0, WHITE, 0);
        assert!(img.pixels().all(|p| p[3] == 0 || p[3] == 255));
        assert_eq!(img.get_pixel(10, 10)[3], 255);
        assert_eq!(img.get_pixel(10, 0)[3], 255);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_supersampled_soft_edges() {
        let img = generate_circle_image(12.0, WHITE, 2);
        assert!(img.get_pixel(12, 12)[3] >= 250);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(24, 24)[3], 0);
        // Some partially covered pixels along the rim
        assert!(img.pixels().any(|p| p[3] > 0 && p[3] < 255));
    }

    #[test]
    fn test_anti_aliased_rim_on_axes() {
        let img = generate_circle_image(10.0, WHITE, 1);
        // Axis extremes sit on the radius: half covered, like the diagonals
        for (x, y) in [(10, 0), (0, 10), (20, 10), (10, 20)] {
            let alpha = img.get_pixel(x, y)[3];
            assert!(alpha > 0 && alpha < 255, "({x}, {y}) alpha {alpha}");
        }
        assert_eq!(img.get_pixel(10, 1)[3], 255);
        assert_eq!(img.get_pixel(10, 10)[3], 255);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_symmetric_about_center() {
        let img = generate_circle_image(9.0, WHITE, 1);
        let side = img.width();
        for y in 0..side {
            for x in 0..side {
                assert_eq!(img.get_pixel(x, y), img.get_pixel(side - 1 - x, y));
                assert_eq!(img.get_pixel(x, y), img.get_pixel(x, side - 1 - y));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let color = Rgba([230, 80, 70, 255]);
        for supersample in 0..3 {
            let a = generate_circle_image(20.0, color, supersample);
            let b = generate_circle_image(20.0, color, supersample);
            assert_eq!(a.as_raw(), b.as_raw());
        }
    }

    #[test]
    fn test_zero_radius() {
        let img = generate_circle_image(0.0, WHITE, 2);
        assert_eq!(img.dimensions(), (1, 1));
        assert_eq!(img.get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn test_cache_shares_images() {
        let mut cache = SpriteCache::new(2);
        let a = cache.get(12.0, WHITE);
        let b = cache.get(12.4, WHITE);
        assert!(Arc::ptr_eq(&a, &b));
        cache.get(8.0, WHITE);
        assert_eq!(cache.len(), 2);
    }
}
