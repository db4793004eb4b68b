//! Per-frame draw lists and a software compositor

use std::path::Path;
use std::sync::Arc;

use image::imageops;
use image::{ImageFormat, ImageResult, Rgba, RgbaImage};

use crate::sim::{EntityRegistry, GameObject, Group, Rect};

/// One sprite placed on screen
#[derive(Debug, Clone)]
pub struct Draw {
    pub image: Arc<RgbaImage>,
    pub rect: Rect,
}

/// Render output for a single frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Live entities in id order
    pub draws: Vec<Draw>,
    /// Boxes drawn last frame, to be painted over with the background
    pub erase: Vec<Rect>,
    /// Every region touched this frame (erased and drawn)
    pub dirty: Vec<Rect>,
}

/// Builds frames and remembers what was drawn for the next erase pass
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    previous: Vec<Rect>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&mut self, registry: &EntityRegistry) -> Frame {
        let draws: Vec<Draw> = registry
            .iter_group(Group::AllActive)
            .filter(|(_, e)| e.is_alive())
            .map(|(_, e)| Draw {
                image: e.body().image().clone(),
                rect: e.body().rect(),
            })
            .collect();

        let current: Vec<Rect> = draws.iter().map(|d| d.rect).collect();
        let erase = std::mem::replace(&mut self.previous, current.clone());
        let mut dirty = erase.clone();
        dirty.extend(current);

        Frame {
            draws,
            erase,
            dirty,
        }
    }
}

/// Top-left pixel of a box (pixel centers sit on whole coordinates)
#[inline]
fn pixel_origin(rect: &Rect) -> (i64, i64) {
    (rect.x.round() as i64, rect.y.round() as i64)
}

/// Paints frames onto an in-memory canvas
#[derive(Debug, Clone)]
pub struct Compositor {
    background: Rgba<u8>,
    canvas: RgbaImage,
}

impl Compositor {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            background,
            canvas: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn present(&mut self, frame: &Frame) {
        for rect in &frame.erase {
            self.fill(rect);
        }
        for draw in &frame.draws {
            let (x, y) = pixel_origin(&draw.rect);
            imageops::overlay(&mut self.canvas, draw.image.as_ref(), x, y);
        }
    }

    fn fill(&mut self, rect: &Rect) {
        let (x0, y0) = pixel_origin(rect);
        let x1 = x0 + rect.w.round() as i64;
        let y1 = y0 + rect.h.round() as i64;
        let (width, height) = self.canvas.dimensions();

        for y in y0.max(0)..y1.min(height as i64) {
            for x in x0.max(0)..x1.min(width as i64) {
                self.canvas.put_pixel(x as u32, y as u32, self.background);
            }
        }
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.canvas.save_with_format(path, ImageFormat::Png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{GameState, TickInput, tick};
    use glam::{IVec2, Vec2};

    const ARENA: Rect = Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT);

    #[test]
    fn test_frame_tracks_previous_boxes() {
        let mut state = GameState::empty(ARENA, 0);
        state.spawn_player(Vec2::new(100.0, 100.0));
        let mut builder = FrameBuilder::new();

        let first = builder.build(&state.registry);
        assert_eq!(first.draws.len(), 1);
        assert!(first.erase.is_empty());
        assert_eq!(first.dirty.len(), 1);

        let input = TickInput {
            movement: IVec2::new(1, 0),
            ..Default::default()
        };
        tick(&mut state, &input);
        let second = builder.build(&state.registry);
        assert_eq!(second.erase, vec![first.draws[0].rect]);
        assert_eq!(second.dirty.len(), 2);
        assert_eq!(second.draws[0].rect.center(), Vec2::new(108.0, 100.0));
    }

    #[test]
    fn test_compositor_draws_and_erases() {
        let mut state = GameState::empty(ARENA, 0);
        let player = state.spawn_player(Vec2::new(100.0, 100.0));
        let mut builder = FrameBuilder::new();
        let mut out = Compositor::new(640, 480, Rgba(BACKGROUND));

        out.present(&builder.build(&state.registry));
        assert_eq!(*out.canvas().get_pixel(100, 100), Rgba(PLAYER_COLOR));
        assert_eq!(*out.canvas().get_pixel(0, 0), Rgba(BACKGROUND));

        if let Some(c) = state.registry.character_mut(player) {
            c.body.set_position(Vec2::new(300.0, 300.0));
        }
        out.present(&builder.build(&state.registry));
        assert_eq!(*out.canvas().get_pixel(100, 100), Rgba(BACKGROUND));
        assert_eq!(*out.canvas().get_pixel(300, 300), Rgba(PLAYER_COLOR));
    }

    #[test]
    fn test_erase_clips_to_canvas() {
        let mut out = Compositor::new(10, 10, Rgba(BACKGROUND));
        let frame = Frame {
            erase: vec![Rect::new(-5.0, 5.0, 30.0, 30.0)],
            ..Default::default()
        };
        out.present(&frame);
        assert_eq!(*out.canvas().get_pixel(9, 9), Rgba(BACKGROUND));
    }
}
