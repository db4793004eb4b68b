//! Software rendering module
//!
//! Circle sprites are generated procedurally; each frame produces a draw
//! list plus the regions that need repainting. Compositing onto a real
//! display is left to the host.

pub mod frame;
pub mod sprite;

pub use frame::{Compositor, Draw, Frame, FrameBuilder};
pub use sprite::{SpriteCache, generate_circle_image, sprite_side};
