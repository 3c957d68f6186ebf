//! Terminal renderer for the game.
//!
//! Rendering goes through a small framebuffer instead of a widget toolkit:
//! [`GameView`] paints a [`crate::core::GameSnapshot`] into a [`FrameBuffer`], and
//! [`TerminalRenderer`] sends only what changed since the last frame.
//!
//! Board cells are drawn two characters wide to make up for the glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, HudView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
