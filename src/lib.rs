//! Rendering-coordinate and application-state core for 2D games.
//!
//! - [`camera::Camera`] maps world coordinates to surface pixels with smoothed
//!   motion, bounds and shake.
//! - [`renderer::RenderSurface`] owns a camera stack and records transformed
//!   draw calls into a [`renderer::Frame`] for a [`renderer::DrawBackend`].
//! - [`context::ContextManager`] runs one [`context::GameContext`] at a time
//!   and cross-fades between them.

pub mod camera;
pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod geometry;
pub mod input;
pub mod parallax;
pub mod renderer;

pub use error::{Error, Result};
