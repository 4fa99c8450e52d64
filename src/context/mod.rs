//! Application contexts (title screen, gameplay, ...) and the manager that
//! fades between them.

pub mod manager;

use std::fmt;

use crate::config::GraphicsConfig;
use crate::content::ContentSource;
use crate::input::InputState;
use crate::renderer::{Color, RenderSurface};

pub use manager::{ContextManager, ContextPhase};

/// Fade rate a context gets unless it overrides [`GameContext::fade_multiplier`].
pub const DEFAULT_FADE_MULTIPLIER: f32 = 0.2;

/// Seconds elapsed for the current frame and since the manager started.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub delta: f32,
    pub total: f32,
}

/// Collaborators handed to every context callback.
#[derive(Clone, Copy)]
pub struct ContextServices<'a> {
    pub content: &'a dyn ContentSource,
    pub input: &'a InputState,
    pub config: &'a GraphicsConfig,
    pub time: FrameTime,
}

/// One major screen of the application.
///
/// The manager guarantees `initialize` runs before any other callback, and
/// never calls `update` while the context is fading out.  A context leaves by
/// raising [`GameContext::exit_requested`] or handing over a successor from
/// [`GameContext::take_next_context`]; [`ContextSignals`] stores both.
pub trait GameContext {
    fn initialize(&mut self, _services: &ContextServices) {}
    fn update(&mut self, services: &ContextServices);
    fn draw(&mut self, surface: &mut RenderSurface, services: &ContextServices);
    fn play_audio(&mut self, _services: &ContextServices) {}
    fn dispose(&mut self) {}

    /// Fade out and terminate the application.
    fn exit_requested(&self) -> bool { false }

    /// Fade out and switch to the returned context.  Polled once per frame
    /// while the context is running; ownership moves to the manager.
    fn take_next_context(&mut self) -> Option<Box<dyn GameContext>> { None }

    fn background_color(&self) -> Color { Color::CORNFLOWER_BLUE }

    /// Fraction of the remaining fade covered per frame.  Applies while this
    /// context fades out and while it fades in.
    fn fade_multiplier(&self) -> f32 { DEFAULT_FADE_MULTIPLIER }
}

/// Exit flag and pending successor, for contexts to embed and forward to.
#[derive(Default)]
pub struct ContextSignals {
    exit: bool,
    next: Option<Box<dyn GameContext>>,
}

impl ContextSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_exit(&mut self) {
        self.exit = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit
    }

    /// Queue a successor.  A later call replaces an earlier one.
    pub fn switch_to(&mut self, next: impl GameContext + 'static) {
        self.next = Some(Box::new(next));
    }

    pub fn switch_to_boxed(&mut self, next: Box<dyn GameContext>) {
        self.next = Some(next);
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn take_next(&mut self) -> Option<Box<dyn GameContext>> {
        self.next.take()
    }
}

impl fmt::Debug for ContextSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextSignals")
            .field("exit", &self.exit)
            .field("next", &self.next.is_some())
            .finish()
    }
}
