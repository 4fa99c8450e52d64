use log::{debug, info, warn};

use crate::config::GraphicsConfig;
use crate::content::ContentSource;
use crate::error::Result;
use crate::geometry::lerp;
use crate::input::{ActionMap, Control, InputState};
use crate::renderer::{Color, DrawBackend, Frame, RenderSurface};

use super::{ContextServices, FrameTime, GameContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextPhase {
    /// The first context has not been initialized yet.
    Loading,
    Running,
    /// The active context is frozen while the overlay goes opaque.
    FadingOut,
    /// A new context is active and the overlay is clearing.
    FadingIn,
    /// Exit was requested and the fade completed.  Absorbing.
    Terminated,
}

/// Owns the one active [`GameContext`] and drives it through
/// `update → draw → play_audio` each frame, cross-fading through black when
/// it asks to exit or hands over a successor.
pub struct ContextManager {
    config: GraphicsConfig,
    content: Box<dyn ContentSource>,
    surface: RenderSurface,
    controls: ActionMap<Control>,

    active: Box<dyn GameContext>,
    /// Handed over but not yet initialized; waits for the overlay to go opaque.
    successor: Option<Box<dyn GameContext>>,
    exit_pending: bool,
    phase: ContextPhase,

    fade_alpha: f32,
    fade_target: f32,

    time: FrameTime,
    shut_down: bool,
}

impl ContextManager {
    pub fn new(config: GraphicsConfig, content: Box<dyn ContentSource>, initial: Box<dyn GameContext>) -> Self {
        let surface = RenderSurface::new(&config);
        Self {
            config,
            content,
            surface,
            controls: Control::default_bindings(),
            active: initial,
            successor: None,
            exit_pending: false,
            phase: ContextPhase::Loading,
            fade_alpha: 0.0,
            fade_target: 0.0,
            time: FrameTime::default(),
            shut_down: false,
        }
    }

    // ── State ────────────────────────────────────────────────────────────────

    pub fn phase(&self) -> ContextPhase { self.phase }
    pub fn is_terminated(&self) -> bool { self.phase == ContextPhase::Terminated }

    /// Overlay opacity, 0 = clear, 1 = black.
    pub fn fade_alpha(&self) -> f32 { self.fade_alpha }
    pub fn fade_target(&self) -> f32 { self.fade_target }

    pub fn time(&self) -> FrameTime { self.time }
    pub fn config(&self) -> &GraphicsConfig { &self.config }
    pub fn surface(&self) -> &RenderSurface { &self.surface }
    pub fn surface_mut(&mut self) -> &mut RenderSurface { &mut self.surface }
    pub fn active(&self) -> &dyn GameContext { self.active.as_ref() }

    pub fn controls_mut(&mut self) -> &mut ActionMap<Control> { &mut self.controls }

    // ── Frame ────────────────────────────────────────────────────────────────

    /// Run one whole frame: update, draw and submit to `backend`, then audio.
    /// Returns `false` once the manager has terminated.
    pub fn frame(&mut self, delta: f32, input: &InputState, backend: &mut dyn DrawBackend) -> bool {
        self.update(delta, input);
        match self.draw(input) {
            Ok(frame) => backend.submit(&frame),
            Err(e) => warn!("frame dropped: {e}"),
        }
        self.play_audio(input);
        !self.is_terminated()
    }

    /// Advance the state machine by one frame.
    pub fn update(&mut self, delta: f32, input: &InputState) {
        self.time = FrameTime { delta, total: self.time.total + delta };

        if self.controls.is_pressed(Control::ToggleDebug, input) {
            let debug = !self.surface.debug_mode();
            self.surface.set_debug_mode(debug);
            info!("debug drawing {}", if debug { "on" } else { "off" });
        }

        let services = ContextServices {
            content: self.content.as_ref(),
            input,
            config: &self.config,
            time: self.time,
        };

        if self.phase == ContextPhase::Loading {
            self.active.initialize(&services);
            self.phase = ContextPhase::Running;
            debug!("initial context loaded");
        }

        match self.phase {
            ContextPhase::Running | ContextPhase::FadingIn => {
                if self.active.exit_requested() {
                    info!("exit requested; fading out");
                    self.exit_pending = true;
                    self.fade_target = 1.0;
                    self.phase = ContextPhase::FadingOut;
                } else if let Some(next) = self.active.take_next_context() {
                    debug!("context switch requested; fading out");
                    self.successor = Some(next);
                    self.fade_target = 1.0;
                    self.phase = ContextPhase::FadingOut;
                } else {
                    self.active.update(&services);
                }
            }
            ContextPhase::FadingOut if self.fade_alpha >= 1.0 => {
                if self.exit_pending {
                    info!("fade out complete; terminating");
                    self.phase = ContextPhase::Terminated;
                } else if let Some(mut incoming) = self.successor.take() {
                    incoming.initialize(&services);
                    let mut outgoing = std::mem::replace(&mut self.active, incoming);
                    outgoing.dispose();
                    self.fade_target = 0.0;
                    self.phase = ContextPhase::FadingIn;
                    debug!("context switched; fading in");
                } else {
                    warn!("fading out with nothing to switch to; fading back in");
                    self.fade_target = 0.0;
                    self.phase = ContextPhase::FadingIn;
                }
            }
            ContextPhase::FadingOut | ContextPhase::Loading | ContextPhase::Terminated => {}
        }

        let rate = self.active.fade_multiplier().clamp(0.0, 1.0);
        self.fade_alpha = lerp(self.fade_alpha, self.fade_target, rate);
        if (self.fade_alpha - self.fade_target).abs() < self.config.fade_epsilon
            || self.controls.is_held(Control::SkipFade, input)
        {
            self.fade_alpha = self.fade_target;
        }

        if self.phase == ContextPhase::FadingIn && self.fade_alpha <= 0.0 {
            self.phase = ContextPhase::Running;
        }
    }

    /// Render the active context and the fade overlay into a finished frame.
    pub fn draw(&mut self, input: &InputState) -> Result<Frame> {
        let clear = match self.phase {
            ContextPhase::Loading => Color::BLACK,
            _ => self.active.background_color(),
        };
        self.surface.begin_frame(clear)?;

        if !matches!(self.phase, ContextPhase::Loading | ContextPhase::Terminated) {
            let services = ContextServices {
                content: self.content.as_ref(),
                input,
                config: &self.config,
                time: self.time,
            };
            self.active.draw(&mut self.surface, &services);
        }

        self.surface.draw_fade_overlay(self.fade_alpha);
        let frame = self.surface.end_frame();

        if self.surface.reset_camera_stack() {
            warn!("not all cameras were popped from the stack; resetting");
        }
        frame
    }

    pub fn play_audio(&mut self, input: &InputState) {
        if matches!(self.phase, ContextPhase::Loading | ContextPhase::Terminated) {
            return;
        }
        let services = ContextServices {
            content: self.content.as_ref(),
            input,
            config: &self.config,
            time: self.time,
        };
        self.active.play_audio(&services);
    }

    /// Dispose the active context.  A successor still waiting on the fade was
    /// never initialized and is dropped as is.  Later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        if self.phase != ContextPhase::Loading {
            self.active.dispose();
        }
        if self.successor.take().is_some() {
            debug!("pending context dropped at shutdown");
        }
        self.phase = ContextPhase::Terminated;
        info!("context manager shut down");
    }
}
