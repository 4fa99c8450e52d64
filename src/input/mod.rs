use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use glam::Vec2;
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// A physical input that can be bound to a logical control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Raw device state for a single frame.
///
/// The host feeds events in through `key_down`/`key_up`/`mouse_down`/... as
/// they arrive, then calls [`InputState::end_frame`] once the frame has been
/// updated so edge-triggered sets start empty again.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    /// Cursor position in window pixels.
    pub mouse_position: Vec2,
    /// Wheel movement accumulated this frame.
    pub mouse_wheel: f32,
    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    pub mouse_released: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Event intake ─────────────────────────────────────────────────────────

    /// Key went down.  OS key-repeat is ignored: a held key is not re-pressed.
    pub fn key_down(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        if self.keys_held.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_pressed.insert(button);
        }
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        if self.mouse_held.remove(&button) {
            self.mouse_released.insert(button);
        }
    }

    pub fn mouse_moved(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    pub fn scrolled(&mut self, delta: f32) {
        self.mouse_wheel += delta;
    }

    /// Forget this frame's edges; held state carries over.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_wheel = 0.0;
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool { self.mouse_held.contains(&button) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }
    pub fn is_mouse_released(&self, button: MouseButton) -> bool { self.mouse_released.contains(&button) }

    fn source_held(&self, source: InputSource) -> bool {
        match source {
            InputSource::Key(k) => self.is_key_held(k),
            InputSource::Mouse(b) => self.is_mouse_held(b),
        }
    }

    fn source_pressed(&self, source: InputSource) -> bool {
        match source {
            InputSource::Key(k) => self.is_key_pressed(k),
            InputSource::Mouse(b) => self.is_mouse_pressed(b),
        }
    }

    fn source_released(&self, source: InputSource) -> bool {
        match source {
            InputSource::Key(k) => self.is_key_released(k),
            InputSource::Mouse(b) => self.is_mouse_released(b),
        }
    }
}

// ── Controls ─────────────────────────────────────────────────────────────────

/// Maps logical controls to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// Drop every binding of `action`.
    pub fn unbind(&mut self, action: A) {
        self.bindings.remove(&action);
    }

    pub fn bindings(&self, action: A) -> &[InputSource] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Any bound source went down this frame.
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings(action).iter().any(|&s| input.source_pressed(s))
    }

    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings(action).iter().any(|&s| input.source_held(s))
    }

    pub fn is_released(&self, action: A, input: &InputState) -> bool {
        self.bindings(action).iter().any(|&s| input.source_released(s))
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

/// Controls the context manager itself listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// While held, transitions complete instantly.
    SkipFade,
    /// Flips the render surface's debug mode.
    ToggleDebug,
}

impl Control {
    /// Space skips fades, F1 toggles debug drawing.
    pub fn default_bindings() -> ActionMap<Control> {
        let mut map = ActionMap::new();
        map.bind(Control::SkipFade, InputSource::Key(KeyCode::Space));
        map.bind(Control::ToggleDebug, InputSource::Key(KeyCode::F1));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_key_down_is_not_a_new_press() {
        let mut input = InputState::new();
        input.key_down(KeyCode::KeyA);
        input.end_frame();
        input.key_down(KeyCode::KeyA);
        assert!(input.is_key_held(KeyCode::KeyA));
        assert!(!input.is_key_pressed(KeyCode::KeyA));
    }

    #[test]
    fn end_frame_keeps_held_and_clears_edges() {
        let mut input = InputState::new();
        input.mouse_down(MouseButton::Left);
        input.scrolled(2.0);
        input.end_frame();
        assert!(input.is_mouse_held(MouseButton::Left));
        assert!(!input.is_mouse_pressed(MouseButton::Left));
        assert_eq!(input.mouse_wheel, 0.0);
    }

    #[test]
    fn default_controls() {
        let map = Control::default_bindings();
        let mut input = InputState::new();
        input.key_down(KeyCode::Space);
        assert!(map.is_held(Control::SkipFade, &input));
        assert!(!map.is_pressed(Control::ToggleDebug, &input));
        input.key_down(KeyCode::F1);
        assert!(map.is_pressed(Control::ToggleDebug, &input));
    }
}
