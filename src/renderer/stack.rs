use crate::camera::Camera;

/// Ordered stack of coordinate frames.  Index 0 is the floor camera, which can
/// never be popped; the last element is the active frame.
#[derive(Debug, Clone)]
pub struct CameraStack {
    cameras: Vec<Camera>,
}

impl CameraStack {
    pub fn new(floor: Camera) -> Self {
        let mut cameras = Vec::with_capacity(8);
        cameras.push(floor);
        Self { cameras }
    }

    pub fn push(&mut self, camera: Camera) {
        self.cameras.push(camera);
    }

    /// Remove and return the top camera.  Returns `None` and leaves the stack
    /// untouched when only the floor remains.
    pub fn pop(&mut self) -> Option<Camera> {
        if self.cameras.len() <= 1 {
            return None;
        }
        self.cameras.pop()
    }

    /// Pop everything above the floor.  Returns how many cameras were removed.
    pub fn unwind(&mut self) -> usize {
        let leaked = self.cameras.len() - 1;
        self.cameras.truncate(1);
        leaked
    }

    pub fn top(&self) -> &Camera {
        // Non-empty by construction.
        &self.cameras[self.cameras.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut Camera {
        let last = self.cameras.len() - 1;
        &mut self.cameras[last]
    }

    pub fn floor(&self) -> &Camera {
        &self.cameras[0]
    }

    /// Number of cameras including the floor (always ≥ 1).
    pub fn depth(&self) -> usize {
        self.cameras.len()
    }
}
