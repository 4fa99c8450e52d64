// =============================================================================
// GEOMETRY.RS — Rectangles, anchors and interpolation
//
// Small value types shared by cameras, the render surface and backgrounds:
// - RectF: axis-aligned float rectangle (camera bounds, source regions)
// - Anchor: named reference point used to derive a drawing origin
// - Interpolation: linear / smooth-step blending of scalars, vectors, colors
// =============================================================================

use glam::Vec2;
use serde::Deserialize;

use crate::renderer::Color;

/// Linear interpolation `a + (b - a) * t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smooth step between `a` and `b`; `t` is clamped to `[0, 1]`.
#[inline]
pub fn smooth_step(a: f32, b: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    lerp(a, b, t * t * (3.0 - 2.0 * t))
}

// =============================================================================
// RECTF
// =============================================================================

/// Axis-aligned rectangle with a top-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    #[inline] pub fn left(&self) -> f32 { self.x }
    #[inline] pub fn top(&self) -> f32 { self.y }
    #[inline] pub fn right(&self) -> f32 { self.x + self.width }
    #[inline] pub fn bottom(&self) -> f32 { self.y + self.height }

    pub fn min(&self) -> Vec2 { Vec2::new(self.x, self.y) }
    pub fn size(&self) -> Vec2 { Vec2::new(self.width, self.height) }
    pub fn center(&self) -> Vec2 { self.min() + self.size() * 0.5 }

    /// Grow the rectangle by `dx` on the left and right and by `dy` on the
    /// top and bottom.  Negative amounts shrink it, and may leave a negative
    /// width or height when the inset exceeds the size.
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x - dx, self.y - dy, self.width + 2.0 * dx, self.height + 2.0 * dy)
    }

    /// Inclusive containment test.  Always false on a degenerate axis.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Nearest point of the rectangle to `p`.
    ///
    /// A degenerate axis (negative extent) collapses to its midpoint, so the
    /// projection never faults when a camera is wider than its bounds.
    pub fn project_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp_axis(p.x, self.left(), self.right()),
            clamp_axis(p.y, self.top(), self.bottom()),
        )
    }
}

fn clamp_axis(v: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return (min + max) * 0.5;
    }
    v.clamp(min, max)
}

// =============================================================================
// ANCHOR
// =============================================================================

/// Named reference point on an object, used to compute a drawing origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Fractional position of the anchor inside a unit square.
    pub fn fraction(self) -> Vec2 {
        let (fx, fy) = match self {
            Anchor::TopLeft      => (0.0, 0.0),
            Anchor::TopCenter    => (0.5, 0.0),
            Anchor::TopRight     => (1.0, 0.0),
            Anchor::CenterLeft   => (0.0, 0.5),
            Anchor::Center       => (0.5, 0.5),
            Anchor::CenterRight  => (1.0, 0.5),
            Anchor::BottomLeft   => (0.0, 1.0),
            Anchor::BottomCenter => (0.5, 1.0),
            Anchor::BottomRight  => (1.0, 1.0),
        };
        Vec2::new(fx, fy)
    }

    /// Origin offset of this anchor for an object of size `dimensions`.
    pub fn origin(self, dimensions: Vec2) -> Vec2 {
        self.fraction() * dimensions
    }
}

// =============================================================================
// INTERPOLATION
// =============================================================================

/// Blending curve between two values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    SmoothStep,
}

impl Interpolation {
    pub fn scalar(self, a: f32, b: f32, t: f32) -> f32 {
        match self {
            Interpolation::Linear => lerp(a, b, t),
            Interpolation::SmoothStep => smooth_step(a, b, t),
        }
    }

    pub fn vec2(self, a: Vec2, b: Vec2, t: f32) -> Vec2 {
        Vec2::new(self.scalar(a.x, b.x, t), self.scalar(a.y, b.y, t))
    }

    pub fn color(self, a: Color, b: Color, t: f32) -> Color {
        let [ar, ag, ab, aa] = a.0;
        let [br, bg, bb, ba] = b.0;
        Color([
            self.scalar(ar, br, t),
            self.scalar(ag, bg, t),
            self.scalar(ab, bb, t),
            self.scalar(aa, ba, t),
        ])
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflate_negative_insets_every_edge() {
        let r = RectF::new(0.0, 0.0, 100.0, 50.0).inflate(-10.0, -5.0);
        assert_eq!(r, RectF::new(10.0, 5.0, 80.0, 40.0));
    }

    #[test]
    fn project_point_inside_is_unchanged() {
        let r = RectF::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.project_point(Vec2::new(3.0, 7.0)), Vec2::new(3.0, 7.0));
    }

    #[test]
    fn project_point_outside_hits_nearest_edge() {
        let r = RectF::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.project_point(Vec2::new(-4.0, 20.0)), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn project_point_degenerate_axis_collapses_to_midpoint() {
        // 4 wide, inset by 3 on each side → left = 3, right = 1.
        let r = RectF::new(0.0, 0.0, 4.0, 10.0).inflate(-3.0, 0.0);
        let p = r.project_point(Vec2::new(100.0, 5.0));
        assert_eq!(p, Vec2::new(2.0, 5.0));
    }

    #[test]
    fn anchor_origins() {
        let d = Vec2::new(20.0, 10.0);
        assert_eq!(Anchor::TopLeft.origin(d), Vec2::ZERO);
        assert_eq!(Anchor::Center.origin(d), Vec2::new(10.0, 5.0));
        assert_eq!(Anchor::BottomLeft.origin(d), Vec2::new(0.0, 10.0));
        assert_eq!(Anchor::BottomRight.origin(d), d);
    }

    #[test]
    fn smooth_step_hits_endpoints_and_midpoint() {
        assert_eq!(smooth_step(0.0, 10.0, 0.0), 0.0);
        assert_eq!(smooth_step(0.0, 10.0, 1.0), 10.0);
        assert!((smooth_step(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
        assert_eq!(smooth_step(0.0, 10.0, 2.0), 10.0);
    }

    #[test]
    fn interpolate_color_componentwise() {
        let c = Interpolation::Linear.color(Color::BLACK, Color::WHITE, 0.25);
        assert_eq!(c.0, [0.25, 0.25, 0.25, 1.0]);
    }
}
