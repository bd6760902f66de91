//! Polar geometry primitives
//!
//! Model space is the unit disc with the origin at the centre, x to the right
//! and y downwards (SVG orientation). Angle 0 points right and angles grow
//! clockwise on screen, so `-PI / 2` is twelve o'clock.

use std::f64::consts::{PI, TAU};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn polar(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        (len > f64::EPSILON).then(|| self.scale(1.0 / len))
    }

    /// Counter-rotated perpendicular
    pub fn perpendicular(self) -> Point {
        Point::new(-self.y, self.x)
    }
}

/// Wrap an angle into `[0, TAU)`
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed rotation from `from` to `to`, in `(-PI, PI]`
pub fn signed_angle_delta(from: f64, to: f64) -> f64 {
    let delta = normalize_angle(to - from);
    if delta > PI {
        delta - TAU
    } else {
        delta
    }
}

/// Text rotation in degrees for a label placed at `angle`, flipped on the
/// left half of the circle so it never reads upside down.
pub fn upright_rotation(angle: f64) -> f64 {
    let angle = normalize_angle(angle);
    let degrees = angle.to_degrees();
    if angle > PI / 2.0 && angle < 3.0 * PI / 2.0 {
        degrees - 180.0
    } else {
        degrees
    }
}

/// Annular sector between two angles and two radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcSpan {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl ArcSpan {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    pub fn centroid(&self) -> Point {
        Point::polar(self.mid_radius(), self.mid_angle())
    }
}

/// Cubic Bézier curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicBezier {
    pub start: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub end: Point,
}

impl CubicBezier {
    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.start.x + b * self.ctrl1.x + c * self.ctrl2.x + d * self.end.x,
            a * self.start.y + b * self.ctrl1.y + c * self.ctrl2.y + d * self.end.y,
        )
    }

    /// Direction of travel at the end point
    pub fn end_direction(&self) -> Option<Point> {
        self.end
            .sub(self.ctrl2)
            .normalized()
            .or_else(|| self.end.sub(self.ctrl1).normalized())
            .or_else(|| self.end.sub(self.start).normalized())
    }
}

/// Split `span` starting at `start` into `count` equal sub-spans separated by `gap`.
///
/// The gap shrinks to zero when it would consume the whole span.
pub fn divide_span(start: f64, span: f64, count: usize, gap: f64) -> Vec<(f64, f64)> {
    if count == 0 || span <= 0.0 {
        return Vec::new();
    }

    let gaps = (count - 1) as f64;
    let gap = if gap * gaps >= span { 0.0 } else { gap.max(0.0) };
    let each = (span - gap * gaps) / count as f64;

    (0..count)
        .map(|i| {
            let s = start + i as f64 * (each + gap);
            (s, s + each)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polar_top_is_negative_y() {
        let p = Point::polar(1.0, -PI / 2.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_angle_delta_wraps() {
        assert_relative_eq!(signed_angle_delta(0.1, 0.3), 0.2, epsilon = 1e-12);
        assert_relative_eq!(signed_angle_delta(0.3, 0.1), -0.2, epsilon = 1e-12);
        // Crossing the 0 / TAU seam takes the short way round
        assert_relative_eq!(signed_angle_delta(TAU - 0.1, 0.1), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_upright_rotation() {
        assert_relative_eq!(upright_rotation(0.0), 0.0);
        assert_relative_eq!(upright_rotation(PI), 0.0, epsilon = 1e-9);
        assert_relative_eq!(upright_rotation(-PI / 4.0), 315.0, epsilon = 1e-9);
    }

    #[test]
    fn test_divide_span_equal_parts() {
        let parts = divide_span(0.0, 1.0, 4, 0.02);
        assert_eq!(parts.len(), 4);
        let covered: f64 = parts.iter().map(|(s, e)| e - s).sum();
        assert_relative_eq!(covered, 1.0 - 3.0 * 0.02, epsilon = 1e-12);
        assert_relative_eq!(parts[3].1, 1.0, epsilon = 1e-12);
        assert!(divide_span(0.0, 1.0, 0, 0.02).is_empty());
    }

    #[test]
    fn test_divide_span_drops_oversized_gap() {
        let parts = divide_span(0.0, 0.01, 3, 0.5);
        assert_relative_eq!(parts[0].1 - parts[0].0, 0.01 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bezier_endpoints() {
        let curve = CubicBezier {
            start: Point::new(0.0, 0.0),
            ctrl1: Point::new(0.0, 1.0),
            ctrl2: Point::new(1.0, 1.0),
            end: Point::new(1.0, 0.0),
        };
        assert_eq!(curve.point_at(0.0), curve.start);
        assert_eq!(curve.point_at(1.0), curve.end);
        let dir = curve.end_direction().unwrap();
        assert_relative_eq!(dir.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(dir.y, -1.0, epsilon = 1e-12);
    }
}
