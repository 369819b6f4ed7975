use super::{Point2, Vector2, TOLERANCE};

/// Returns the Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance(a, b)
}

/// Returns the point halfway between `a` and `b`.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}

/// Returns the unit vector pointing along `v`.
///
/// A zero-length input yields the zero vector instead of dividing by zero.
#[must_use]
pub fn normalize(v: &Vector2) -> Vector2 {
    let len = v.norm();
    if len < TOLERANCE {
        return Vector2::zeros();
    }
    v / len
}

/// Returns the left-pointing unit normal of the segment `a → b`.
///
/// Degenerate segments yield the zero vector.
#[must_use]
pub fn normal(a: &Point2, b: &Point2) -> Vector2 {
    let dir = normalize(&(b - a));
    Vector2::new(-dir.y, dir.x)
}

/// Rotates `v` counter-clockwise by `degrees` about the origin.
#[must_use]
pub fn rotate_deg(v: &Vector2, degrees: f64) -> Vector2 {
    let (s, c) = degrees.to_radians().sin_cos();
    Vector2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Wraps an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}
