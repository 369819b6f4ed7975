use serde::{Deserialize, Serialize};

use super::{Point2, Vector2};
use crate::error::ConfigError;

/// Smallest zoom factor reachable through [`Camera::zoom_at`].
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom factor reachable through [`Camera::zoom_at`].
pub const MAX_ZOOM: f64 = 10.0;

const ZOOM_INTENSITY: f64 = 0.1;

/// View transform between world millimetres and screen pixels.
///
/// `screen = world * zoom + (x, y)`. Keeping `zoom > 0` is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Horizontal screen offset of the world origin.
    pub x: f64,
    /// Vertical screen offset of the world origin.
    pub y: f64,
    /// Pixels per millimetre.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Creates a camera with the given offset and zoom.
    #[must_use]
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// Maps a world point to screen space.
    #[must_use]
    pub fn world_to_screen(&self, p: &Point2) -> Point2 {
        Point2::new(p.x * self.zoom + self.x, p.y * self.zoom + self.y)
    }

    /// Maps a screen point back to world space.
    #[must_use]
    pub fn screen_to_world(&self, p: &Point2) -> Point2 {
        Point2::new((p.x - self.x) / self.zoom, (p.y - self.y) / self.zoom)
    }

    /// Converts a screen-space length into world millimetres.
    #[must_use]
    pub fn pixels_to_world(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }

    /// Sets the zoom directly, keeping the world origin's screen position.
    ///
    /// # Errors
    ///
    /// Returns an error if `zoom` is not positive.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), ConfigError> {
        if zoom > 0.0 {
            self.zoom = zoom;
            Ok(())
        } else {
            Err(ConfigError::NotPositive {
                parameter: "zoom",
                value: zoom,
            })
        }
    }

    /// Shifts the view by a screen-space delta.
    pub fn pan(&mut self, delta: Vector2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Zooms one wheel step around `anchor` (screen space).
    ///
    /// Positive `wheel_delta` zooms out, negative zooms in. The world point
    /// under `anchor` stays under it, and the zoom is clamped to
    /// [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    pub fn zoom_at(&mut self, wheel_delta: f64, anchor: &Point2) {
        let factor = (wheel_delta.signum() * ZOOM_INTENSITY).exp();
        let new_zoom = (self.zoom / factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let world = self.screen_to_world(anchor);
        self.x = anchor.x - world.x * new_zoom;
        self.y = anchor.y - world.y * new_zoom;
        self.zoom = new_zoom;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn world_screen_round_trip() {
        let cam = Camera::new(120.0, -40.0, 2.5);
        let w = Point2::new(33.0, 71.0);
        let s = cam.world_to_screen(&w);
        assert_relative_eq!(s, Point2::new(202.5, 137.5));
        assert_relative_eq!(cam.screen_to_world(&s), w, epsilon = 1e-12);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut cam = Camera::new(10.0, 20.0, 1.0);
        let anchor = Point2::new(300.0, 200.0);
        let before = cam.screen_to_world(&anchor);
        cam.zoom_at(-1.0, &anchor);
        assert!(cam.zoom > 1.0);
        assert_relative_eq!(cam.screen_to_world(&anchor), before, epsilon = 1e-9);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::default();
        for _ in 0..100 {
            cam.zoom_at(1.0, &Point2::origin());
        }
        assert_relative_eq!(cam.zoom, MIN_ZOOM);
        for _ in 0..200 {
            cam.zoom_at(-1.0, &Point2::origin());
        }
        assert_relative_eq!(cam.zoom, MAX_ZOOM);
    }

    #[test]
    fn set_zoom_rejects_zero() {
        let mut cam = Camera::default();
        assert!(cam.set_zoom(0.0).is_err());
        assert_relative_eq!(cam.zoom, 1.0);
        cam.set_zoom(4.0).unwrap();
        assert_relative_eq!(cam.pixels_to_world(15.0), 3.75);
    }

    #[test]
    fn pixels_scale_inversely_with_zoom() {
        let cam = Camera::new(0.0, 0.0, 3.0);
        assert_relative_eq!(cam.pixels_to_world(15.0), 5.0);
    }
}
