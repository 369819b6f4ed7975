pub mod camera;
pub mod vector_2d;

pub use camera::Camera;
pub use vector_2d::{distance, midpoint, normal, normalize, normalize_degrees, rotate_deg};

/// 2D point type, in millimetres of world space.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
