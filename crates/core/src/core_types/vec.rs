//! Fixed-size vector aliases used throughout the crate

/// 2D float vector on the world horizontal (XZ) plane.
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D float vector in world space, Y up.
pub type Vec3 = nalgebra::Vector3<f32>;
