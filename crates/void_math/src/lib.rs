//! # void_math - Math Primitives
//!
//! Small, copyable math types used by the simulation: planar and spatial
//! vectors, rotation quaternions, transforms and RGB colours.
//!
//! The ground plane is X/Z with Y up. Spatial queries work on [`Vec3::xz`].

pub mod vector;
pub mod quaternion;
pub mod transform;
pub mod color;

pub use vector::*;
pub use quaternion::*;
pub use transform::*;
pub use color::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const FRAC_PI_2: f32 = PI / 2.0;
    pub const FRAC_PI_3: f32 = PI / 3.0;
    pub const FRAC_PI_4: f32 = PI / 4.0;
    pub const FRAC_PI_6: f32 = PI / 6.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp value between min and max
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min { min }
    else if value > max { max }
    else { value }
}

/// Frame-rate independent smoothing factor: `1 - base^dt`
#[inline]
pub fn damp_factor(base: f32, dt: f32) -> f32 {
    1.0 - base.powf(dt)
}

pub mod prelude {
    pub use crate::vector::{Vec2, Vec3};
    pub use crate::quaternion::Quat;
    pub use crate::transform::Transform;
    pub use crate::color::Color;
    pub use crate::{radians, lerp, clamp, damp_factor};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_and_clamp() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(clamp(12.0, 5.0, 10.0), 10.0);
        assert_eq!(clamp(2.0, 5.0, 10.0), 5.0);
    }

    #[test]
    fn test_damp_factor_bounds() {
        assert_eq!(damp_factor(0.001, 0.0), 0.0);
        let f = damp_factor(0.001, 1.0 / 30.0);
        assert!(f > 0.0 && f < 1.0);
    }
}
