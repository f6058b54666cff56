//! Lumen math - geometric value types shared by the path tracer.
//!
//! Vectors, points and colours are all `glam::DVec3`; the aliases below
//! only document intent at the call site.

// Re-export glam for convenience
pub use glam::{dvec3, DVec3};

mod aabb;
mod interval;
pub mod random;
mod ray;
mod vec;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vec::{degrees_to_radians, reflect, refract, Vec3Ext};

/// Free vector.
pub type Vec3 = DVec3;
/// Position in world space.
pub type Point3 = DVec3;
/// Linear RGB colour, channels nominally in [0, 1].
pub type Color = DVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }
}
