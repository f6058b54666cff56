//! Vector helpers that glam does not provide.

use glam::DVec3;

/// Per-axis threshold below which a vector counts as degenerate.
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Extra operations on [`DVec3`] used by the scattering code.
pub trait Vec3Ext {
    /// True if the vector is close to zero in all dimensions.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for DVec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }
}

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of the incident to the transmitted
/// refractive index.
#[inline]
pub fn refract(uv: DVec3, n: DVec3, etai_over_etat: f64) -> DVec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(DVec3::ZERO.near_zero());
        assert!(DVec3::splat(1e-9).near_zero());
        assert!(!DVec3::new(1e-9, 1e-7, 0.0).near_zero());
    }

    #[test]
    fn test_reflect() {
        let v = DVec3::new(1.0, -1.0, 0.0);
        let r = reflect(v, DVec3::Y);
        assert_eq!(r, DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_identity_index() {
        // With matching indices the ray passes straight through.
        let uv = DVec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(uv, DVec3::Y, 1.0);
        assert!((r - uv).length() < 1e-12);
    }

    #[test]
    fn test_refract_bends_towards_normal() {
        let uv = DVec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(uv, DVec3::Y, 1.0 / 1.5);
        assert!((r.length() - 1.0).abs() < 1e-9);
        // Entering a denser medium bends the ray closer to -normal
        assert!(r.x < uv.x);
        assert!(r.y < 0.0);
    }

    #[test]
    fn test_degrees_to_radians() {
        assert!((degrees_to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(degrees_to_radians(0.0), 0.0);
    }
}
