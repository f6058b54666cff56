//! Surface colour lookup for materials.

use lumen_math::{Color, Point3};

/// A colour source sampled at a surface point.
///
/// Only constant colours exist today; the (u, v, p) signature is what an
/// image or procedural texture would need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Texture {
    Solid(Color),
}

impl Texture {
    pub fn solid(r: f64, g: f64, b: f64) -> Self {
        Texture::Solid(Color::new(r, g, b))
    }

    /// Colour at surface coordinates (u, v) and world point p.
    pub fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        match self {
            Texture::Solid(albedo) => *albedo,
        }
    }
}

impl From<Color> for Texture {
    fn from(color: Color) -> Self {
        Texture::Solid(color)
    }
}
