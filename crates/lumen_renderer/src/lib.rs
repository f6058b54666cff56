//! Lumen renderer - CPU path tracing.
//!
//! A unidirectional Monte Carlo path tracer over spheres, with a bounding
//! volume hierarchy for acceleration and Lambertian, metal and dielectric
//! materials. Scenes are built once, frozen into a [`Scene`], and rendered
//! in parallel by a [`Camera`].

mod bvh;
mod camera;
mod error;
mod hittable;
mod material;
mod ppm;
mod renderer;
mod scene;
mod sphere;
mod texture;

pub use bvh::BvhNode;
pub use camera::{Camera, CameraConfig};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList, Primitive};
pub use material::{
    Dielectric, Lambertian, Material, MaterialArena, MaterialId, Metal, ScatterResult,
};
pub use ppm::{save_ppm, write_ppm};
pub use renderer::{
    color_to_rgb, linear_to_gamma, pixel_seed, ray_color, render, render_pixel,
    render_sequential, render_with_progress, sample_pixel, sky_gradient, ImageBuffer,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use texture::Texture;

/// Re-export the math types from lumen_math
pub use lumen_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
