//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Gamma correction
//! - Anti-aliasing via multi-sampling
//! - Row-parallel rendering with per-pixel random streams

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use crate::{Camera, Color, Hittable, Ray, RenderResult, Scene};
use lumen_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Nearest t accepted for a hit; keeps scattered rays off their own surface.
const T_MIN: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in each attenuation.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded the ray bounce limit, no more light is gathered.
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.world().hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    match scene.materials().get(rec.material).scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, scene, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Background radiance: white at the horizon blending to sky blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to display bytes.
///
/// Gamma corrects, clamps each channel to [0, 0.999] and scales into
/// [0, 255].
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval::new(0.000, 0.999);
    let to_byte = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Seed for the random stream of pixel (x, y).
///
/// splitmix64 of the camera seed mixed with the pixel's row-major index,
/// so output depends only on the seed, never on thread scheduling.
pub fn pixel_seed(seed: u64, x: u32, y: u32, width: u32) -> u64 {
    let index = y as u64 * width as u64 + x as u64;
    let mut z = (seed ^ index).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Average `samples_per_pixel` samples of pixel (x, y) drawn from `rng`.
pub fn sample_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, scene, camera.max_depth(), rng);
    }

    pixel_color * camera.samples_scale()
}

/// Render a single pixel with its own deterministic random stream.
pub fn render_pixel(camera: &Camera, scene: &Scene, x: u32, y: u32) -> Color {
    let seed = pixel_seed(camera.seed(), x, y, camera.image_width());
    let mut rng = StdRng::seed_from_u64(seed);
    sample_pixel(camera, scene, x, y, &mut rng)
}

/// Linear-light render target, row-major from the top-left pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Mutable rows, top to bottom, for parallel fill.
    pub fn rows_mut(&mut self) -> impl IndexedParallelIterator<Item = &mut [Color]> {
        self.pixels.par_chunks_mut(self.width.max(1) as usize)
    }

    /// Gamma-corrected 8-bit RGB triples in row-major order.
    pub fn to_rgb(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().map(|c| color_to_rgb(*c)).collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene in parallel.
///
/// Validates the camera settings and re-derives its viewport first.
pub fn render(camera: &mut Camera, scene: &Scene) -> RenderResult<ImageBuffer> {
    render_with_progress(camera, scene, &|_| {})
}

/// Render in parallel, reporting the number of rows still outstanding
/// each time a row finishes. Rows may complete in any order.
pub fn render_with_progress(
    camera: &mut Camera,
    scene: &Scene,
    progress: &(dyn Fn(u32) + Sync),
) -> RenderResult<ImageBuffer> {
    camera.config().validate()?;
    camera.initialize();

    let camera = &*camera;
    let (width, height) = (camera.image_width(), camera.image_height());
    let mut image = ImageBuffer::new(width, height);
    let rows_done = AtomicU32::new(0);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth()
    );
    let start = Instant::now();

    image.rows_mut().enumerate().for_each(|(y, row)| {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = render_pixel(camera, scene, x as u32, y as u32);
        }
        let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
        progress(height - done);
    });

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

/// Render on the calling thread, top row first.
///
/// Produces exactly the same image as [`render`].
pub fn render_sequential(camera: &mut Camera, scene: &Scene) -> RenderResult<ImageBuffer> {
    camera.config().validate()?;
    camera.initialize();

    let mut image = ImageBuffer::new(camera.image_width(), camera.image_height());
    for y in 0..image.height {
        for x in 0..image.width {
            let color = render_pixel(camera, scene, x, y);
            image.set(x, y, color);
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Lambertian, MaterialArena, Sphere};
    use lumen_math::{Point3, Vec3};

    fn one_sphere_scene() -> Scene {
        let mut materials = MaterialArena::new();
        let grey = materials.add(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
        let mut list = HittableList::new();
        list.add(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, grey));
        Scene::with_bvh(list, materials).unwrap()
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        let down = sky_gradient(&Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0)));

        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-12);
        assert!((down - Color::ONE).length() < 1e-12);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::splat(4.0)), [255, 255, 255]);
        // 0.25 -> gamma 0.5 -> 128
        assert_eq!(color_to_rgb(Color::new(0.25, -0.5, 0.0)), [128, 0, 0]);
    }

    #[test]
    fn test_depth_zero_is_black() {
        let scene = one_sphere_scene();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(ray_color(&ray, &scene, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_sky() {
        let scene = one_sphere_scene();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(ray_color(&ray, &scene, 5, &mut rng), sky_gradient(&ray));
    }

    #[test]
    fn test_single_bounce_hit_is_black() {
        // One bounce allowed: the scattered ray has no budget left
        let scene = one_sphere_scene();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(ray_color(&ray, &scene, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let scene = one_sphere_scene();
        let mut camera = Camera::new().with_resolution(11, 1.0).with_quality(8, 5);
        camera.initialize();

        let center = render_pixel(&camera, &scene, 5, 5);
        let corner = render_pixel(&camera, &scene, 0, 0);

        // Grey diffuse sphere absorbs at least half per bounce
        assert!(center.max_element() <= 0.5 + 1e-12);
        assert!(center.length() > 0.0);
        // Corner misses the sphere and sees sky
        assert!(corner.min_element() >= 0.5);
    }

    #[test]
    fn test_pixel_seed_distinct() {
        let a = pixel_seed(0, 0, 0, 10);
        let b = pixel_seed(0, 1, 0, 10);
        let c = pixel_seed(0, 0, 1, 10);
        let d = pixel_seed(1, 0, 0, 10);

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_ne!(a, d);
        assert_eq!(a, pixel_seed(0, 0, 0, 10));
    }

    #[test]
    fn test_image_buffer_placement() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::ONE);

        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.pixels[5], Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_progress_counts_down_every_row() {
        let scene = one_sphere_scene();
        let mut camera = Camera::new().with_resolution(4, 0.5).with_quality(1, 2);

        let reports = std::sync::Mutex::new(Vec::new());
        let image = render_with_progress(&mut camera, &scene, &|remaining| {
            reports.lock().unwrap().push(remaining);
        })
        .unwrap();

        assert_eq!(image.height, 8);
        let mut reports = reports.into_inner().unwrap();
        reports.sort_unstable();
        assert_eq!(reports, (0..8).collect::<Vec<u32>>());
    }
}
