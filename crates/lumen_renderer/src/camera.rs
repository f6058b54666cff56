//! Camera for ray generation.

use crate::{RenderError, RenderResult};
use lumen_math::random::{gen_f64, random_in_unit_disk, sample_square};
use lumen_math::{degrees_to_radians, Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Every user-facing camera and quality setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Count of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into scene
    pub max_depth: u32,
    /// Vertical view angle (field of view) in degrees
    pub vfov: f64,
    /// Point camera is looking from
    pub look_from: Point3,
    /// Point camera is looking at
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
    /// Variation angle of rays through each pixel; 0 disables defocus blur
    pub defocus_angle: f64,
    /// Distance from camera to plane of perfect focus
    pub focus_dist: f64,
    /// Base seed for per-pixel random streams
    pub seed: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            seed: 0,
        }
    }
}

impl CameraConfig {
    /// Rendered image height, at least one row.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f64 / self.aspect_ratio) as u32).max(1)
    }

    /// Check the settings the render loop cannot cope with.
    pub fn validate(&self) -> RenderResult<()> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if self.image_width == 0 {
            return Err(RenderError::InvalidConfig("image width must be at least 1".into()));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples per pixel must be at least 1".into(),
            ));
        }
        if self.look_from == self.look_at {
            return Err(RenderError::InvalidConfig(
                "look_from and look_at must differ".into(),
            ));
        }
        // A vup along the view axis leaves no horizontal direction
        if self
            .vup
            .cross(self.look_from - self.look_at)
            .try_normalize()
            .is_none()
        {
            return Err(RenderError::InvalidConfig(format!(
                "vup {:?} must not be zero or parallel to the view direction",
                self.vup
            )));
        }
        Ok(())
    }
}

/// State derived from a [`CameraConfig`] by [`Camera::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Viewport {
    image_height: u32,
    samples_scale: f64,
    center: Point3,
    /// Location of pixel (0, 0)
    pixel00_loc: Point3,
    /// Offset to pixel to the right
    pixel_delta_u: Vec3,
    /// Offset to pixel below
    pixel_delta_v: Vec3,
    /// Camera frame basis vectors
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Viewport {
    fn from_config(config: &CameraConfig) -> Self {
        let image_height = config.image_height();
        let center = config.look_from;

        // Without defocus blur the focal plane sits on the look-at point
        let focus_dist = if config.defocus_angle > 0.0 {
            config.focus_dist
        } else {
            (config.look_from - config.look_at).length()
        };

        // Calculate viewport dimensions
        let theta = degrees_to_radians(config.vfov);
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * focus_dist;
        let viewport_width =
            viewport_height * (config.image_width as f64 / image_height as f64);

        // Calculate camera basis vectors
        let w = (config.look_from - config.look_at).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / config.image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left = center - focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = focus_dist * degrees_to_radians(config.defocus_angle / 2.0).tan();

        Self {
            image_height,
            samples_scale: 1.0 / config.samples_per_pixel as f64,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        }
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    viewport: Viewport,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::from_config(CameraConfig::default())
    }

    pub fn from_config(config: CameraConfig) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
        }
    }

    /// Set image width and aspect ratio; the height follows from both.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.config.image_width = image_width;
        self.config.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.config.samples_per_pixel = samples_per_pixel;
        self.config.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.config.look_from = look_from;
        self.config.look_at = look_at;
        self.config.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.config.vfov = vfov;
        self.config.defocus_angle = defocus_angle;
        self.config.focus_dist = focus_dist;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Mutable access to the settings. Call [`Camera::initialize`] again
    /// before generating rays.
    pub fn config_mut(&mut self) -> &mut CameraConfig {
        &mut self.config
    }

    /// Recompute the derived viewport from the current configuration.
    ///
    /// Idempotent; must be called before generating rays.
    pub fn initialize(&mut self) {
        self.viewport = Viewport::from_config(&self.config);
        log::debug!(
            "Camera initialized: {}x{}, pixel00 {:?}, du {:?}, dv {:?}",
            self.config.image_width,
            self.viewport.image_height,
            self.viewport.pixel00_loc,
            self.viewport.pixel_delta_u,
            self.viewport.pixel_delta_v
        );
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    /// Image height as of the last [`Camera::initialize`].
    pub fn image_height(&self) -> u32 {
        self.viewport.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Colour scale factor for a sum of pixel samples (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f64 {
        self.viewport.samples_scale
    }

    /// Camera frame basis (u, v, w): right, up, and backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.viewport.u, self.viewport.v, self.viewport.w)
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The ray starts at the camera center, or at a random point on the
    /// defocus disk when blur is enabled, and is aimed at a random point
    /// inside the pixel's footprint at a random shutter time.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let vp = &self.viewport;
        let offset = sample_square(rng);

        let pixel_sample = vp.pixel00_loc
            + ((i as f64) + offset.x) * vp.pixel_delta_u
            + ((j as f64) + offset.y) * vp.pixel_delta_v;

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            vp.center
        } else {
            self.defocus_disk_sample(rng)
        };

        let ray_direction = pixel_sample - ray_origin;
        let ray_time = gen_f64(rng);

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.viewport.center + p.x * self.viewport.defocus_disk_u + p.y * self.viewport.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
