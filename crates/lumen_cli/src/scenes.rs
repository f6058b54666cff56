//! Built-in scenes, each paired with the camera settings that frame it.

use lumen_math::random::{gen_f64, gen_range, random_vec, random_vec_range};
use lumen_renderer::{
    CameraConfig, Color, Dielectric, HittableList, Lambertian, MaterialArena, Metal, Point3,
    RenderResult, Scene, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::SceneChoice;

/// Build the chosen scene. `seed` drives any random placement.
pub fn build(choice: SceneChoice, seed: u64) -> RenderResult<(Scene, CameraConfig)> {
    match choice {
        SceneChoice::BouncingSpheres => bouncing_spheres(seed),
        SceneChoice::ThreeSpheres => three_spheres(),
        SceneChoice::SingleSphere => single_sphere(),
    }
}

fn bouncing_spheres(seed: u64) -> RenderResult<(Scene, CameraConfig)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut materials = MaterialArena::new();
    let mut world = HittableList::new();

    let ground = materials.add(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    world.add(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f64(&mut rng);
            let center = Point3::new(
                a as f64 + 0.9 * gen_f64(&mut rng),
                0.2,
                b as f64 + 0.9 * gen_f64(&mut rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse, bouncing upward during the shutter
                let albedo = random_vec(&mut rng) * random_vec(&mut rng);
                let material = materials.add(Lambertian::new(albedo));
                let center2 = center + Vec3::new(0.0, gen_range(&mut rng, 0.0, 0.5), 0.0);
                world.add(Sphere::moving(center, center2, 0.2, material));
            } else if choose_mat < 0.95 {
                let albedo = random_vec_range(&mut rng, 0.5, 1.0);
                let fuzz = gen_range(&mut rng, 0.0, 0.5);
                let material = materials.add(Metal::new(albedo, fuzz));
                world.add(Sphere::new(center, 0.2, material));
            } else {
                let material = materials.add(Dielectric::new(1.5));
                world.add(Sphere::new(center, 0.2, material));
            }
        }
    }

    let glass = materials.add(Dielectric::new(1.5));
    world.add(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass));

    let matte = materials.add(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    world.add(Sphere::new(Point3::new(-4.0, 1.0, 0.0), 1.0, matte));

    let mirror = materials.add(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
    world.add(Sphere::new(Point3::new(4.0, 1.0, 0.0), 1.0, mirror));

    log::info!(
        "Bouncing spheres: {} objects, {} materials",
        world.len(),
        materials.len()
    );

    let camera = CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        look_from: Point3::new(13.0, 2.0, 3.0),
        look_at: Point3::ZERO,
        vup: Vec3::Y,
        defocus_angle: 0.6,
        focus_dist: 10.0,
        seed,
    };

    Ok((Scene::with_bvh(world, materials)?, camera))
}

fn three_spheres() -> RenderResult<(Scene, CameraConfig)> {
    let mut materials = MaterialArena::new();
    let ground = materials.add(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center = materials.add(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass = materials.add(Dielectric::new(1.5));
    let bubble = materials.add(Dielectric::new(1.0 / 1.5));
    let metal = materials.add(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

    let mut world = HittableList::new();
    world.add(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground));
    world.add(Sphere::new(Point3::new(0.0, 0.0, -1.2), 0.5, center));
    world.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, glass));
    world.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.4, bubble));
    world.add(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, metal));

    let camera = CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        look_from: Point3::new(-2.0, 2.0, 1.0),
        look_at: Point3::new(0.0, 0.0, -1.0),
        vup: Vec3::Y,
        defocus_angle: 10.0,
        focus_dist: 3.4,
        ..CameraConfig::default()
    };

    Ok((Scene::with_bvh(world, materials)?, camera))
}

fn single_sphere() -> RenderResult<(Scene, CameraConfig)> {
    let mut materials = MaterialArena::new();
    let grey = materials.add(Lambertian::new(Color::new(0.5, 0.5, 0.5)));

    let mut world = HittableList::new();
    world.add(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, grey));

    let camera = CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        ..CameraConfig::default()
    };

    Ok((Scene::new(world, materials)?, camera))
}
