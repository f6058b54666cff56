//! Hittable trait, HitRecord, and the closed set of scene primitives.

use std::sync::Arc;

use crate::{BvhNode, MaterialId, Sphere};
use lumen_math::{Aabb, Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Point3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Material at the intersection point
    pub material: MaterialId,
    /// Surface coordinates for texture lookup
    pub u: f64,
    pub v: f64,
    normal: Vec3,
    front_face: bool,
}

impl HitRecord {
    /// Build a record for a hit at parameter `t`.
    ///
    /// `outward_normal` must be unit length. The stored normal is flipped
    /// to point against the ray, and `front_face` records whether that
    /// flip was needed.
    pub fn new(
        ray: &Ray,
        t: f64,
        outward_normal: Vec3,
        material: MaterialId,
        (u, v): (f64, f64),
    ) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            t,
            material,
            u,
            v,
            normal,
            front_face,
        }
    }

    /// Unit surface normal, always opposing the incoming ray.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Whether the ray struck the outside of the surface.
    #[inline]
    pub fn front_face(&self) -> bool {
        self.front_face
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection whose t lies strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// Every kind of object a scene can hold.
///
/// A closed set dispatched by `match`; aggregates nest through [`Arc`] so a
/// BVH can share a child between both of its slots.
pub enum Primitive {
    Sphere(Sphere),
    List(HittableList),
    Bvh(BvhNode),
}

impl Primitive {
    /// Append every material handle referenced below this primitive.
    pub fn collect_materials(&self, out: &mut Vec<MaterialId>) {
        match self {
            Primitive::Sphere(sphere) => out.push(sphere.material()),
            Primitive::List(list) => {
                for object in list.objects() {
                    object.collect_materials(out);
                }
            }
            Primitive::Bvh(node) => {
                let (left, right) = node.children();
                left.collect_materials(out);
                if !Arc::ptr_eq(left, right) {
                    right.collect_materials(out);
                }
            }
        }
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
            Primitive::List(list) => list.hit(ray, ray_t),
            Primitive::Bvh(node) => node.hit(ray, ray_t),
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            Primitive::Sphere(sphere) => sphere.bounding_box(),
            Primitive::List(list) => list.bounding_box(),
            Primitive::Bvh(node) => node.bounding_box(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<HittableList> for Primitive {
    fn from(list: HittableList) -> Self {
        Primitive::List(list)
    }
}

impl From<BvhNode> for Primitive {
    fn from(node: BvhNode) -> Self {
        Primitive::Bvh(node)
    }
}

/// A list of hittable objects.
///
/// The bounding box is grown on every insertion; there is no removal.
pub struct HittableList {
    objects: Vec<Arc<Primitive>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        self.add_shared(Arc::new(object.into()));
    }

    /// Add an object that may also be referenced elsewhere.
    pub fn add_shared(&mut self, object: Arc<Primitive>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[Arc<Primitive>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
