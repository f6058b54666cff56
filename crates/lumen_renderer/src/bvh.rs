//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree of bounding boxes built once over a fixed set of
//! primitives. Each node splits its span on the longest axis of the span's
//! box, ordering children by the low end of their boxes on that axis.

use std::sync::Arc;

use crate::{HitRecord, Hittable, HittableList, Primitive};
use lumen_math::{Aabb, Interval, Ray};

/// BVH node with exactly two children.
///
/// A span of one primitive stores it in both slots; the second test is
/// wasted work but keeps every node uniform.
pub struct BvhNode {
    left: Arc<Primitive>,
    right: Arc<Primitive>,
    bbox: Aabb,
}

impl BvhNode {
    /// Create a BVH over owned primitives.
    pub fn new(objects: Vec<Primitive>) -> Self {
        let mut shared: Vec<Arc<Primitive>> = objects.into_iter().map(Arc::new).collect();
        Self::from_shared(&mut shared)
    }

    /// Create a BVH over the members of a list. The list itself is left
    /// untouched; only the shared handles are copied.
    pub fn from_list(list: &HittableList) -> Self {
        let mut shared = list.objects().to_vec();
        Self::from_shared(&mut shared)
    }

    fn from_shared(objects: &mut [Arc<Primitive>]) -> Self {
        if objects.is_empty() {
            log::warn!("Building BVH over an empty object set");
            let empty = Arc::new(Primitive::List(HittableList::new()));
            return Self {
                left: Arc::clone(&empty),
                right: empty,
                bbox: Aabb::EMPTY,
            };
        }
        Self::build(objects)
    }

    /// Recursive construction over a non-empty span, sorted in place.
    fn build(objects: &mut [Arc<Primitive>]) -> Self {
        let bbox = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, &o.bounding_box()));

        let axis = bbox.longest_axis();

        let (left, right) = match objects.len() {
            1 => (Arc::clone(&objects[0]), Arc::clone(&objects[0])),
            2 => (Arc::clone(&objects[0]), Arc::clone(&objects[1])),
            n => {
                objects.sort_by(|a, b| {
                    let a_min = a.bounding_box().axis_interval(axis).min;
                    let b_min = b.bounding_box().axis_interval(axis).min;
                    a_min.total_cmp(&b_min)
                });

                let (lower, upper) = objects.split_at_mut(n / 2);
                (
                    Arc::new(Primitive::Bvh(Self::build(lower))),
                    Arc::new(Primitive::Bvh(Self::build(upper))),
                )
            }
        };

        Self { left, right, bbox }
    }

    pub fn children(&self) -> (&Arc<Primitive>, &Arc<Primitive>) {
        (&self.left, &self.right)
    }

    /// Number of levels from this node down to the deepest leaf.
    pub fn depth(&self) -> usize {
        let child_depth = |child: &Primitive| match child {
            Primitive::Bvh(node) => node.depth(),
            _ => 0,
        };
        1 + child_depth(&self.left).max(child_depth(&self.right))
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let hit_left = self.left.hit(ray, ray_t);

        // Only check right up to closest hit
        let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
        let hit_right = self.right.hit(ray, Interval::new(ray_t.min, right_max));

        hit_right.or(hit_left)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaterialId, Sphere};
    use lumen_math::{Point3, Vec3};

    const T_RANGE: Interval = Interval::new(0.001, f64::INFINITY);

    fn sphere_at(x: f64, material: usize) -> Primitive {
        Sphere::new(Point3::new(x, 0.0, -5.0), 0.5, MaterialId::from_index(material)).into()
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BvhNode::new(vec![]);
        let ray = Ray::new_simple(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(bvh.bounding_box(), Aabb::EMPTY);
        assert!(bvh.hit(&ray, T_RANGE).is_none());
    }

    #[test]
    fn test_bvh_single_sphere_aliases_children() {
        let bvh = BvhNode::new(vec![sphere_at(0.0, 0)]);
        let (left, right) = bvh.children();
        assert!(Arc::ptr_eq(left, right));

        let ray = Ray::new_simple(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = bvh.hit(&ray, T_RANGE).unwrap();
        assert!((rec.t - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_bvh_two_spheres_are_direct_children() {
        let bvh = BvhNode::new(vec![sphere_at(0.0, 0), sphere_at(3.0, 1)]);
        let (left, right) = bvh.children();

        assert!(matches!(**left, Primitive::Sphere(_)));
        assert!(matches!(**right, Primitive::Sphere(_)));
        assert_eq!(bvh.depth(), 1);
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let spheres: Vec<Primitive> = (0..10).map(|i| sphere_at(i as f64, i)).collect();
        let bvh = BvhNode::new(spheres);

        // Ray that hits sphere at x=5
        let ray = Ray::new_simple(Point3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = bvh.hit(&ray, T_RANGE).unwrap();

        assert!((rec.p.z - (-4.5)).abs() < 1e-9);
        assert_eq!(rec.material, MaterialId::from_index(5));
        assert!(bvh.depth() <= 4);
    }

    #[test]
    fn test_bvh_prefers_nearer_right_child() {
        // Sorted on z: the nearer sphere ends up in the right half
        let objects = vec![
            Sphere::new(Point3::new(0.0, 0.0, -20.0), 1.0, MaterialId::from_index(0)).into(),
            Sphere::new(Point3::new(0.0, 0.0, -15.0), 1.0, MaterialId::from_index(1)).into(),
            Sphere::new(Point3::new(0.0, 0.0, -10.0), 1.0, MaterialId::from_index(2)).into(),
            Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0, MaterialId::from_index(3)).into(),
        ];
        let bvh = BvhNode::new(objects);

        let ray = Ray::new_simple(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = bvh.hit(&ray, T_RANGE).unwrap();
        assert_eq!(rec.material, MaterialId::from_index(3));
        assert!((rec.t - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_bvh_from_list_keeps_list() {
        let mut list = HittableList::new();
        list.add(sphere_at(0.0, 0));
        list.add(sphere_at(2.0, 1));
        list.add(sphere_at(4.0, 2));

        let bvh = BvhNode::from_list(&list);
        assert_eq!(list.len(), 3);
        assert_eq!(bvh.bounding_box(), list.bounding_box());
    }
}
