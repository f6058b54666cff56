//! A frozen scene: root primitive plus the materials it references.

use std::time::Instant;

use crate::{BvhNode, Hittable, HittableList, MaterialArena, Primitive, RenderError, RenderResult};

/// Immutable scene graph shared read-only by every render worker.
pub struct Scene {
    world: Primitive,
    materials: MaterialArena,
}

impl Scene {
    /// Freeze a scene, checking that every material handle resolves.
    pub fn new(world: impl Into<Primitive>, materials: MaterialArena) -> RenderResult<Self> {
        let world = world.into();

        let mut referenced = Vec::new();
        world.collect_materials(&mut referenced);
        if let Some(missing) = referenced
            .into_iter()
            .find(|id| materials.try_get(*id).is_none())
        {
            return Err(RenderError::UnknownMaterial(missing.index()));
        }

        Ok(Self { world, materials })
    }

    /// Wrap the list's members in a BVH and freeze the result.
    pub fn with_bvh(list: HittableList, materials: MaterialArena) -> RenderResult<Self> {
        let start = Instant::now();
        let bvh = BvhNode::from_list(&list);
        log::info!(
            "Built BVH over {} objects (depth {}) in {:?}",
            list.len(),
            bvh.depth(),
            start.elapsed()
        );
        Self::new(bvh, materials)
    }

    pub fn world(&self) -> &Primitive {
        &self.world
    }

    pub fn materials(&self) -> &MaterialArena {
        &self.materials
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("bbox", &self.world.bounding_box())
            .field("materials", &self.materials.len())
            .finish()
    }
}
