//! Static pick-collider management with Rapier3D.

use glam::Vec3;
use rapier3d::prelude::*;

/// Collider set + query pipeline over the static parcel boxes.
///
/// Rebuilt only when the parcel layout changes (it does not, after
/// startup); per-frame work is queries only.
pub struct PickingWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub query_pipeline: QueryPipeline,
}

impl Default for PickingWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PickingWorld {
    /// Create an empty picking world.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Add a fixed cuboid pick target. `index` is the parcel's arena index,
    /// recovered on hit via the collider's `user_data`.
    pub fn add_parcel_box(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        index: usize,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![center.x, center.y, center.z])
            .user_data(index as u128)
            .build();
        self.collider_set.insert(collider)
    }

    /// Refresh the query pipeline after collider mutations. Must be called
    /// once after the grid is registered, before the first query.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Number of registered pick targets.
    pub fn len(&self) -> usize {
        self.collider_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collider_set.len() == 0
    }
}
