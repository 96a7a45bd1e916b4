//! Raycasting for parcel selection and hover queries.

use crate::PickingWorld;
use glam::{Mat4, Vec2, Vec3};
use rapier3d::prelude::*;

/// Result of a pick query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Arena index of the picked parcel.
    pub index: usize,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
}

impl PickingWorld {
    /// Cast a ray and return the nearest parcel hit, if any.
    pub fn pick(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<PickHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        let filter = QueryFilter::default();

        self.query_pipeline
            .cast_ray(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(collider, toi)| {
                let point = ray.point_at(toi);
                PickHit {
                    index: self.collider_set[collider].user_data as usize,
                    distance: toi,
                    point: Vec3::new(point.x, point.y, point.z),
                }
            })
    }

    /// Pick with a screen-space pointer: unprojects `pointer` (window px)
    /// through `inv_view_proj` and casts into the scene.
    pub fn pick_at_pointer(
        &self,
        pointer: Vec2,
        viewport: Vec2,
        inv_view_proj: Mat4,
        max_distance: f32,
    ) -> Option<PickHit> {
        let (origin, direction) = screen_ray(pointer, viewport, inv_view_proj)?;
        self.pick(origin, direction, max_distance)
    }
}

/// Build a world-space ray from a pointer position.
///
/// `pointer` is in window pixels (origin top-left), `viewport` the window
/// size in pixels. Returns `None` for a degenerate viewport or a
/// non-invertible unprojection (W ~ 0).
pub fn screen_ray(pointer: Vec2, viewport: Vec2, inv_view_proj: Mat4) -> Option<(Vec3, Vec3)> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }

    // Window px -> normalized device coordinates (y up).
    let ndc = Vec2::new(
        (pointer.x / viewport.x) * 2.0 - 1.0,
        -((pointer.y / viewport.y) * 2.0 - 1.0),
    );

    let near = inv_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
    let far = inv_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
    let direction = far - near;
    if !direction.is_finite() || direction.length_squared() < 1e-12 {
        return None;
    }
    Some((near, direction.normalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    /// Simple fixed camera for tests: perspective look-at, like the viewer's.
    fn view_proj(eye: Vec3, target: Vec3) -> Mat4 {
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(75f32.to_radians(), 16.0 / 9.0, 0.1, 5000.0);
        proj * view
    }

    /// Project a world point into window pixels (inverse of screen_ray's
    /// pointer mapping).
    fn project_to_pointer(world: Vec3, vp: Mat4, viewport: Vec2) -> Vec2 {
        let ndc = vp.project_point3(world);
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - (ndc.y + 1.0) * 0.5) * viewport.y,
        )
    }

    fn grid_world(cell: f32, half: Vec3) -> PickingWorld {
        // 3x3 grid of parcel boxes centered on the origin.
        let mut world = PickingWorld::new();
        let mut index = 0;
        for i in -1..=1 {
            for j in -1..=1 {
                world.add_parcel_box(
                    Vec3::new(i as f32 * cell, half.y, j as f32 * cell),
                    half,
                    index,
                );
                index += 1;
            }
        }
        world.update_query_pipeline();
        world
    }

    #[test]
    fn ray_straight_down_hits_center_parcel() {
        let world = grid_world(114.0, Vec3::new(54.0, 12.5, 54.0));
        let hit = world
            .pick(Vec3::new(0.0, 500.0, 0.0), Vec3::NEG_Y, 5000.0)
            .expect("center parcel under the ray");
        // Center parcel is index 4 in the 3x3 registration order.
        assert_eq!(hit.index, 4);
        assert!(hit.distance > 0.0 && hit.distance < 500.0);
    }

    #[test]
    fn ray_through_gap_misses() {
        let world = grid_world(114.0, Vec3::new(54.0, 12.5, 54.0));
        // x = 57 lies in the walkway between column 0 and column 1.
        let hit = world.pick(Vec3::new(57.0, 500.0, 0.0), Vec3::NEG_Y, 5000.0);
        assert!(hit.is_none());
    }

    #[test]
    fn nearest_of_stacked_targets_wins() {
        let mut world = PickingWorld::new();
        world.add_parcel_box(Vec3::new(0.0, 10.0, 0.0), Vec3::splat(5.0), 0);
        world.add_parcel_box(Vec3::new(0.0, 40.0, 0.0), Vec3::splat(5.0), 1);
        world.update_query_pipeline();
        let hit = world
            .pick(Vec3::new(0.0, 200.0, 0.0), Vec3::NEG_Y, 5000.0)
            .unwrap();
        assert_eq!(hit.index, 1, "upper box is nearer to the camera");
    }

    /// Picking the screen position a parcel center projects to returns
    /// that parcel, from an oblique camera pose.
    #[test]
    fn pointer_over_projected_center_picks_that_parcel() {
        let cell = 114.0;
        let half = Vec3::new(54.0, 12.5, 54.0);
        let world = grid_world(cell, half);
        let viewport = Vec2::new(1280.0, 720.0);
        let vp = view_proj(Vec3::new(800.0, 600.0, 800.0), Vec3::ZERO);
        let inv = vp.inverse();

        for (index, center) in [
            (0, Vec3::new(-cell, 25.0, -cell)),
            (4, Vec3::new(0.0, 25.0, 0.0)),
            (8, Vec3::new(cell, 25.0, cell)),
        ] {
            // Aim at the top face so the parcel itself cannot occlude it.
            let pointer = project_to_pointer(center, vp, viewport);
            let hit = world
                .pick_at_pointer(pointer, viewport, inv, 10_000.0)
                .unwrap_or_else(|| panic!("no hit for parcel {}", index));
            assert_eq!(hit.index, index);
        }
    }

    #[test]
    fn degenerate_viewport_yields_no_ray() {
        let inv = Mat4::IDENTITY;
        assert!(screen_ray(Vec2::new(10.0, 10.0), Vec2::ZERO, inv).is_none());
    }
}
