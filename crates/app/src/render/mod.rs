//! Rendering: scene instance building and the per-frame pass driver.

mod overlay;

use crate::{animation, filter, AppState};
use anyhow::Result;
use engine_core::Transform;
use glam::Vec3;
use renderer::{ParcelInstance, RenderError};
use worldgen::{platform_extents, PARCEL_FOOTPRINT, PARCEL_HEIGHT};

/// Run all render passes. Called from the RedrawRequested handler.
pub fn run(state: &mut AppState) -> Result<()> {
    let (output, mut encoder) = match state.renderer.begin_frame() {
        Ok(pair) => pair,
        Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
            let size = state.renderer.size;
            state.renderer.resize(size);
            return Ok(());
        }
        Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
            return Err(anyhow::anyhow!("GPU out of memory"));
        }
        Err(e) => {
            log::warn!("Skipping frame: {}", e);
            return Ok(());
        }
    };

    state.renderer.update_camera(&state.camera);
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let instances = build_instances(state);
    state.renderer.render_boxes(&mut encoder, &view, &instances);

    let (sw, sh) = state.renderer.dimensions();
    let tb = overlay::build(state, sw as f32, sh as f32);
    state
        .renderer
        .render_overlay(&mut encoder, &view, &tb.vertices, &tb.indices);

    state.renderer.end_frame(output, encoder);
    Ok(())
}

/// One box instance per island platform, then one per parcel with its
/// filter-derived material and animation offset.
fn build_instances(state: &AppState) -> Vec<ParcelInstance> {
    let time = state.time.elapsed_seconds();
    let mut instances = Vec::with_capacity(state.islands.len() + state.store.parcels.len());

    for island in &state.islands {
        let (center, size) = platform_extents(island.offset_x, island.offset_z, state.grid_size);
        instances.push(ParcelInstance::new(
            Transform::from_position_scale(center, size)
                .to_matrix()
                .to_cols_array_2d(),
            island.platform_color.to_array4(1.0),
            [0.0; 4],
        ));
    }

    let box_scale = Vec3::new(PARCEL_FOOTPRINT, PARCEL_HEIGHT, PARCEL_FOOTPRINT);
    for (index, parcel) in state.store.parcels.iter().enumerate() {
        let look = filter::appearance(parcel, state.ui.filter);
        let lift = animation::vertical_offset(index, parcel.hovered, time);
        let position = parcel.position + Vec3::Y * lift;
        instances.push(ParcelInstance::new(
            Transform::from_position_scale(position, box_scale)
                .to_matrix()
                .to_cols_array_2d(),
            look.color.to_array4(look.opacity),
            look.emissive.to_array4(0.0),
        ));
    }

    instances
}
