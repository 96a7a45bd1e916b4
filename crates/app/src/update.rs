//! Per-frame update: gestures drive the camera and selection, the cursor
//! drives hover, and the store settles pending purchases.

use crate::AppState;
use glam::Vec2;
use input::GestureEvent;

impl AppState {
    pub(crate) fn update(&mut self) {
        self.time.update();
        let now = self.time.elapsed_seconds();
        let dt = self.time.delta_seconds();

        for event in self.gestures.drain_events() {
            match event {
                GestureEvent::Orbit { delta } => self.camera.orbit(delta),
                GestureEvent::Zoom { delta } => self.camera.zoom(delta),
                GestureEvent::Tap { position } => {
                    // A miss deselects nothing; empty space is a silent no-op.
                    if let Some(index) = self.pick_at(position) {
                        log::info!("Selected parcel {}", self.store.parcels[index].id);
                        self.ui.selected_parcel = Some(index);
                    }
                }
            }
        }

        if self.input.cursor_moved() {
            let hover = self.pick_at(self.input.cursor_position());
            self.store.set_hovered(hover);
        }

        self.store.update(now, dt);
        self.input.begin_frame();
    }

    /// Nearest parcel under a window-space pointer, if any.
    pub(crate) fn pick_at(&self, pointer: Vec2) -> Option<usize> {
        let (width, height) = self.renderer.dimensions();
        let viewport = Vec2::new(width as f32, height as f32);
        let inv_view_proj = self.camera.view_projection_matrix().inverse();
        self.picking
            .pick_at_pointer(pointer, viewport, inv_view_proj, self.camera.far)
            .map(|hit| hit.index)
    }
}
