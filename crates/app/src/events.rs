//! Window event handling for AppState.
//! Keeps the event loop plumbing and key bindings in one place.

use crate::state::ActivePanel;
use crate::AppState;
use glam::Vec2;
use input::{ElementState, KeyCode, MouseButton};
use winit::event::{MouseScrollDelta, WindowEvent};

impl AppState {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);
                    if event.state.is_pressed() {
                        self.handle_key(key);
                    }
                }
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y));
                self.gestures.on_move(self.input.cursor_position());
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state);
                if button == MouseButton::Left {
                    let now = self.time.elapsed_seconds();
                    match state {
                        ElementState::Pressed => {
                            self.gestures.on_press(self.input.cursor_position(), now)
                        }
                        ElementState::Released => self.gestures.on_release(now),
                    }
                }
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                };
                self.gestures.on_wheel(steps);
                false
            }
            WindowEvent::Touch(touch) => {
                let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                self.gestures
                    .on_touch(touch.id, touch.phase, position, self.time.elapsed_seconds());
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = crate::render::run(self) {
                    log::error!("Render error: {}", e);
                }
                self.renderer.window.request_redraw();
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Escape => {
                // Close the topmost surface; quit only from the bare view.
                if self.ui.selected_parcel.take().is_some() {
                } else if self.ui.panel != ActivePanel::None {
                    self.ui.panel = ActivePanel::None;
                } else {
                    self.running = false;
                }
            }
            KeyCode::KeyF => {
                self.ui.filter = self.ui.filter.next();
                log::debug!("Filter: {}", self.ui.filter.label());
            }
            KeyCode::KeyM => self.ui.toggle_panel(ActivePanel::Missions),
            KeyCode::KeyT => self.ui.toggle_panel(ActivePanel::Transactions),
            KeyCode::ArrowUp => {
                if self.ui.panel == ActivePanel::Missions {
                    self.ui.mission_cursor = self.ui.mission_cursor.saturating_sub(1);
                }
            }
            KeyCode::ArrowDown => {
                if self.ui.panel == ActivePanel::Missions {
                    let last = self.store.missions.len().saturating_sub(1);
                    self.ui.mission_cursor = (self.ui.mission_cursor + 1).min(last);
                }
            }
            KeyCode::Enter | KeyCode::NumpadEnter => {
                if self.ui.panel == ActivePanel::Missions {
                    if let Some(id) = self.store.missions.get(self.ui.mission_cursor).map(|m| m.id)
                    {
                        self.store.claim_mission(id);
                    }
                } else if let Some(index) = self.ui.selected_parcel {
                    self.store.purchase(index, self.time.elapsed_seconds());
                }
            }
            _ => {}
        }
    }
}
