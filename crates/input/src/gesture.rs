//! Unified gesture classification for mouse and touch.
//!
//! Every pointer kind feeds the same state machine, so tap-vs-drag
//! discrimination is identical on desktop and mobile: a press starts a
//! pending tap; crossing the slop radius turns it into a rotation drag; a
//! second touch point turns it into a pinch; releasing a still-pending
//! press quickly enough emits a tap. Rotation and pinch gestures never
//! produce a tap on release.

use glam::Vec2;
use std::collections::HashMap;
use winit::event::TouchPhase;

/// Cumulative displacement (px) beyond which a press becomes a drag.
pub const TAP_SLOP_PX: f32 = 5.0;
/// Maximum press duration (seconds) for a tap.
pub const TAP_MAX_SECS: f32 = 0.3;
/// Orbit radius change per wheel step, world units.
pub const WHEEL_ZOOM_STEP: f32 = 50.0;
/// Orbit radius change per pinch-span pixel.
pub const PINCH_ZOOM_RATE: f32 = 2.0;

/// Classifier state, reset to `Idle` when the last pointer lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// One pointer down, within slop, may still become a tap.
    TapPending,
    /// One pointer dragging the camera.
    Rotating,
    /// Two pointers zooming.
    Pinching,
}

/// A classified input gesture, in the order it occurred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Pointer drag delta in device pixels.
    Orbit { delta: Vec2 },
    /// Requested orbit-radius change in world units (+ = away from target).
    Zoom { delta: f32 },
    /// Press and release within the tap window; position of the press.
    Tap { position: Vec2 },
}

/// Turns raw pointer traffic into [`GestureEvent`]s.
///
/// Time is passed in by the caller (seconds on the frame clock) so the
/// machine is deterministic under test.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    phase: GesturePhase,
    press_position: Vec2,
    press_time: f32,
    last_position: Vec2,
    /// True once cumulative displacement exceeded the slop radius.
    crossed_slop: bool,
    /// Active touch points by winit touch id.
    touch_points: HashMap<u64, Vec2>,
    /// Pinch span baseline; advances every move (incremental, not anchored).
    last_pinch_span: Option<f32>,
    events: Vec<GestureEvent>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Drain the gestures classified since the last call.
    pub fn drain_events(&mut self) -> Vec<GestureEvent> {
        std::mem::take(&mut self.events)
    }

    /// Primary-button press (or first touch) at `position`.
    pub fn on_press(&mut self, position: Vec2, now: f32) {
        self.phase = GesturePhase::TapPending;
        self.press_position = position;
        self.press_time = now;
        self.last_position = position;
        self.crossed_slop = false;
    }

    /// Pointer moved to `position` while pressed.
    pub fn on_move(&mut self, position: Vec2) {
        match self.phase {
            GesturePhase::TapPending => {
                if (position - self.press_position).length() > TAP_SLOP_PX {
                    self.crossed_slop = true;
                    self.phase = GesturePhase::Rotating;
                    self.events.push(GestureEvent::Orbit {
                        delta: position - self.last_position,
                    });
                }
                // Below slop: stay pending, move no camera.
            }
            GesturePhase::Rotating => {
                self.events.push(GestureEvent::Orbit {
                    delta: position - self.last_position,
                });
            }
            GesturePhase::Idle | GesturePhase::Pinching => {}
        }
        self.last_position = position;
    }

    /// Primary-button release (or last touch lift).
    pub fn on_release(&mut self, now: f32) {
        if self.phase == GesturePhase::TapPending
            && !self.crossed_slop
            && now - self.press_time < TAP_MAX_SECS
        {
            self.events.push(GestureEvent::Tap {
                position: self.press_position,
            });
        }
        self.phase = GesturePhase::Idle;
        self.last_pinch_span = None;
    }

    /// Mouse wheel steps (+ = scroll up). Scroll up zooms in.
    pub fn on_wheel(&mut self, steps: f32) {
        self.events.push(GestureEvent::Zoom {
            delta: -steps * WHEEL_ZOOM_STEP,
        });
    }

    /// Touch-point traffic. Routes through the same machine as the mouse;
    /// a second concurrent point switches to pinch zooming.
    pub fn on_touch(&mut self, id: u64, touch_phase: TouchPhase, position: Vec2, now: f32) {
        match touch_phase {
            TouchPhase::Started => {
                self.touch_points.insert(id, position);
                match self.touch_points.len() {
                    1 => self.on_press(position, now),
                    2 => {
                        // A pending tap or active rotation becomes a pinch.
                        self.phase = GesturePhase::Pinching;
                        self.last_pinch_span = self.pinch_span();
                    }
                    _ => {}
                }
            }
            TouchPhase::Moved => {
                self.touch_points.insert(id, position);
                if self.phase == GesturePhase::Pinching {
                    if let Some(span) = self.pinch_span() {
                        if let Some(last) = self.last_pinch_span {
                            // Span growing (fingers apart) zooms in.
                            self.events.push(GestureEvent::Zoom {
                                delta: (last - span) * PINCH_ZOOM_RATE,
                            });
                        }
                        self.last_pinch_span = Some(span);
                    }
                } else {
                    self.on_move(position);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touch_points.remove(&id);
                match self.phase {
                    GesturePhase::Pinching => {
                        // Pinch over; remaining finger must lift before any tap.
                        if self.touch_points.is_empty() {
                            self.phase = GesturePhase::Idle;
                        }
                        self.last_pinch_span = None;
                        self.crossed_slop = true;
                    }
                    _ => {
                        if self.touch_points.is_empty() {
                            self.on_release(now);
                        }
                    }
                }
            }
        }
    }

    /// Distance between the two active touch points, if exactly two.
    fn pinch_span(&self) -> Option<f32> {
        if self.touch_points.len() == 2 {
            let points: Vec<&Vec2> = self.touch_points.values().collect();
            Some((*points[0] - *points[1]).length())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taps(events: &[GestureEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GestureEvent::Tap { .. }))
            .count()
    }

    fn orbit_total(events: &[GestureEvent]) -> Vec2 {
        events.iter().fold(Vec2::ZERO, |acc, e| match e {
            GestureEvent::Orbit { delta } => acc + *delta,
            _ => acc,
        })
    }

    /// Quick press and release with no motion beyond slop is exactly one tap.
    #[test]
    fn quick_still_press_emits_single_tap() {
        let mut g = GestureClassifier::new();
        g.on_press(Vec2::new(40.0, 60.0), 0.0);
        g.on_release(0.1);
        let events = g.drain_events();
        assert_eq!(taps(&events), 1);
        assert_eq!(
            events[0],
            GestureEvent::Tap { position: Vec2::new(40.0, 60.0) }
        );
        assert!(g.drain_events().is_empty());
    }

    /// Jitter below the slop radius must not disqualify the tap.
    #[test]
    fn sub_slop_jitter_still_taps() {
        let mut g = GestureClassifier::new();
        g.on_press(Vec2::new(100.0, 100.0), 0.0);
        g.on_move(Vec2::new(102.0, 101.0));
        g.on_move(Vec2::new(99.0, 100.5));
        g.on_release(0.2);
        let events = g.drain_events();
        assert_eq!(taps(&events), 1);
        assert_eq!(orbit_total(&events), Vec2::ZERO);
    }

    /// A press that moves beyond slop and releases inside the tap window is
    /// a drag, not a tap.
    #[test]
    fn drag_within_tap_window_is_not_a_tap() {
        let mut g = GestureClassifier::new();
        g.on_press(Vec2::new(0.0, 0.0), 0.0);
        g.on_move(Vec2::new(10.0, 0.0));
        g.on_release(0.15);
        let events = g.drain_events();
        assert_eq!(taps(&events), 0);
        assert_eq!(orbit_total(&events), Vec2::new(10.0, 0.0));
    }

    /// A press held past the tap window emits no tap even without motion.
    #[test]
    fn slow_press_is_not_a_tap() {
        let mut g = GestureClassifier::new();
        g.on_press(Vec2::ZERO, 0.0);
        g.on_release(0.5);
        assert_eq!(taps(&g.drain_events()), 0);
    }

    /// Orbit deltas accumulate from the slop crossing onward.
    #[test]
    fn rotation_emits_incremental_orbit_deltas() {
        let mut g = GestureClassifier::new();
        g.on_press(Vec2::ZERO, 0.0);
        g.on_move(Vec2::new(8.0, 0.0));
        g.on_move(Vec2::new(12.0, 3.0));
        g.on_release(1.0);
        let events = g.drain_events();
        assert_eq!(taps(&events), 0);
        assert_eq!(orbit_total(&events), Vec2::new(12.0, 3.0));
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    /// Touch path: quick tap through winit touch phases.
    #[test]
    fn touch_tap_matches_press_coordinates() {
        let mut g = GestureClassifier::new();
        g.on_touch(7, TouchPhase::Started, Vec2::new(150.0, 200.0), 0.0);
        g.on_touch(7, TouchPhase::Ended, Vec2::new(151.0, 200.0), 0.12);
        let events = g.drain_events();
        assert_eq!(taps(&events), 1);
        assert_eq!(
            events[0],
            GestureEvent::Tap { position: Vec2::new(150.0, 200.0) }
        );
    }

    /// Touch path: start, move > 5 px, end within 300 ms is a drag, not a tap.
    #[test]
    fn touch_fast_swipe_is_not_a_tap() {
        let mut g = GestureClassifier::new();
        g.on_touch(1, TouchPhase::Started, Vec2::new(50.0, 50.0), 0.0);
        g.on_touch(1, TouchPhase::Moved, Vec2::new(60.0, 50.0), 0.05);
        g.on_touch(1, TouchPhase::Ended, Vec2::new(60.0, 50.0), 0.1);
        assert_eq!(taps(&g.drain_events()), 0);
    }

    /// Second finger converts to pinch; spans baseline advances each move.
    #[test]
    fn pinch_zoom_uses_incremental_baseline() {
        let mut g = GestureClassifier::new();
        g.on_touch(1, TouchPhase::Started, Vec2::new(0.0, 0.0), 0.0);
        g.on_touch(2, TouchPhase::Started, Vec2::new(100.0, 0.0), 0.02);
        assert_eq!(g.phase(), GesturePhase::Pinching);

        // Fingers spread 100 -> 150 -> 170: two incremental zoom-in events.
        g.on_touch(2, TouchPhase::Moved, Vec2::new(150.0, 0.0), 0.05);
        g.on_touch(2, TouchPhase::Moved, Vec2::new(170.0, 0.0), 0.08);
        let events = g.drain_events();
        let zooms: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                GestureEvent::Zoom { delta } => Some(*delta),
                _ => None,
            })
            .collect();
        assert_eq!(zooms.len(), 2);
        assert!((zooms[0] + 50.0 * PINCH_ZOOM_RATE).abs() < 1e-4);
        assert!((zooms[1] + 20.0 * PINCH_ZOOM_RATE).abs() < 1e-4);
    }

    /// Ending a pinch emits no tap, even if both fingers lift quickly.
    #[test]
    fn pinch_release_never_taps() {
        let mut g = GestureClassifier::new();
        g.on_touch(1, TouchPhase::Started, Vec2::new(0.0, 0.0), 0.0);
        g.on_touch(2, TouchPhase::Started, Vec2::new(40.0, 0.0), 0.01);
        g.on_touch(2, TouchPhase::Ended, Vec2::new(40.0, 0.0), 0.05);
        g.on_touch(1, TouchPhase::Ended, Vec2::new(0.0, 0.0), 0.08);
        assert_eq!(taps(&g.drain_events()), 0);
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    /// Wheel scroll up zooms in (negative radius delta).
    #[test]
    fn wheel_steps_map_to_radius_change() {
        let mut g = GestureClassifier::new();
        g.on_wheel(1.0);
        g.on_wheel(-2.0);
        let events = g.drain_events();
        assert_eq!(
            events,
            vec![
                GestureEvent::Zoom { delta: -WHEEL_ZOOM_STEP },
                GestureEvent::Zoom { delta: 2.0 * WHEEL_ZOOM_STEP },
            ]
        );
    }
}
