//! Drag-gesture interpretation for the panel's handle.
//!
//! The tracker turns raw pointer events into the updates the panel applies:
//! live translations plus a dismissal-progress alpha on Move, and the commit
//! decision on Up. No threshold check happens on Move; the fade is only a
//! preview and the decision is made once, at release.

use crate::config::PanelConfig;
use crate::pointer::{PointerEvent, PointerEventKind};

/// State captured at pointer-down. Exists only while a touch sequence is
/// active; a new Down replaces any open session.
#[derive(Clone, Copy, Debug, PartialEq)]
struct DragSession {
    start_x: f32,
    start_y: f32,
    base_translation_y: f32,
}

/// Effect of one pointer event, to be applied by the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragUpdate {
    /// Handle grabbed; mark it pressed.
    Grabbed,
    /// Live drag values. `alpha` is present only while dismissal is enabled.
    Moved {
        translation_x: f32,
        translation_y: f32,
        alpha: Option<f32>,
    },
    /// Pointer released: settle `translation_x` back to 0 and, when `dismiss`
    /// is set, notify the dismiss listener. The panel does not hide itself on
    /// this path.
    Released { dismiss: bool },
    /// Event swallowed with no visual effect (Cancel, or Move/Up with no open
    /// session).
    Ignored,
}

/// Fade applied while the panel is dragged sideways with dismissal enabled:
/// full opacity below the threshold, then a linear fall-off reaching 0 at
/// q = 1. The no-fade branch is inclusive of the threshold (`q < threshold`)
/// while the dismiss commit at Up is strict (`q > threshold`); the asymmetry
/// is intentional and kept.
pub fn dismiss_alpha(q: f32, threshold: f32) -> f32 {
    if q < threshold {
        return 1.0;
    }
    let span = 1.0 - threshold;
    if span <= f32::EPSILON {
        return 1.0;
    }
    (1.0 - (q - threshold) / span).clamp(0.0, 1.0)
}

/// Interprets the handle's pointer stream. One session at a time.
#[derive(Default)]
pub struct DragTracker {
    session: Option<DragSession>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any open session, as if the sequence had been cancelled.
    pub fn reset(&mut self) {
        self.session = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Consume one pointer event. Returns `None` when dragging is disabled
    /// (the event passes through to other handlers); otherwise the event is
    /// handled and the returned update says what to apply.
    pub fn on_pointer_event(
        &mut self,
        event: &PointerEvent,
        config: &PanelConfig,
        panel_width: f32,
        current_translation_y: f32,
    ) -> Option<DragUpdate> {
        if !config.can_drag {
            return None;
        }

        match event.kind {
            PointerEventKind::Down => {
                // Last Down wins: an unfinished session is simply replaced.
                self.session = Some(DragSession {
                    start_x: event.global_position.x,
                    start_y: event.global_position.y,
                    base_translation_y: current_translation_y,
                });
                Some(DragUpdate::Grabbed)
            }
            PointerEventKind::Move => {
                let Some(session) = self.session else {
                    return Some(DragUpdate::Ignored);
                };
                let q = self.progress(event, panel_width);
                log::debug!("q == {q}");
                Some(DragUpdate::Moved {
                    translation_x: event.global_position.x - session.start_x,
                    translation_y: session.base_translation_y
                        + (event.global_position.y - session.start_y),
                    alpha: config
                        .can_dismiss
                        .then(|| dismiss_alpha(q, config.dismiss_threshold)),
                })
            }
            PointerEventKind::Up => {
                if self.session.is_none() {
                    return Some(DragUpdate::Ignored);
                }
                let q = self.progress(event, panel_width);
                log::debug!("q == {q}");
                self.session = None;
                Some(DragUpdate::Released {
                    // Strict: releasing exactly at the threshold keeps the panel.
                    dismiss: config.can_dismiss && q > config.dismiss_threshold,
                })
            }
            PointerEventKind::Cancel => {
                self.session = None;
                Some(DragUpdate::Ignored)
            }
        }
    }

    /// Normalized horizontal displacement |x - startX| / W.
    fn progress(&self, event: &PointerEvent, panel_width: f32) -> f32 {
        let Some(session) = self.session else {
            return 0.0;
        };
        if panel_width <= 0.0 {
            return 0.0;
        }
        (event.global_position.x - session.start_x).abs() / panel_width
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
