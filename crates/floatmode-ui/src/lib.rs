//! Floatmode: a draggable, dismissible floating action panel.
//!
//! The panel is an overlay control that can be dragged vertically and
//! horizontally, swiped past a threshold to dismiss, and animated between a
//! minimized "peek" pose and a maximized "expanded" pose. Rendering, layout,
//! and persistent storage stay on the host side behind [`PanelScene`] and the
//! coordination hooks; this crate owns the gesture interpretation and the
//! state-transition logic on top of them.

mod config;
mod gesture;
mod hide_target;
mod panel;
mod pointer;
mod saved_state;
mod scene;

pub use config::{HideDirection, PanelConfig, ResId, DEFAULT_DRAG_ICON};
pub use gesture::{dismiss_alpha, DragTracker, DragUpdate};
pub use hide_target::hide_translation_y;
pub use panel::{
    DependencyChange, DependencyKind, DismissListener, FloatingPanel, PanelState,
};
pub use pointer::{PointerEvent, PointerEventKind};
pub use scene::{PanelScene, Visibility};
