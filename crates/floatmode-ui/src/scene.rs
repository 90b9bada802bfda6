//! Rendering-layer contract.
//!
//! The panel never draws; it issues commands to a host-implemented
//! [`PanelScene`]. Animated calls are fire-and-forget: the scene interpolates
//! toward the target over the given duration, and the panel treats the target
//! as the value from then on.

use crate::config::ResId;
use floatmode_graphics::{GraphicsLayer, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// Hidden but still occupying layout space.
    Invisible,
    /// Hidden and removed from layout.
    Gone,
}

pub trait PanelScene {
    fn set_visibility(&self, visibility: Visibility);

    /// Enable or disable interaction with the panel's content.
    fn set_enabled(&self, enabled: bool);

    /// Inflate and attach the body content. At most one content view is
    /// attached at a time; the panel detaches before re-attaching.
    fn attach_content(&self, content: ResId);

    fn detach_content(&self);

    fn set_handle_icon(&self, icon: ResId);

    fn set_handle_visibility(&self, visibility: Visibility);

    fn set_handle_pressed(&self, pressed: bool);

    /// Anchor point for scale transforms.
    fn set_pivot(&self, pivot: Point);

    /// Apply layer values immediately (live drag updates).
    fn snap_layer(&self, layer: GraphicsLayer);

    /// Interpolate the layer toward `target` over `duration_ms` (0 means
    /// apply immediately).
    fn animate_layer(&self, target: GraphicsLayer, duration_ms: u64);

    /// Instantly shift the laid-out position vertically (app-bar resize path;
    /// never animated).
    fn offset_vertically(&self, dy: f32);
}
