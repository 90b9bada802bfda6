//! Panel configuration.
//!
//! The original widget read these from declarative attributes; here the host
//! constructs an explicit [`PanelConfig`] (or starts from the defaults) and
//! every field stays settable at runtime through the panel's setters.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a host-side resource (an icon or a content layout).
/// The panel never interprets it; it is handed back to the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResId(pub u32);

/// Built-in handle icon used when the host does not supply one.
pub const DEFAULT_DRAG_ICON: ResId = ResId(1);

/// Direction the panel retreats toward when minimized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HideDirection {
    /// Stay at the natural position (hide offset 0).
    None,
    /// Move up until the panel's top aligns with the reserved top offset.
    Top,
    /// Move down past the container's bottom edge, leaving 40% of the panel
    /// height visible.
    Bottom,
    /// Pick Top or Bottom depending on where the user last dragged the panel.
    #[default]
    Nearest,
}

impl HideDirection {
    /// Stable ordinal used by the persisted snapshot.
    pub fn ordinal(self) -> u32 {
        match self {
            HideDirection::None => 0,
            HideDirection::Top => 1,
            HideDirection::Bottom => 2,
            HideDirection::Nearest => 3,
        }
    }

    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        match ordinal {
            0 => Some(HideDirection::None),
            1 => Some(HideDirection::Top),
            2 => Some(HideDirection::Bottom),
            3 => Some(HideDirection::Nearest),
            _ => None,
        }
    }
}

/// Configuration owned by one panel instance. All fields are independently
/// settable at runtime and the whole struct round-trips through the saved
/// snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelConfig {
    pub drag_icon: ResId,
    pub can_dismiss: bool,
    /// Normalized horizontal drag fraction past which releasing dismisses.
    pub dismiss_threshold: f32,
    pub can_drag: bool,
    pub content: Option<ResId>,
    pub animation_duration_ms: u64,
    pub hide_direction: HideDirection,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            drag_icon: DEFAULT_DRAG_ICON,
            can_dismiss: true,
            dismiss_threshold: 0.4,
            can_drag: true,
            content: None,
            animation_duration_ms: 400,
            hide_direction: HideDirection::Nearest,
        }
    }
}

impl PanelConfig {
    pub fn with_drag_icon(mut self, icon: ResId) -> Self {
        self.drag_icon = icon;
        self
    }

    pub fn with_can_dismiss(mut self, can_dismiss: bool) -> Self {
        self.can_dismiss = can_dismiss;
        self
    }

    pub fn with_dismiss_threshold(mut self, threshold: f32) -> Self {
        self.dismiss_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_can_drag(mut self, can_drag: bool) -> Self {
        self.can_drag = can_drag;
        self
    }

    pub fn with_content(mut self, content: ResId) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_animation_duration_ms(mut self, duration_ms: u64) -> Self {
        self.animation_duration_ms = duration_ms;
        self
    }

    pub fn with_hide_direction(mut self, direction: HideDirection) -> Self {
        self.hide_direction = direction;
        self
    }
}
