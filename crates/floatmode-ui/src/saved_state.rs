//! Snapshot save/restore for the panel configuration.
//!
//! The snapshot is a flat key/value object: one typed entry per config field
//! plus one opaque blob for the inherited base-view state. Restore never
//! fails: each field falls back to its constructor default when its key is
//! missing or carries the wrong type.

use crate::config::{HideDirection, PanelConfig, ResId};
use serde::Serialize;
use serde_json::Value;

const DRAG_ICON_KEY: &str = "floatmode.drag_icon";
const CAN_DISMISS_KEY: &str = "floatmode.can_dismiss";
const DISMISS_THRESHOLD_KEY: &str = "floatmode.dismiss_threshold";
const CAN_DRAG_KEY: &str = "floatmode.can_drag";
const CONTENT_RES_KEY: &str = "floatmode.content_res";
const ANIMATION_DURATION_KEY: &str = "floatmode.animation_duration";
const HIDE_DIRECTION_KEY: &str = "floatmode.hide_direction";
const SUPER_STATE_KEY: &str = "floatmode.super_state";

#[derive(Serialize)]
struct Snapshot {
    #[serde(rename = "floatmode.drag_icon")]
    drag_icon: u32,
    #[serde(rename = "floatmode.can_dismiss")]
    can_dismiss: bool,
    #[serde(rename = "floatmode.dismiss_threshold")]
    dismiss_threshold: f32,
    #[serde(rename = "floatmode.can_drag")]
    can_drag: bool,
    #[serde(rename = "floatmode.content_res")]
    content_res: Option<u32>,
    #[serde(rename = "floatmode.animation_duration")]
    animation_duration: u64,
    #[serde(rename = "floatmode.hide_direction")]
    hide_direction: u32,
    #[serde(rename = "floatmode.super_state")]
    super_state: Value,
}

pub(crate) fn encode(config: &PanelConfig, super_state: Value) -> Value {
    let snapshot = Snapshot {
        drag_icon: config.drag_icon.0,
        can_dismiss: config.can_dismiss,
        dismiss_threshold: config.dismiss_threshold,
        can_drag: config.can_drag,
        content_res: config.content.map(|content| content.0),
        animation_duration: config.animation_duration_ms,
        hide_direction: config.hide_direction.ordinal(),
        super_state,
    };
    serde_json::to_value(snapshot).unwrap_or(Value::Null)
}

pub(crate) fn decode(state: &Value) -> (PanelConfig, Value) {
    let defaults = PanelConfig::default();
    let config = PanelConfig {
        drag_icon: state
            .get(DRAG_ICON_KEY)
            .and_then(Value::as_u64)
            .and_then(|icon| u32::try_from(icon).ok())
            .map(ResId)
            .unwrap_or(defaults.drag_icon),
        can_dismiss: state
            .get(CAN_DISMISS_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(defaults.can_dismiss),
        dismiss_threshold: state
            .get(DISMISS_THRESHOLD_KEY)
            .and_then(Value::as_f64)
            .map(|threshold| (threshold as f32).clamp(0.0, 1.0))
            .unwrap_or(defaults.dismiss_threshold),
        can_drag: state
            .get(CAN_DRAG_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(defaults.can_drag),
        content: state
            .get(CONTENT_RES_KEY)
            .and_then(Value::as_u64)
            .and_then(|content| u32::try_from(content).ok())
            .map(ResId),
        animation_duration_ms: state
            .get(ANIMATION_DURATION_KEY)
            .and_then(Value::as_u64)
            .unwrap_or(defaults.animation_duration_ms),
        hide_direction: state
            .get(HIDE_DIRECTION_KEY)
            .and_then(Value::as_u64)
            .and_then(|ordinal| u32::try_from(ordinal).ok())
            .and_then(HideDirection::from_ordinal)
            .unwrap_or(defaults.hide_direction),
    };
    let super_state = state.get(SUPER_STATE_KEY).cloned().unwrap_or(Value::Null);
    (config, super_state)
}

#[cfg(test)]
#[path = "tests/saved_state_tests.rs"]
mod tests;
