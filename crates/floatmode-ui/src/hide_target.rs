//! Hide-target calculation: the vertical offset the panel animates to when it
//! minimizes, as a pure function of direction and current geometry.

use crate::config::HideDirection;
use floatmode_graphics::PanelGeometry;

/// Translation-Y the minimized panel retreats to.
///
/// Without a container there is nothing to hide toward, so every direction
/// degrades to 0. `Nearest` compares the panel's drag-adjusted vertical center
/// against the container midpoint; the exact-midpoint boundary picks Bottom.
pub fn hide_translation_y(
    direction: HideDirection,
    geometry: &PanelGeometry,
    top_offset: f32,
    drag_translation_y: f32,
) -> f32 {
    let Some(container_height) = geometry.container_height else {
        log::warn!("hide target requested with no container; staying in place");
        return 0.0;
    };

    match direction {
        HideDirection::None => 0.0,
        HideDirection::Top => top_target(geometry, top_offset),
        HideDirection::Bottom => bottom_target(geometry, container_height),
        HideDirection::Nearest => {
            if geometry.center_y() + drag_translation_y < container_height / 2.0 {
                top_target(geometry, top_offset)
            } else {
                bottom_target(geometry, container_height)
            }
        }
    }
}

fn top_target(geometry: &PanelGeometry, top_offset: f32) -> f32 {
    top_offset - geometry.top
}

/// Leaves 40% of the panel's height visible at the bottom edge.
fn bottom_target(geometry: &PanelGeometry, container_height: f32) -> f32 {
    container_height - geometry.bottom + geometry.height * 0.6
}

#[cfg(test)]
#[path = "tests/hide_target_tests.rs"]
mod tests;
