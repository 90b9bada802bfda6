//! Testing utilities for Floatmode: a scene that records every command the
//! panel issues, and a harness bundling panel + scheduler + scripted pointer
//! input.

mod harness;
mod recording;

pub use harness::PanelHarness;
pub use recording::{RecordingScene, SceneCommand};
