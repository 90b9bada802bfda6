//! A [`PanelScene`] that records commands instead of rendering.

use std::cell::RefCell;

use floatmode_graphics::{GraphicsLayer, Point};
use floatmode_ui::{PanelScene, ResId, Visibility};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneCommand {
    SetVisibility(Visibility),
    SetEnabled(bool),
    AttachContent(ResId),
    DetachContent,
    SetHandleIcon(ResId),
    SetHandleVisibility(Visibility),
    SetHandlePressed(bool),
    SetPivot(Point),
    SnapLayer(GraphicsLayer),
    AnimateLayer {
        target: GraphicsLayer,
        duration_ms: u64,
    },
    OffsetVertically(f32),
}

#[derive(Default)]
pub struct RecordingScene {
    commands: RefCell<Vec<SceneCommand>>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<SceneCommand> {
        self.commands.borrow().clone()
    }

    pub fn clear(&self) {
        self.commands.borrow_mut().clear();
    }

    /// Most recent visibility the panel asked for, if any.
    pub fn visibility(&self) -> Option<Visibility> {
        self.commands
            .borrow()
            .iter()
            .rev()
            .find_map(|command| match command {
                SceneCommand::SetVisibility(visibility) => Some(*visibility),
                _ => None,
            })
    }

    /// Whether a content view is currently attached (attach/detach balance).
    pub fn content_attached(&self) -> bool {
        let mut attached = false;
        for command in self.commands.borrow().iter() {
            match command {
                SceneCommand::AttachContent(_) => attached = true,
                SceneCommand::DetachContent => attached = false,
                _ => {}
            }
        }
        attached
    }

    pub fn detach_count(&self) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|command| matches!(command, SceneCommand::DetachContent))
            .count()
    }

    /// Layer values as of the last snap or animation target.
    pub fn layer(&self) -> Option<GraphicsLayer> {
        self.commands
            .borrow()
            .iter()
            .rev()
            .find_map(|command| match command {
                SceneCommand::SnapLayer(layer) => Some(*layer),
                SceneCommand::AnimateLayer { target, .. } => Some(*target),
                _ => None,
            })
    }

    /// Every animation request, in order.
    pub fn animations(&self) -> Vec<(GraphicsLayer, u64)> {
        self.commands
            .borrow()
            .iter()
            .filter_map(|command| match command {
                SceneCommand::AnimateLayer {
                    target,
                    duration_ms,
                } => Some((*target, *duration_ms)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, command: SceneCommand) {
        self.commands.borrow_mut().push(command);
    }
}

impl PanelScene for RecordingScene {
    fn set_visibility(&self, visibility: Visibility) {
        self.record(SceneCommand::SetVisibility(visibility));
    }

    fn set_enabled(&self, enabled: bool) {
        self.record(SceneCommand::SetEnabled(enabled));
    }

    fn attach_content(&self, content: ResId) {
        self.record(SceneCommand::AttachContent(content));
    }

    fn detach_content(&self) {
        self.record(SceneCommand::DetachContent);
    }

    fn set_handle_icon(&self, icon: ResId) {
        self.record(SceneCommand::SetHandleIcon(icon));
    }

    fn set_handle_visibility(&self, visibility: Visibility) {
        self.record(SceneCommand::SetHandleVisibility(visibility));
    }

    fn set_handle_pressed(&self, pressed: bool) {
        self.record(SceneCommand::SetHandlePressed(pressed));
    }

    fn set_pivot(&self, pivot: Point) {
        self.record(SceneCommand::SetPivot(pivot));
    }

    fn snap_layer(&self, layer: GraphicsLayer) {
        self.record(SceneCommand::SnapLayer(layer));
    }

    fn animate_layer(&self, target: GraphicsLayer, duration_ms: u64) {
        self.record(SceneCommand::AnimateLayer {
            target,
            duration_ms,
        });
    }

    fn offset_vertically(&self, dy: f32) {
        self.record(SceneCommand::OffsetVertically(dy));
    }
}
