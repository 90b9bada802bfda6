//! Harness driving a panel against the recording scene with an explicit clock.

use std::rc::Rc;

use floatmode_graphics::{PanelGeometry, Point};
use floatmode_runtime::Scheduler;
use floatmode_ui::{
    FloatingPanel, PanelConfig, PointerEvent, PointerEventKind, ResId,
};

use crate::recording::RecordingScene;

/// Panel + scheduler + recording scene, with scripted pointer helpers.
///
/// The default geometry is a 300-wide, 100-tall panel laid out at y=100 in a
/// 1000-tall container, which the gesture and hide-target scenarios assume.
pub struct PanelHarness {
    pub scheduler: Scheduler,
    pub scene: Rc<RecordingScene>,
    pub panel: FloatingPanel,
}

impl Default for PanelHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelHarness {
    pub fn new() -> Self {
        Self::with_config(PanelConfig::default())
    }

    pub fn with_config(config: PanelConfig) -> Self {
        let scheduler = Scheduler::new();
        let scene = Rc::new(RecordingScene::new());
        let panel = FloatingPanel::with_config(
            config,
            Rc::clone(&scene) as Rc<dyn floatmode_ui::PanelScene>,
            scheduler.clone(),
        );
        panel.set_geometry(PanelGeometry::new(100.0, 200.0, 300.0, 1000.0));
        Self {
            scheduler,
            scene,
            panel,
        }
    }

    /// Start the panel and immediately deliver the first-layout signal.
    pub fn start_ready(&self, content: ResId) {
        self.panel.start(content);
        self.panel.on_content_ready();
    }

    pub fn press(&self, x: f32, y: f32) -> bool {
        self.pointer(PointerEventKind::Down, x, y)
    }

    pub fn drag_to(&self, x: f32, y: f32) -> bool {
        self.pointer(PointerEventKind::Move, x, y)
    }

    pub fn release_at(&self, x: f32, y: f32) -> bool {
        self.pointer(PointerEventKind::Up, x, y)
    }

    pub fn cancel_gesture(&self) -> bool {
        self.pointer(PointerEventKind::Cancel, 0.0, 0.0)
    }

    pub fn advance(&self, delta_millis: u64) {
        self.scheduler.advance(delta_millis);
    }

    fn pointer(&self, kind: PointerEventKind, x: f32, y: f32) -> bool {
        self.panel
            .on_handle_pointer_event(&PointerEvent::at(kind, Point::new(x, y)))
    }
}
