//! The floating panel itself: an explicit state machine over the gesture
//! tracker, the hide-target math, and the scene commands.

use std::cell::RefCell;
use std::rc::Rc;

use floatmode_graphics::{GraphicsLayer, PanelGeometry, Point};
use floatmode_runtime::Scheduler;

use crate::config::{HideDirection, PanelConfig, ResId};
use crate::gesture::{DragTracker, DragUpdate};
use crate::hide_target::hide_translation_y;
use crate::pointer::PointerEvent;
use crate::saved_state;
use crate::scene::{PanelScene, Visibility};

/// Visibility/size state of the panel.
///
/// Invariant: content is attached iff the state is not `Hidden`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelState {
    /// Not visible, no content attached.
    Hidden,
    /// Visible at half scale, faded, translated to the hide target.
    Minimized,
    /// Visible at full scale and opacity, translated to the drag offset.
    Maximized,
    /// Teardown animation running; a deferred task will hide the panel.
    Dismissing,
}

pub type DismissListener = Rc<dyn Fn()>;

/// Sibling kinds the panel reacts to inside the coordination layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DependencyKind {
    AppBar,
    TransientMessage,
    Other,
}

/// Change notifications from dependency siblings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DependencyChange {
    /// The app bar grew or shrank; the panel follows instantly.
    AppBarResized { height: f32 },
    /// A transient message (snackbar-like) moved; the panel keeps its bottom
    /// clear of it.
    TransientMessageMoved { height: f32, translation_y: f32 },
}

struct PanelInner {
    config: PanelConfig,
    state: PanelState,
    geometry: PanelGeometry,
    top_offset: f32,
    bottom_offset: f32,
    drag_translation_y: f32,
    /// Mirror of the scene's layer values. Animated values are mirrored at
    /// their target immediately; interpolation is the scene's job.
    layer: GraphicsLayer,
    tracker: DragTracker,
    content_attached: bool,
    awaiting_content_ready: bool,
    on_dismiss: Option<DismissListener>,
    scene: Rc<dyn PanelScene>,
    scheduler: Scheduler,
}

/// Draggable, dismissible floating panel.
///
/// Cloning the handle shares the instance, which is how deferred teardown
/// tasks re-enter the panel; see [`Scheduler`].
pub struct FloatingPanel {
    inner: Rc<RefCell<PanelInner>>,
}

impl FloatingPanel {
    pub fn new(scene: Rc<dyn PanelScene>, scheduler: Scheduler) -> Self {
        Self::with_config(PanelConfig::default(), scene, scheduler)
    }

    pub fn with_config(
        config: PanelConfig,
        scene: Rc<dyn PanelScene>,
        scheduler: Scheduler,
    ) -> Self {
        let panel = Self {
            inner: Rc::new(RefCell::new(PanelInner {
                config,
                state: PanelState::Hidden,
                geometry: PanelGeometry::default(),
                top_offset: 0.0,
                bottom_offset: 0.0,
                drag_translation_y: 0.0,
                layer: GraphicsLayer::default(),
                tracker: DragTracker::new(),
                content_attached: false,
                awaiting_content_ready: false,
                on_dismiss: None,
                scene,
                scheduler,
            })),
        };
        panel.init();
        panel
    }

    /// Constructor-time initialization, re-run verbatim on state restore:
    /// hides the panel and re-applies gesture handling plus the handle's icon
    /// and visibility.
    fn init(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.tracker.reset();
        inner.scene.set_visibility(Visibility::Invisible);
        let handle_visibility = if inner.config.can_drag {
            Visibility::Visible
        } else {
            Visibility::Invisible
        };
        inner.scene.set_handle_visibility(handle_visibility);
        inner.scene.set_handle_icon(inner.config.drag_icon);
    }

    pub fn state(&self) -> PanelState {
        self.inner.borrow().state
    }

    pub fn is_started(&self) -> bool {
        self.inner.borrow().content_attached
    }

    /// Latest laid-out position, fed by the layout host.
    pub fn set_geometry(&self, geometry: PanelGeometry) {
        self.inner.borrow_mut().geometry = geometry;
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.inner.borrow().geometry
    }

    // ---- lifecycle ---------------------------------------------------------

    /// Show the panel with the given content. Once the rendering layer
    /// reports the content's first layout pass via [`on_content_ready`],
    /// the panel opens (minimized pose, then animated expand).
    ///
    /// [`on_content_ready`]: FloatingPanel::on_content_ready
    pub fn start(&self, content: ResId) {
        let mut inner = self.inner.borrow_mut();
        log::debug!("start({:?})", content);
        inner.config.content = Some(content);
        if inner.content_attached {
            inner.scene.detach_content();
        } else {
            inner.scene.set_visibility(Visibility::Visible);
            inner.state = PanelState::Minimized;
        }
        inner.scene.attach_content(content);
        inner.content_attached = true;
        inner.awaiting_content_ready = true;
    }

    /// One-shot "first layout pass done" signal from the rendering layer.
    pub fn on_content_ready(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.awaiting_content_ready {
            return;
        }
        inner.awaiting_content_ready = false;
        inner.minimize(false);
        inner.maximize(true);
    }

    /// Expand the panel, always passing through the minimized pose first so
    /// the expand animation starts from a consistent point.
    pub fn open(&self, animate: bool) {
        let mut inner = self.inner.borrow_mut();
        log::debug!("open(animate={animate})");
        inner.minimize(false);
        inner.maximize(animate);
    }

    /// Hide the panel. Content detaches once hidden; the content resource and
    /// the drag offset are kept (unlike [`stop`]).
    ///
    /// [`stop`]: FloatingPanel::stop
    pub fn close(&self, animate: bool) {
        let mut inner = self.inner.borrow_mut();
        if !inner.content_attached {
            return;
        }
        log::debug!("close(animate={animate})");
        if !animate {
            inner.finish_close();
            return;
        }
        inner.minimize(true);
        inner.state = PanelState::Dismissing;
        let delay = inner.config.animation_duration_ms;
        let weak = Rc::downgrade(&self.inner);
        // Not cancelled if state changes again inside the window; a later
        // start() races with this and the deferred hide wins.
        inner
            .scheduler
            .run_after(delay, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().finish_close();
                }
            })
            .detach();
    }

    /// Full teardown: clears the content resource, minimizes, and after the
    /// animation duration hides the panel, resets the drag offset, and
    /// detaches content. Safe no-op when not started.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.content_attached {
            log::trace!("stop() on an unstarted panel; ignoring");
            return;
        }
        log::debug!("stop()");
        inner.config.content = None;
        inner.minimize(true);
        inner.state = PanelState::Dismissing;
        let delay = inner.config.animation_duration_ms;
        let weak = Rc::downgrade(&self.inner);
        inner
            .scheduler
            .run_after(delay, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().finish_stop();
                }
            })
            .detach();
    }

    pub fn maximize(&self, animate: bool) {
        self.inner.borrow_mut().maximize(animate);
    }

    pub fn minimize(&self, animate: bool) {
        self.inner.borrow_mut().minimize(animate);
    }

    // ---- coordination hooks ------------------------------------------------

    /// Whether the panel reacts to layout changes of this sibling kind.
    pub fn depends_on(kind: DependencyKind) -> bool {
        matches!(
            kind,
            DependencyKind::AppBar | DependencyKind::TransientMessage
        )
    }

    pub fn on_dependency_changed(&self, change: DependencyChange) {
        let mut inner = self.inner.borrow_mut();
        match change {
            DependencyChange::AppBarResized { height } => {
                let delta = height - inner.top_offset;
                if delta != 0.0 {
                    log::debug!("app bar resized to {height}, shifting by {delta}");
                    inner.top_offset = height;
                    inner.geometry.offset_vertically(delta);
                    inner.scene.offset_vertically(delta);
                }
            }
            DependencyChange::TransientMessageMoved {
                height,
                translation_y,
            } => {
                let occupied = (height - translation_y).max(0.0);
                if occupied != inner.bottom_offset {
                    inner.bottom_offset = occupied;
                    inner.arrange();
                }
            }
        }
    }

    /// Nested-scroll deltas from the coordination layout. Scrolling the
    /// content up minimizes; scrolling down maximizes.
    pub fn on_nested_scroll(&self, dy_consumed: f32) {
        let mut inner = self.inner.borrow_mut();
        if dy_consumed > 0.0 {
            inner.minimize(true);
        } else if dy_consumed < 0.0 {
            inner.maximize(true);
        }
    }

    // ---- gesture entry -----------------------------------------------------

    /// Feed one pointer event from the drag handle. Returns whether the event
    /// was handled; with dragging disabled, events pass through untouched.
    pub fn on_handle_pointer_event(&self, event: &PointerEvent) -> bool {
        let notify_dismiss = {
            let mut inner = self.inner.borrow_mut();
            let inner = &mut *inner;
            let update = inner.tracker.on_pointer_event(
                event,
                &inner.config,
                inner.geometry.width,
                inner.layer.translation_y,
            );
            let Some(update) = update else {
                return false;
            };
            match update {
                DragUpdate::Grabbed => {
                    inner.scene.set_handle_pressed(true);
                    false
                }
                DragUpdate::Moved {
                    translation_x,
                    translation_y,
                    alpha,
                } => {
                    inner.drag_translation_y = translation_y;
                    inner.layer.translation_x = translation_x;
                    inner.layer.translation_y = translation_y;
                    if let Some(alpha) = alpha {
                        inner.layer.alpha = alpha;
                    }
                    inner.scene.snap_layer(inner.layer);
                    false
                }
                DragUpdate::Released { dismiss } => {
                    inner.scene.set_handle_pressed(false);
                    inner.layer.translation_x = 0.0;
                    inner
                        .scene
                        .animate_layer(inner.layer, inner.config.animation_duration_ms);
                    dismiss
                }
                DragUpdate::Ignored => false,
            }
        };
        if notify_dismiss {
            // Borrow released first: the listener may call back into the panel.
            let listener = self.inner.borrow().on_dismiss.clone();
            if let Some(listener) = listener {
                log::debug!("dismiss threshold passed, notifying listener");
                listener();
            }
        }
        true
    }

    /// Single replaceable dismiss observer. `None` clears it.
    pub fn set_on_dismiss(&self, listener: Option<DismissListener>) {
        self.inner.borrow_mut().on_dismiss = listener;
    }

    // ---- configuration -----------------------------------------------------

    pub fn config(&self) -> PanelConfig {
        self.inner.borrow().config.clone()
    }

    pub fn drag_icon(&self) -> ResId {
        self.inner.borrow().config.drag_icon
    }

    pub fn set_drag_icon(&self, icon: ResId) {
        let mut inner = self.inner.borrow_mut();
        inner.config.drag_icon = icon;
        inner.scene.set_handle_icon(icon);
    }

    pub fn can_dismiss(&self) -> bool {
        self.inner.borrow().config.can_dismiss
    }

    pub fn set_can_dismiss(&self, can_dismiss: bool) {
        self.inner.borrow_mut().config.can_dismiss = can_dismiss;
    }

    pub fn dismiss_threshold(&self) -> f32 {
        self.inner.borrow().config.dismiss_threshold
    }

    pub fn set_dismiss_threshold(&self, threshold: f32) {
        self.inner.borrow_mut().config.dismiss_threshold = threshold.clamp(0.0, 1.0);
    }

    pub fn can_drag(&self) -> bool {
        self.inner.borrow().config.can_drag
    }

    pub fn set_can_drag(&self, can_drag: bool) {
        let mut inner = self.inner.borrow_mut();
        inner.config.can_drag = can_drag;
        let handle_visibility = if can_drag {
            Visibility::Visible
        } else {
            Visibility::Invisible
        };
        inner.scene.set_handle_visibility(handle_visibility);
    }

    pub fn content(&self) -> Option<ResId> {
        self.inner.borrow().config.content
    }

    pub fn animation_duration_ms(&self) -> u64 {
        self.inner.borrow().config.animation_duration_ms
    }

    pub fn set_animation_duration_ms(&self, duration_ms: u64) {
        self.inner.borrow_mut().config.animation_duration_ms = duration_ms;
    }

    pub fn hide_direction(&self) -> HideDirection {
        self.inner.borrow().config.hide_direction
    }

    pub fn set_hide_direction(&self, direction: HideDirection) {
        self.inner.borrow_mut().config.hide_direction = direction;
    }

    // ---- persistence -------------------------------------------------------

    /// Snapshot the configuration plus the host's opaque base-view state.
    pub fn save_state(&self, super_state: serde_json::Value) -> serde_json::Value {
        saved_state::encode(&self.inner.borrow().config, super_state)
    }

    /// Replay a snapshot (missing or malformed fields fall back to defaults),
    /// re-run constructor initialization, and hand the opaque base-view blob
    /// back to the host.
    pub fn restore_state(&self, state: &serde_json::Value) -> serde_json::Value {
        let (config, super_state) = saved_state::decode(state);
        self.inner.borrow_mut().config = config;
        self.init();
        super_state
    }
}

impl Clone for FloatingPanel {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl PanelInner {
    fn maximize(&mut self, animate: bool) {
        if !self.content_attached {
            log::trace!("maximize with no content attached; ignoring");
            return;
        }
        self.state = PanelState::Maximized;
        self.scene.set_enabled(true);
        self.scene.set_visibility(Visibility::Visible);
        let target = self
            .layer
            .with_scale(1.0)
            .with_alpha(1.0)
            .with_translation_y(self.arrange_translation_y());
        self.layer = target;
        self.scene
            .animate_layer(target, self.duration_for(animate));
    }

    fn minimize(&mut self, animate: bool) {
        if !self.content_attached {
            log::trace!("minimize with no content attached; ignoring");
            return;
        }
        self.state = PanelState::Minimized;
        self.scene.set_enabled(false);
        self.scene.set_visibility(Visibility::Visible);
        self.scene
            .set_pivot(Point::new(self.geometry.width / 2.0, 0.0));
        let target = self
            .layer
            .with_scale(0.5)
            .with_alpha(0.5)
            .with_translation_y(self.hide_target());
        self.layer = target;
        self.scene
            .animate_layer(target, self.duration_for(animate));
    }

    fn duration_for(&self, animate: bool) -> u64 {
        if animate {
            self.config.animation_duration_ms
        } else {
            0
        }
    }

    fn hide_target(&self) -> f32 {
        hide_translation_y(
            self.config.hide_direction,
            &self.geometry,
            self.top_offset,
            self.drag_translation_y,
        )
    }

    /// Drag offset clamped so the maximized panel never sits above the
    /// app-bar inset nor below the space a transient message occupies.
    fn arrange_translation_y(&self) -> f32 {
        let mut ty = self.drag_translation_y;
        let Some(container_height) = self.geometry.container_height else {
            return ty;
        };
        let top_over = self.top_offset - (self.geometry.top + ty);
        if top_over > 0.0 {
            ty += top_over;
        }
        let bottom_over = (self.geometry.bottom + ty) - (container_height - self.bottom_offset);
        if bottom_over > 0.0 {
            ty -= bottom_over;
        }
        ty
    }

    /// Re-seat the panel after an offset change: snap when maximized, animate
    /// toward the hide target when minimized.
    fn arrange(&mut self) {
        if !self.content_attached {
            return;
        }
        match self.state {
            PanelState::Maximized => {
                let target = self.layer.with_translation_y(self.arrange_translation_y());
                self.layer = target;
                self.scene.snap_layer(target);
            }
            PanelState::Minimized => {
                let target = self.layer.with_translation_y(self.hide_target());
                self.layer = target;
                self.scene
                    .animate_layer(target, self.config.animation_duration_ms);
            }
            PanelState::Hidden | PanelState::Dismissing => {}
        }
    }

    fn finish_close(&mut self) {
        self.scene.set_visibility(Visibility::Gone);
        if self.content_attached {
            self.scene.detach_content();
            self.content_attached = false;
        }
        self.state = PanelState::Hidden;
    }

    fn finish_stop(&mut self) {
        self.scene.set_visibility(Visibility::Invisible);
        self.drag_translation_y = 0.0;
        self.layer.translation_y = 0.0;
        self.scene.snap_layer(self.layer);
        if self.content_attached {
            self.scene.detach_content();
            self.content_attached = false;
        }
        self.state = PanelState::Hidden;
    }
}

