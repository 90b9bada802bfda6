use std::cell::RefCell;

use floatmode_testing::{PanelHarness, SceneCommand};
use floatmode_ui::{
    DependencyChange, DependencyKind, FloatingPanel, HideDirection, PanelConfig, PanelState,
    ResId, Visibility,
};
use serde_json::json;

const CONTENT: ResId = ResId(7);

#[test]
fn start_attaches_content_and_waits_for_layout() {
    let harness = PanelHarness::new();
    harness.panel.start(CONTENT);

    assert!(harness.panel.is_started());
    assert_eq!(harness.panel.state(), PanelState::Minimized);
    assert!(harness.scene.content_attached());
    assert_eq!(harness.scene.visibility(), Some(Visibility::Visible));
    // Not maximized until the one-shot layout signal arrives.
    assert!(harness.scene.animations().is_empty());

    harness.panel.on_content_ready();
    assert_eq!(harness.panel.state(), PanelState::Maximized);
}

#[test]
fn open_always_passes_through_minimized_pose() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    let animations = harness.scene.animations();
    assert!(animations.len() >= 2);
    // Snap to the minimized pose first, then the animated expand.
    assert_eq!(animations[0].0.scale_x, 0.5);
    assert_eq!(animations[0].1, 0);
    assert_eq!(animations[1].0.scale_x, 1.0);
    assert_eq!(animations[1].0.alpha, 1.0);
    assert_eq!(animations[1].1, 400);

    // Same sequence when already maximized.
    harness.scene.clear();
    harness.panel.open(true);
    let animations = harness.scene.animations();
    assert_eq!(animations[0].0.scale_x, 0.5);
    assert_eq!(animations[1].0.scale_x, 1.0);
}

#[test]
fn content_ready_signal_is_one_shot() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    harness.scene.clear();
    harness.panel.on_content_ready();
    assert!(harness.scene.commands().is_empty());
}

#[test]
fn minimize_sets_pivot_and_half_pose() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);
    harness.scene.clear();

    harness.panel.minimize(true);

    assert_eq!(harness.panel.state(), PanelState::Minimized);
    let commands = harness.scene.commands();
    assert!(commands.contains(&SceneCommand::SetEnabled(false)));
    assert!(commands.contains(&SceneCommand::SetPivot(
        floatmode_graphics::Point::new(150.0, 0.0)
    )));
    let (target, duration) = *harness.scene.animations().last().expect("an animation");
    assert_eq!(target.scale_x, 0.5);
    assert_eq!(target.scale_y, 0.5);
    assert_eq!(target.alpha, 0.5);
    assert_eq!(duration, 400);
}

#[test]
fn maximize_restores_drag_offset() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    // Drag down by 30, then minimize and maximize again.
    harness.press(0.0, 0.0);
    harness.drag_to(0.0, 30.0);
    harness.release_at(0.0, 30.0);
    harness.panel.minimize(false);
    harness.scene.clear();

    harness.panel.maximize(true);
    let (target, duration) = *harness.scene.animations().last().expect("an animation");
    assert_eq!(target.translation_y, 30.0);
    assert_eq!(target.scale_x, 1.0);
    assert_eq!(target.alpha, 1.0);
    assert_eq!(duration, 400);
}

#[test]
fn nested_scroll_drives_poses() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    harness.panel.on_nested_scroll(12.0);
    assert_eq!(harness.panel.state(), PanelState::Minimized);

    harness.panel.on_nested_scroll(-3.0);
    assert_eq!(harness.panel.state(), PanelState::Maximized);

    harness.scene.clear();
    harness.panel.on_nested_scroll(0.0);
    assert!(harness.scene.commands().is_empty());
}

#[test]
fn operations_on_unstarted_panel_are_no_ops() {
    let harness = PanelHarness::new();
    harness.scene.clear();

    harness.panel.stop();
    harness.panel.close(true);
    harness.panel.maximize(true);
    harness.panel.minimize(true);
    harness.panel.on_nested_scroll(5.0);

    assert!(harness.scene.commands().is_empty());
    assert_eq!(harness.panel.state(), PanelState::Hidden);
    assert_eq!(harness.scheduler.pending_tasks(), 0);
}

#[test]
fn dismiss_listener_fires_exactly_once() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    let fired = std::rc::Rc::new(RefCell::new(0u32));
    {
        let fired = std::rc::Rc::clone(&fired);
        harness
            .panel
            .set_on_dismiss(Some(std::rc::Rc::new(move || *fired.borrow_mut() += 1)));
    }

    harness.press(0.0, 0.0);
    harness.drag_to(100.0, 0.0);
    // q = 0.333 < 0.4: preview only, no decision yet.
    assert_eq!(*fired.borrow(), 0);
    assert_eq!(harness.scene.layer().expect("a layer").alpha, 1.0);

    harness.drag_to(150.0, 0.0);
    let alpha = harness.scene.layer().expect("a layer").alpha;
    assert!((alpha - 0.8333).abs() < 1e-3, "alpha was {alpha}");
    assert_eq!(*fired.borrow(), 0);

    harness.release_at(150.0, 0.0);
    assert_eq!(*fired.borrow(), 1);
    // Dismissal is a notification: the panel does not hide itself.
    assert!(harness.panel.is_started());
    assert_eq!(harness.scene.visibility(), Some(Visibility::Visible));
}

#[test]
fn release_settles_horizontal_translation() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);
    harness.press(0.0, 0.0);
    harness.drag_to(50.0, 20.0);
    harness.scene.clear();

    harness.release_at(50.0, 20.0);

    let (target, duration) = *harness.scene.animations().last().expect("settle animation");
    assert_eq!(target.translation_x, 0.0);
    assert_eq!(target.translation_y, 20.0);
    assert_eq!(duration, 400);
}

#[test]
fn disabled_drag_passes_events_through() {
    let harness = PanelHarness::with_config(PanelConfig::default().with_can_drag(false));
    harness.start_ready(CONTENT);
    harness.scene.clear();

    assert!(!harness.press(0.0, 0.0));
    assert!(!harness.drag_to(100.0, 0.0));
    assert!(!harness.release_at(100.0, 0.0));
    assert!(harness.scene.commands().is_empty());
}

#[test]
fn disabled_dismissal_never_touches_alpha() {
    let harness = PanelHarness::with_config(PanelConfig::default().with_can_dismiss(false));
    harness.start_ready(CONTENT);

    harness.press(0.0, 0.0);
    harness.drag_to(290.0, 0.0);
    assert_eq!(harness.scene.layer().expect("a layer").alpha, 1.0);

    let fired = std::rc::Rc::new(RefCell::new(false));
    {
        let fired = std::rc::Rc::clone(&fired);
        harness
            .panel
            .set_on_dismiss(Some(std::rc::Rc::new(move || *fired.borrow_mut() = true)));
    }
    harness.release_at(290.0, 0.0);
    assert!(!*fired.borrow());
}

#[test]
fn stop_tears_down_after_animation_duration() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);
    harness.press(0.0, 0.0);
    harness.drag_to(0.0, 60.0);
    harness.release_at(0.0, 60.0);

    harness.panel.stop();
    assert_eq!(harness.panel.state(), PanelState::Dismissing);
    assert_eq!(harness.panel.content(), None);
    // Still attached until the deferred step runs.
    assert!(harness.scene.content_attached());

    harness.advance(400);
    assert_eq!(harness.panel.state(), PanelState::Hidden);
    assert!(!harness.panel.is_started());
    assert!(!harness.scene.content_attached());
    assert_eq!(harness.scene.visibility(), Some(Visibility::Invisible));
    assert_eq!(harness.scene.layer().expect("a layer").translation_y, 0.0);
}

#[test]
fn double_stop_does_not_double_detach() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    harness.panel.stop();
    harness.panel.stop();
    harness.advance(1000);

    assert_eq!(harness.scene.detach_count(), 1);
    assert_eq!(harness.panel.state(), PanelState::Hidden);
}

#[test]
fn deferred_stop_outlives_a_restart() {
    // The deferred hide is deliberately not cancelled: a start() inside the
    // window loses to it.
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    harness.panel.stop();
    harness.advance(200);
    harness.start_ready(ResId(8));
    assert!(harness.panel.is_started());

    harness.advance(200);
    assert!(!harness.panel.is_started());
    assert_eq!(harness.scene.visibility(), Some(Visibility::Invisible));
}

#[test]
fn close_hides_but_keeps_content_resource() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    harness.panel.close(true);
    assert_eq!(harness.panel.state(), PanelState::Dismissing);
    assert_eq!(harness.panel.content(), Some(CONTENT));

    harness.advance(400);
    assert_eq!(harness.panel.state(), PanelState::Hidden);
    assert!(!harness.scene.content_attached());
    assert_eq!(harness.scene.visibility(), Some(Visibility::Gone));
    assert_eq!(harness.panel.content(), Some(CONTENT));
}

#[test]
fn close_without_animation_hides_immediately() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    harness.panel.close(false);
    assert_eq!(harness.panel.state(), PanelState::Hidden);
    assert_eq!(harness.scene.visibility(), Some(Visibility::Gone));
    assert_eq!(harness.scheduler.pending_tasks(), 0);
}

#[test]
fn restart_replaces_attached_content() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);
    harness.scene.clear();

    harness.panel.start(ResId(8));

    let commands = harness.scene.commands();
    assert_eq!(
        commands,
        vec![
            SceneCommand::DetachContent,
            SceneCommand::AttachContent(ResId(8)),
        ]
    );
    assert_eq!(harness.panel.content(), Some(ResId(8)));
}

#[test]
fn app_bar_resize_shifts_panel_instantly() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);
    harness.scene.clear();

    harness
        .panel
        .on_dependency_changed(DependencyChange::AppBarResized { height: 80.0 });

    assert_eq!(
        harness.scene.commands(),
        vec![SceneCommand::OffsetVertically(80.0)]
    );
    let geometry = harness.panel.geometry();
    assert_eq!(geometry.top, 180.0);
    assert_eq!(geometry.bottom, 280.0);

    // Same height again: nothing to do.
    harness.scene.clear();
    harness
        .panel
        .on_dependency_changed(DependencyChange::AppBarResized { height: 80.0 });
    assert!(harness.scene.commands().is_empty());
}

#[test]
fn transient_message_clamps_maximized_panel() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    // Drag the panel down near the bottom edge.
    harness.press(0.0, 0.0);
    harness.drag_to(0.0, 780.0);
    harness.release_at(0.0, 780.0);
    // Panel bottom sits at 200 + 780 = 980.
    harness.scene.clear();

    // A 150-tall message fully shown leaves room only up to y = 850.
    harness
        .panel
        .on_dependency_changed(DependencyChange::TransientMessageMoved {
            height: 150.0,
            translation_y: 0.0,
        });

    let layer = harness.scene.layer().expect("re-arranged layer");
    assert_eq!(layer.translation_y, 650.0);
}

#[test]
fn panel_reacts_only_to_known_dependency_kinds() {
    assert!(FloatingPanel::depends_on(DependencyKind::AppBar));
    assert!(FloatingPanel::depends_on(DependencyKind::TransientMessage));
    assert!(!FloatingPanel::depends_on(DependencyKind::Other));
}

#[test]
fn hide_direction_controls_minimize_target() {
    let harness = PanelHarness::new();
    harness.panel.set_hide_direction(HideDirection::Bottom);
    harness.start_ready(CONTENT);
    harness.scene.clear();

    harness.panel.minimize(false);
    let (target, _) = *harness.scene.animations().last().expect("an animation");
    // 1000 - 200 + 100 * 0.6
    assert_eq!(target.translation_y, 860.0);
}

#[test]
fn setters_mirror_into_the_scene() {
    let harness = PanelHarness::new();
    harness.scene.clear();

    harness.panel.set_drag_icon(ResId(33));
    harness.panel.set_can_drag(false);

    assert_eq!(
        harness.scene.commands(),
        vec![
            SceneCommand::SetHandleIcon(ResId(33)),
            SceneCommand::SetHandleVisibility(Visibility::Invisible),
        ]
    );
    assert_eq!(harness.panel.drag_icon(), ResId(33));
    assert!(!harness.panel.can_drag());
}

#[test]
fn threshold_setter_clamps() {
    let harness = PanelHarness::new();
    harness.panel.set_dismiss_threshold(1.8);
    assert_eq!(harness.panel.dismiss_threshold(), 1.0);
    harness.panel.set_dismiss_threshold(-0.2);
    assert_eq!(harness.panel.dismiss_threshold(), 0.0);
}

#[test]
fn save_restore_round_trips_config_and_behavior() {
    let source = PanelHarness::new();
    source.panel.set_drag_icon(ResId(5));
    source.panel.set_can_dismiss(false);
    source.panel.set_dismiss_threshold(0.6);
    source.panel.set_animation_duration_ms(250);
    source.panel.set_hide_direction(HideDirection::Top);

    let snapshot = source.panel.save_state(json!({"base": [1, 2, 3]}));

    let restored = PanelHarness::new();
    restored.scene.clear();
    let super_state = restored.panel.restore_state(&snapshot);

    assert_eq!(super_state, json!({"base": [1, 2, 3]}));
    assert_eq!(restored.panel.config(), source.panel.config());
    // Restore re-runs init: handle icon and visibility are re-applied.
    let commands = restored.scene.commands();
    assert!(commands.contains(&SceneCommand::SetHandleIcon(ResId(5))));
    assert!(commands.contains(&SceneCommand::SetVisibility(Visibility::Invisible)));

    // The restored panel behaves like a freshly configured one: threshold 0.6
    // with dismissal off means a far drag never notifies.
    let fired = std::rc::Rc::new(RefCell::new(false));
    {
        let fired = std::rc::Rc::clone(&fired);
        restored
            .panel
            .set_on_dismiss(Some(std::rc::Rc::new(move || *fired.borrow_mut() = true)));
    }
    restored.start_ready(CONTENT);
    restored.press(0.0, 0.0);
    restored.release_at(290.0, 0.0);
    assert!(!*fired.borrow());
}

#[test]
fn restore_from_garbage_falls_back_to_defaults() {
    let harness = PanelHarness::new();
    harness.panel.set_animation_duration_ms(999);

    harness.panel.restore_state(&json!(42));
    assert_eq!(harness.panel.config(), PanelConfig::default());
}

#[test]
fn replacing_dismiss_listener_drops_the_old_one() {
    let harness = PanelHarness::new();
    harness.start_ready(CONTENT);

    let first = std::rc::Rc::new(RefCell::new(0u32));
    let second = std::rc::Rc::new(RefCell::new(0u32));
    {
        let first = std::rc::Rc::clone(&first);
        harness
            .panel
            .set_on_dismiss(Some(std::rc::Rc::new(move || *first.borrow_mut() += 1)));
    }
    {
        let second = std::rc::Rc::clone(&second);
        harness
            .panel
            .set_on_dismiss(Some(std::rc::Rc::new(move || *second.borrow_mut() += 1)));
    }

    harness.press(0.0, 0.0);
    harness.release_at(200.0, 0.0);
    assert_eq!(*first.borrow(), 0);
    assert_eq!(*second.borrow(), 1);

    // Cleared listener: dismissal passes silently.
    harness.panel.set_on_dismiss(None);
    harness.press(0.0, 0.0);
    harness.release_at(200.0, 0.0);
    assert_eq!(*second.borrow(), 1);
}
