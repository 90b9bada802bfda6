//! Drives a floating panel through a full session against the recording
//! scene: start, drag, a snackbar passing by, a dismissal drag, teardown.
//! Every scene command the panel issues is printed as it happens.

use std::cell::RefCell;
use std::rc::Rc;

use floatmode_testing::PanelHarness;
use floatmode_ui::{DependencyChange, HideDirection, PanelConfig, ResId};

fn dump_commands(harness: &PanelHarness, label: &str) {
    println!("-- {label}");
    for command in harness.scene.commands() {
        println!("   {command:?}");
    }
    harness.scene.clear();
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Floatmode Headless Demo ===");
    println!("A 300x100 panel at y=100 in a 1000-tall container.");
    println!();

    let harness = PanelHarness::with_config(
        PanelConfig::default().with_hide_direction(HideDirection::Bottom),
    );
    let dismissed = Rc::new(RefCell::new(false));
    {
        let dismissed = Rc::clone(&dismissed);
        harness.panel.set_on_dismiss(Some(Rc::new(move || {
            *dismissed.borrow_mut() = true;
            log::info!("panel asked to be dismissed");
        })));
    }

    harness.start_ready(ResId(1));
    dump_commands(&harness, "start + first layout");

    harness.press(160.0, 410.0);
    harness.drag_to(160.0, 460.0);
    harness.drag_to(160.0, 510.0);
    harness.release_at(160.0, 510.0);
    harness.advance(harness.panel.animation_duration_ms());
    dump_commands(&harness, "vertical drag, released well below the threshold");

    // A snackbar slides in; the panel keeps its bottom clear of it.
    harness
        .panel
        .on_dependency_changed(DependencyChange::TransientMessageMoved {
            height: 150.0,
            translation_y: 0.0,
        });
    dump_commands(&harness, "transient message appeared");
    harness
        .panel
        .on_dependency_changed(DependencyChange::TransientMessageMoved {
            height: 150.0,
            translation_y: 150.0,
        });
    dump_commands(&harness, "transient message slid away");

    // Scrolling content tucks the panel toward its hide target and back.
    harness.panel.on_nested_scroll(24.0);
    harness.panel.on_nested_scroll(-24.0);
    dump_commands(&harness, "nested scroll down, then up");

    // A sideways drag past the threshold: the fade previews the decision,
    // the release commits it.
    harness.press(160.0, 410.0);
    harness.drag_to(320.0, 410.0);
    harness.release_at(320.0, 410.0);
    dump_commands(&harness, "horizontal drag past the dismiss threshold");
    println!("dismiss listener fired: {}", dismissed.borrow());

    let snapshot = harness.panel.save_state(serde_json::Value::Null);
    println!("saved state: {snapshot}");

    harness.panel.stop();
    harness.advance(harness.panel.animation_duration_ms());
    dump_commands(&harness, "stop + deferred teardown");

    println!("final state: {:?}", harness.panel.state());
    Ok(())
}
