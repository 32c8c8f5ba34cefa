//! Runtime lifecycle: mounting, ticking, terminal behavior, teardown.

use std::thread;
use std::time::Duration;

use ratatui::layout::Rect;

use sah_countdown::config::{RenderVariant, WidgetOptions};
use sah_countdown::constants::DEFAULT_CONTAINER;
use sah_countdown::countdown::clock::MS_PER_SECOND;
use sah_countdown::countdown::{target_millis, TimerState};
use sah_countdown::flip::LoadStatus;
use sah_countdown::runtime::{DisplayState, InstanceId, WidgetRuntime};

fn runtime_with_container() -> WidgetRuntime {
    let mut runtime = WidgetRuntime::new();
    runtime.set_container(DEFAULT_CONTAINER, Rect::new(0, 0, 100, 50));
    runtime
}

fn panel_texts(runtime: &WidgetRuntime, id: InstanceId) -> Vec<String> {
    match runtime.instance(id).expect("instance missing").display() {
        DisplayState::Panels(groups) => groups.iter().map(|g| g.text()).collect(),
        other => panic!("expected static panels, got {other:?}"),
    }
}

#[test]
fn test_missing_container_aborts_init() {
    let mut runtime = WidgetRuntime::new();
    let mounted = runtime.init(&WidgetOptions::default(), 0);

    assert!(mounted.is_none());
    assert_eq!(runtime.instance_count(), 0);
    assert_eq!(runtime.style_count(), 0);
}

#[test]
fn test_init_registers_instance_and_style() {
    let mut runtime = runtime_with_container();
    let id = runtime.init(&WidgetOptions::default(), 0).unwrap();

    assert_eq!(runtime.instance_count(), 1);
    assert_eq!(runtime.style_count(), 1);
    assert_eq!(
        runtime.container(DEFAULT_CONTAINER),
        Some(Rect::new(0, 0, 100, 50))
    );
    let instance = runtime.instance(id).unwrap();
    assert_eq!(instance.config().container, DEFAULT_CONTAINER);
    assert!(instance.timer().is_running());
}

#[test]
fn test_first_render_shows_live_countdown() {
    let mut runtime = runtime_with_container();
    // 1 day, 1 hour, 1 minute, 1 second before the target
    let now = target_millis() - 90_061 * MS_PER_SECOND;
    let id = runtime.init(&WidgetOptions::default(), now).unwrap();

    assert_eq!(panel_texts(&runtime, id), vec!["001", "01", "01", "01"]);
}

#[test]
fn test_tick_cadence_updates_once_per_second() {
    let mut runtime = runtime_with_container();
    let now = target_millis() - 10 * MS_PER_SECOND;
    let id = runtime.init(&WidgetOptions::default(), now).unwrap();
    assert_eq!(panel_texts(&runtime, id)[3], "10");

    // Sub-second loop passes change nothing
    runtime.tick(now + 500);
    assert_eq!(panel_texts(&runtime, id)[3], "10");

    runtime.tick(now + 1_000);
    assert_eq!(panel_texts(&runtime, id)[3], "09");
    runtime.tick(now + 2_000);
    assert_eq!(panel_texts(&runtime, id)[3], "08");
}

#[test]
fn test_target_passing_is_terminal() {
    let mut runtime = runtime_with_container();
    let now = target_millis() - 1_500;
    let id = runtime.init(&WidgetOptions::default(), now).unwrap();
    assert_eq!(panel_texts(&runtime, id)[3], "01");

    // Still ahead of the target: zeros, but the schedule lives on
    runtime.tick(now + 1_000);
    assert_eq!(panel_texts(&runtime, id), vec!["000", "00", "00", "00"]);
    assert_eq!(
        runtime.instance(id).unwrap().timer().state(),
        TimerState::Running
    );

    // First tick past the target: final zeros, schedule cancelled
    runtime.tick(now + 2_000);
    assert_eq!(panel_texts(&runtime, id), vec!["000", "00", "00", "00"]);
    assert_eq!(
        runtime.instance(id).unwrap().timer().state(),
        TimerState::Stopped
    );

    // Advancing only the scheduler never mutates the display again
    for offset in [3_000, 10_000, 86_400_000] {
        runtime.tick(now + offset);
        assert_eq!(panel_texts(&runtime, id), vec!["000", "00", "00", "00"]);
        assert_eq!(
            runtime.instance(id).unwrap().timer().state(),
            TimerState::Stopped
        );
    }
}

#[test]
fn test_destroy_is_idempotent() {
    let mut runtime = runtime_with_container();
    let id = runtime.init(&WidgetOptions::default(), 0).unwrap();
    assert_eq!(runtime.instance_count(), 1);

    runtime.destroy(id);
    assert_eq!(runtime.instance_count(), 0);
    assert_eq!(runtime.style_count(), 0);
    assert!(runtime.instance(id).is_none());

    // Second teardown of the same handle: no-op, no panic
    runtime.destroy(id);
    assert_eq!(runtime.instance_count(), 0);
}

#[test]
fn test_instances_are_independent() {
    let mut runtime = runtime_with_container();
    runtime.set_container("sidebar", Rect::new(0, 0, 40, 20));

    let first = runtime.init(&WidgetOptions::default(), 0).unwrap();
    let second = runtime
        .init(
            &WidgetOptions {
                container: Some("sidebar".to_string()),
                theme: Some("dark".to_string()),
                ..WidgetOptions::default()
            },
            0,
        )
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(runtime.instance_count(), 2);
    assert_eq!(runtime.style_count(), 2);

    runtime.destroy(first);
    assert_eq!(runtime.instance_count(), 1);
    assert!(runtime.instance(second).is_some());
    assert_eq!(runtime.style_count(), 1);
}

#[test]
fn test_flip_variant_reaches_live_display() {
    let mut runtime = runtime_with_container();
    let options = WidgetOptions {
        variant: Some(RenderVariant::Flip),
        ..WidgetOptions::default()
    };

    let mut now = target_millis() - 90_061 * MS_PER_SECOND;
    let id = runtime.init(&options, now).unwrap();
    assert_eq!(runtime.flip_status(), LoadStatus::Loading);

    // Drive the loop until the bootstrap, settle, and arming stages pass
    let mut live = false;
    for _ in 0..400 {
        runtime.tick(now);
        if matches!(runtime.instance(id).unwrap().display(), DisplayState::Flip(_)) {
            live = true;
            break;
        }
        now += 50;
        thread::sleep(Duration::from_millis(5));
    }
    assert!(live, "flip instance never reached the live display");
    assert_eq!(runtime.flip_status(), LoadStatus::Ready);

    let instance = runtime.instance(id).unwrap();
    assert!(instance.timer().is_running());
    let DisplayState::Flip(panels) = instance.display() else {
        unreachable!()
    };
    assert_eq!(panels.days.value().len(), 3);
    assert_eq!(panels.hours.value().len(), 2);
    for panel in panels.panels() {
        assert!(panel.value().chars().all(|c| c.is_ascii_digit()));
    }

    runtime.destroy(id);
    assert_eq!(runtime.instance_count(), 0);
}

#[test]
fn test_flip_after_ready_mounts_synchronously() {
    let mut runtime = runtime_with_container();
    let options = WidgetOptions {
        variant: Some(RenderVariant::Flip),
        ..WidgetOptions::default()
    };

    let mut now = 0i64;
    let first = runtime.init(&options, now).unwrap();
    for _ in 0..400 {
        runtime.tick(now);
        if runtime.flip_status() == LoadStatus::Ready {
            break;
        }
        now += 50;
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(runtime.flip_status(), LoadStatus::Ready);

    // The engine is cached now: a fresh mount skips straight to settling
    let second = runtime.init(&options, now).unwrap();
    assert!(matches!(
        runtime.instance(second).unwrap().display(),
        DisplayState::FlipSettling { .. }
    ));

    runtime.destroy(first);
    runtime.destroy(second);
}
