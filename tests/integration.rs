// SPDX-License-Identifier: MPL-2.0
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tempfile::tempdir;
use toast_queue::config::{self, Config};
use toast_queue::diagnostics::{DiagnosticReport, DiagnosticsCollector};
use toast_queue::notifications::{
    global, Clock, Manager, ManualClock, ShowRequest, TimerDriver, TimerKind, ToastPatch, TokioClock,
    Variant,
};
use toast_queue::render::{format_state, StyleTable, ToastStyle};

fn manual_manager(config: &Config) -> (Manager<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let manager = Manager::with_clock(config.manager_settings(), clock.clone());
    (manager, clock)
}

#[test]
fn settings_file_drives_queue_limits_and_timing() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    let written = Config {
        max_toasts: Some(2),
        default_duration_ms: Some(300),
        remove_delay_ms: Some(100),
        diagnostics_capacity: None,
    };
    config::save_to_path(&written, &path).expect("Failed to write config");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let (mut manager, clock) = manual_manager(&loaded);

    let first = manager.show(ShowRequest::new().title("a")).id();
    manager.show(ShowRequest::new().title("b"));
    manager.show(ShowRequest::new().title("c"));
    assert_eq!(manager.len(), 2);
    assert!(!manager.contains(first));

    clock.advance(Duration::from_millis(300));
    assert_eq!(manager.tick(), 2);
    assert_eq!(manager.visible_count(), 0);

    clock.advance(Duration::from_millis(100));
    assert_eq!(manager.tick(), 2);
    assert!(manager.is_empty());
}

#[test]
fn saved_scenario_renders_each_snapshot() {
    let (mut manager, clock) = manual_manager(&Config::default());
    let table = StyleTable::default();
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);
    manager.subscribe(move |state| sink.borrow_mut().push(format_state(state, &table)));

    let id = manager
        .show(ShowRequest::new().title("Saved").duration(Duration::from_millis(1000)))
        .id();
    clock.advance(Duration::from_millis(1000));
    manager.tick();
    clock.advance(Duration::from_millis(5000));
    manager.tick();

    assert_eq!(
        *frames.borrow(),
        vec![
            format!("[neutral] #{id} Saved"),
            format!("[neutral] #{id} Saved (dismissed)"),
            "(no notifications)".to_string(),
        ]
    );
}

#[test]
fn update_handle_restarts_timer_and_changes_style() {
    let (mut manager, clock) = manual_manager(&Config::default());
    let handle = manager.show(ShowRequest::info("Uploading"));

    clock.advance(Duration::from_millis(4000));
    handle.update(
        &mut manager,
        ToastPatch::new()
            .variant(Variant::Destructive)
            .title("Upload failed")
            .duration(Duration::from_millis(200)),
    );

    let table = StyleTable::default();
    let notification = manager.get(handle.id()).expect("still tracked");
    assert_eq!(table.style_for(notification.variant()), ToastStyle::Destructive);
    assert_eq!(
        manager.timer_deadline(handle.id(), TimerKind::Dismiss),
        Some(clock.now() + Duration::from_millis(200))
    );

    clock.advance(Duration::from_millis(200));
    manager.tick();
    assert_eq!(manager.visible_count(), 0);
}

#[test]
fn diagnostics_report_is_exported_as_json() {
    let (mut manager, clock) = manual_manager(&Config::default());
    let mut collector = DiagnosticsCollector::new(Config::default().diagnostics_capacity());
    manager.set_diagnostics(collector.handle());

    let id = manager.show(ShowRequest::success("Exported")).id();
    manager.dismiss(Some(id));
    clock.advance(Duration::from_millis(5000));
    manager.tick();
    manager.remove(Some(id));
    collector.process_pending();

    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("report.json");
    let written = collector
        .export_to_file(&path)
        .expect("Failed to export report");

    let content = std::fs::read_to_string(written).expect("Failed to read report");
    let report: DiagnosticReport = serde_json::from_str(&content).expect("Invalid report");
    assert_eq!(report.metadata.event_count, 4);
    assert_eq!(report.summary.event_counts.get("shown"), Some(&1));
    assert_eq!(report.summary.event_counts.get("dismissed"), Some(&1));
    assert_eq!(report.summary.event_counts.get("removed"), Some(&1));
    assert_eq!(report.summary.event_counts.get("warning"), Some(&1));
}

#[test]
fn global_queue_defers_observer_reentry() {
    global::reset();
    let dismissed_from_observer = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&dismissed_from_observer);
    let subscription = global::subscribe(move |state| {
        if let Some(first) = state.notifications.first() {
            if first.is_visible() && !*flag.borrow() {
                *flag.borrow_mut() = true;
                global::dismiss(Some(first.id()));
            }
        }
    });

    let toast = global::show(ShowRequest::warning("Low battery"));
    subscription.unsubscribe();

    let snapshot = global::snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id(), toast.id());
    assert!(!snapshot[0].is_visible());
}

#[tokio::test(start_paused = true)]
async fn tokio_driver_runs_queue_to_empty() {
    global::init_with_clock(Config::default().manager_settings(), TokioClock);
    let driver = TimerDriver::install();
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&sizes);
    let _subscription = global::subscribe(move |state| sink.borrow_mut().push(state.notifications.len()));

    let scenario = async {
        global::show(ShowRequest::new().duration(Duration::from_millis(100)));
        global::show(ShowRequest::new().duration(Duration::from_millis(200)));
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(global::snapshot().is_empty());
        driver.shutdown();
    };
    tokio::join!(driver.run(), scenario);

    // two shows, two dismissals, two removals
    assert_eq!(*sizes.borrow(), vec![1, 2, 2, 2, 1, 0]);
}
