// SPDX-License-Identifier: MPL-2.0
use std::sync::{Arc, Mutex};
use std::time::Duration;

use snackbar_queue::config::{self, Config};
use snackbar_queue::diagnostics::{DiagnosticsCollector, SnackbarEvent};
use snackbar_queue::{Callback, DismissEvent, Snackbar, SnackbarDuration, SnackbarManager};
use tempfile::tempdir;

type Log = Arc<Mutex<Vec<String>>>;

struct Recorder {
    name: &'static str,
    log: Log,
}

impl Callback for Recorder {
    fn on_shown(&self) {
        self.log.lock().unwrap().push(format!("{} shown", self.name));
    }

    fn on_dismissed(&self, event: DismissEvent) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{} {}", self.name, event));
    }
}

fn snackbar(manager: &SnackbarManager, name: &'static str, log: &Log) -> Snackbar {
    Snackbar::with_manager(manager.clone(), name, SnackbarDuration::Short).set_callback(Arc::new(
        Recorder {
            name,
            log: Arc::clone(log),
        },
    ))
}

#[test]
fn test_configured_timing_reaches_manager() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut written = Config::default();
    written.snackbar.short_duration_ms = Some(800);
    written.snackbar.long_duration_ms = Some(4000);
    written.snackbar.default_duration = Some("long".to_string());
    config::save_to_path(&written, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let manager = SnackbarManager::with_timing(loaded.snackbar.timeout_table());

    assert_eq!(manager.timing().short(), Duration::from_millis(800));
    assert_eq!(manager.timing().long(), Duration::from_millis(4000));
    assert_eq!(
        loaded.snackbar.default_duration().unwrap(),
        SnackbarDuration::Long
    );
}

#[test]
fn test_global_manager_is_shared_by_snackbars() {
    let first = Snackbar::make("one", SnackbarDuration::Short);
    let second = Snackbar::make("two", SnackbarDuration::Short);
    assert!(first.manager().ptr_eq(second.manager()));
}

#[tokio::test(start_paused = true)]
async fn test_three_snackbars_in_a_row() {
    let manager = SnackbarManager::new();
    let mut collector = DiagnosticsCollector::new(Default::default());
    manager.set_diagnostics(collector.handle());
    let log = Log::default();

    let a = snackbar(&manager, "a", &log);
    let b = snackbar(&manager, "b", &log);
    let c = snackbar(&manager, "c", &log);

    a.show();
    tokio::time::sleep(Duration::from_millis(300)).await;
    b.show();
    // `b` waits while `a` hides; `c` takes its place.
    c.show();
    assert!(!b.is_shown());

    // a hides (250), c shows (250), Short timeout (1500), c hides (250).
    tokio::time::sleep(Duration::from_millis(2_300)).await;

    assert_eq!(
        log.lock().unwrap().clone(),
        ["a shown", "a consecutive", "c shown", "c timeout"]
    );
    assert!(!manager.has_current());
    assert!(!manager.has_next());

    collector.process_pending();
    let dropped: Vec<u64> = collector
        .snackbar_events()
        .iter()
        .filter_map(|event| match event {
            SnackbarEvent::Dropped { record } => Some(*record),
            _ => None,
        })
        .collect();
    assert_eq!(dropped.len(), 1, "b was replaced before being shown");

    let report = collector.export_json().expect("report serializes");
    assert!(report.contains("\"step\": \"dropped\""));
}
