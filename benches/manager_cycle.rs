// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use snackbar_queue::{Callback, DismissEvent, SnackbarDuration, SnackbarManager};
use std::hint::black_box;
use std::sync::{Arc, Weak};

/// Presenter that acknowledges every dismissal right away.
struct Eager {
    manager: SnackbarManager,
    me: Weak<Eager>,
}

impl Callback for Eager {
    fn on_shown(&self) {}

    fn on_dismissed(&self, _event: DismissEvent) {
        if let Some(me) = self.me.upgrade() {
            let me: Arc<dyn Callback> = me;
            self.manager.on_dismissed(&me);
        }
    }
}

fn presenter(manager: &SnackbarManager) -> Arc<dyn Callback> {
    Arc::new_cyclic(|me| Eager {
        manager: manager.clone(),
        me: me.clone(),
    })
}

fn manager_cycle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("manager_cycle");
    // No runtime: timeouts are skipped, only queue bookkeeping is measured.
    let manager = SnackbarManager::new();
    let first = presenter(&manager);
    let second = presenter(&manager);

    group.bench_function("show_dismiss", |b| {
        b.iter(|| {
            manager.show(black_box(&first), SnackbarDuration::Indefinite);
            manager.dismiss(black_box(&first), DismissEvent::Manual);
        });
    });

    group.bench_function("displace", |b| {
        b.iter(|| {
            manager.show(black_box(&first), SnackbarDuration::Indefinite);
            manager.show(black_box(&second), SnackbarDuration::Indefinite);
        });
    });

    group.finish();
}

criterion_group!(benches, manager_cycle_benchmark);
criterion_main!(benches);
