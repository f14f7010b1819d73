//! Demo: optimistic mutations, a drag-reorder, and a sync drain with
//! injected failures, narrated on stdout.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use tsumugi_core::domain::{CategoryId, Indicator};
use tsumugi_core::drag::DragController;
use tsumugi_core::geometry::{Point, Rect};
use tsumugi_core::impls::MemoryRemote;
use tsumugi_core::ports::{SystemClock, UlidGenerator};
use tsumugi_core::queue::{ActivityQueue, RetryPolicy};
use tsumugi_core::store::{ParentTaskEdit, Store};
use tsumugi_core::sync::{SyncConfig, SyncLoop};

fn print_active(store: &Store) {
    let titles: Vec<String> = store
        .active_categories()
        .iter()
        .map(|c| format!("{} ({})", c.title, c.indicator.as_str()))
        .collect();
    println!("active categories: {}", titles.join(", "));
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    // (A) Wire the store, queue, remote and sync loop together.
    //     The remote is scripted to fail its first two calls, so the demo
    //     shows the retry path too.
    let queue = Arc::new(ActivityQueue::new());
    let store = Arc::new(Store::new(
        Arc::clone(&queue),
        Arc::new(UlidGenerator::new(SystemClock)),
        Arc::new(SystemClock),
    ));
    let remote = Arc::new(MemoryRemote::new());
    remote.fail_next(2);

    let sync = SyncLoop::new(
        Arc::clone(&store),
        Arc::clone(&queue),
        Arc::clone(&remote) as _,
        SyncConfig {
            retry: RetryPolicy {
                base_delay: Duration::from_millis(200),
                multiplier: 2.0,
                max_delay: Duration::from_secs(2),
            },
        },
    );
    let handle = sync.spawn();

    // (B) Optimistic mutations: visible immediately, synced later.
    let work = store.add_category("Work", Indicator::Blue);
    let home = store.add_category("Home", Indicator::Green);
    let errands = store.add_category("Errands", Indicator::Yellow);
    print_active(&store);

    // (C) A drag gesture: three stacked rows, "Errands" dropped above
    //     "Work" takes the top of the list.
    let dnd: DragController<CategoryId> = DragController::new();
    for (index, category) in store.active_categories().iter().enumerate() {
        let y = 10.0 + index as f64 * 60.0;
        dnd.register_target(category.id, Rect::new(0.0, y, 240.0, 56.0));
    }
    dnd.gesture_start(errands, Point::new(120.0, 142.0));
    dnd.pointer_move(Point::new(120.0, 12.0));
    if let Some(event) = dnd.gesture_end() {
        println!("drop: {event:?}");
        store.apply_drop(event);
    }
    print_active(&store);

    // (D) Tasks: completing the parent stamps both children.
    let report = store.add_parent_task("quarterly report", Some(work));
    store.add_child_task(report, "outline");
    store.add_child_task(report, "draft");
    store.edit_parent_task(
        report,
        ParentTaskEdit {
            completed: Some(true),
            ..Default::default()
        },
    );
    store.toggle_archive(home);
    println!(
        "archived: {:?}",
        store
            .archived_categories()
            .iter()
            .map(|c| c.title.as_str())
            .collect::<Vec<_>>()
    );

    // (E) Watch the queue drain. Failures never surface here; the only
    //     trace is the pending count holding steady while the loop backs
    //     off.
    loop {
        let status = queue.status();
        println!(
            "queue: pending={} syncing={} attempts={} last_error={:?}",
            status.pending, status.syncing, status.head_attempts, status.last_error
        );
        if status.pending == 0 {
            break;
        }
        sleep(Duration::from_millis(250)).await;
    }

    println!("remote rows: {}", remote.row_count());
    if let Some(row) = remote.row(work) {
        println!(
            "persisted {}: {}",
            work,
            serde_json::to_string_pretty(&row).unwrap()
        );
    }

    handle.shutdown_and_join().await;
}
