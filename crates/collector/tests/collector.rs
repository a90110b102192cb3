mod common;

use std::time::Duration;

use common::{runner, FakeSource};
use hc_collector::Collector;
use serde_json::json;
use sqlx::SqlitePool;

/// Poll until `check` holds or the deadline passes.
async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[sqlx::test(migrations = "../db/migrations")]
async fn start_runs_first_cycle_immediately(pool: SqlitePool) {
    let (source, runner) = runner(pool);
    FakeSource::set(&source.war, json!({"war_id": 801}));
    let store = runner.store().clone();
    let collector = Collector::new(runner, Duration::from_secs(3600));

    assert!(!collector.is_running());
    assert!(collector.start().await);
    assert!(collector.is_running());

    assert!(
        eventually(|| {
            let store = store.clone();
            async move { store.get_upstream_status().await }
        })
        .await
    );
    assert!(store.get_latest_war_status().await.is_some());

    assert!(collector.stop().await);
    assert!(!collector.is_running());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn start_and_stop_are_idempotent(pool: SqlitePool) {
    let (_source, runner) = runner(pool);
    let collector = Collector::new(runner, Duration::from_secs(3600));

    assert!(!collector.stop().await);
    assert!(collector.start().await);
    assert!(!collector.start().await);
    assert!(collector.is_running());
    assert!(collector.stop().await);
    assert!(!collector.stop().await);
    assert!(!collector.is_running());

    // Restartable after a stop.
    assert!(collector.start().await);
    assert!(collector.stop().await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cycles_repeat_on_interval_and_survive_failures(pool: SqlitePool) {
    let (source, runner) = runner(pool);
    *source.panic_on.lock().unwrap() = Some("war_status");
    let collector = Collector::new(runner, Duration::from_millis(50));

    collector.start().await;
    // Each cycle panics on its first fetch, so every call is one cycle.
    assert!(
        eventually(|| {
            let source = source.clone();
            async move { source.calls() >= 3 }
        })
        .await
    );
    assert!(collector.is_running());
    collector.stop().await;

    let after_stop = source.calls();
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(source.calls(), after_stop);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn abandoned_stop_still_marks_stopped(pool: SqlitePool) {
    let (source, runner) = runner(pool);
    *source.delay.lock().unwrap() = Some(Duration::from_millis(400));
    let collector = Collector::new(runner, Duration::from_secs(3600));

    assert!(collector.start().await);
    // Let the first cycle reach the slow fetch.
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The in-flight cycle outlives the caller's patience.
    let waited = tokio::time::timeout(Duration::from_millis(10), collector.stop()).await;
    assert!(waited.is_err());
    assert!(!collector.is_running());
    assert!(!collector.stop().await);

    // The detached cycle still runs to completion.
    assert!(
        eventually(|| {
            let source = source.clone();
            async move { source.calls() >= 6 }
        })
        .await
    );
}
