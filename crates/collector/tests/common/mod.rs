#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hc_collector::CycleRunner;
use hc_core::types::DbId;
use hc_db::CacheStore;
use hc_upstream::GameDataSource;
use serde_json::Value;
use sqlx::SqlitePool;

/// Scripted data source. Every resource defaults to unavailable.
#[derive(Default)]
pub struct FakeSource {
    pub war: Mutex<Option<Value>>,
    pub planets: Mutex<Option<Vec<Value>>>,
    pub planet: Mutex<Option<Value>>,
    pub campaigns: Mutex<Option<Vec<Value>>>,
    pub assignments: Mutex<Option<Vec<Value>>>,
    pub dispatches: Mutex<Option<Vec<Value>>>,
    pub planet_events: Mutex<Option<Vec<Value>>>,
    /// Name of the resource whose fetch panics.
    pub panic_on: Mutex<Option<&'static str>>,
    pub calls: AtomicUsize,
    /// Latency added to the war status fetch.
    pub delay: Mutex<Option<Duration>>,
}

impl FakeSource {
    pub fn set<T: Clone>(slot: &Mutex<Option<T>>, value: T) {
        *slot.lock().unwrap() = Some(value);
    }

    pub fn clear<T>(slot: &Mutex<Option<T>>) {
        *slot.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn serve<T: Clone>(&self, resource: &'static str, slot: &Mutex<Option<T>>) -> Option<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.panic_on.lock().unwrap() == Some(resource) {
            panic!("{resource} fetch exploded");
        }
        slot.lock().unwrap().clone()
    }
}

#[async_trait]
impl GameDataSource for FakeSource {
    async fn war_status(&self) -> Option<Value> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.serve("war_status", &self.war)
    }
    async fn planets(&self) -> Option<Vec<Value>> {
        self.serve("planets", &self.planets)
    }
    async fn planet(&self, _index: DbId) -> Option<Value> {
        self.serve("planet", &self.planet)
    }
    async fn campaigns(&self) -> Option<Vec<Value>> {
        self.serve("campaigns", &self.campaigns)
    }
    async fn assignments(&self) -> Option<Vec<Value>> {
        self.serve("assignments", &self.assignments)
    }
    async fn dispatches(&self) -> Option<Vec<Value>> {
        self.serve("dispatches", &self.dispatches)
    }
    async fn planet_events(&self) -> Option<Vec<Value>> {
        self.serve("planet_events", &self.planet_events)
    }
}

pub fn runner(pool: SqlitePool) -> (Arc<FakeSource>, CycleRunner) {
    let source = Arc::new(FakeSource::default());
    let runner = CycleRunner::new(source.clone(), CacheStore::new(pool));
    (source, runner)
}
