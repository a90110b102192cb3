mod common;

use common::{runner, FakeSource};
use hc_collector::{Lookup, ResourceQuery};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../db/migrations")]
async fn live_planets_are_written_through(pool: SqlitePool) {
    let (source, runner) = runner(pool);
    let store = runner.store().clone();
    let query = ResourceQuery::new(runner);
    FakeSource::set(&source.planets, vec![json!({"index": 0, "name": "Super Earth"})]);

    assert_eq!(
        query.planets().await,
        Lookup::Live(vec![json!({"index": 0, "name": "Super Earth"})])
    );
    assert_eq!(store.get_latest_planets_snapshot().await.len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn planets_fall_back_to_snapshot_then_unavailable(pool: SqlitePool) {
    let (source, runner) = runner(pool);
    let store = runner.store().clone();
    let query = ResourceQuery::new(runner);

    assert_eq!(query.planets().await, Lookup::Unavailable);

    store.save_planet_snapshot(&[json!({"index": 2})]).await;
    assert_eq!(query.planets().await, Lookup::Cached(vec![json!({"index": 2})]));

    // A live answer never consults the cache.
    FakeSource::set(&source.planets, vec![json!({"index": 7})]);
    assert_eq!(query.planets().await, Lookup::Live(vec![json!({"index": 7})]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn live_empty_campaigns_are_not_unavailable(pool: SqlitePool) {
    let (source, runner) = runner(pool);
    let query = ResourceQuery::new(runner);

    assert_eq!(query.campaigns().await, Lookup::Unavailable);
    FakeSource::set(&source.campaigns, Vec::new());
    assert_eq!(query.campaigns().await, Lookup::Live(Vec::new()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn campaigns_fall_back_to_snapshot(pool: SqlitePool) {
    let (source, runner) = runner(pool);
    let query = ResourceQuery::new(runner);
    FakeSource::set(&source.campaigns, vec![json!({"id": 1, "planetIndex": 3})]);
    assert!(query.campaigns().await.is_live());

    FakeSource::clear(&source.campaigns);
    assert_eq!(
        query.campaigns().await,
        Lookup::Cached(vec![json!({"id": 1, "planetIndex": 3})])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn factions_and_biomes_fall_back(pool: SqlitePool) {
    let (source, runner) = runner(pool);
    let store = runner.store().clone();
    let query = ResourceQuery::new(runner);

    assert_eq!(query.factions().await, Lookup::Unavailable);
    assert_eq!(query.biomes().await, Lookup::Unavailable);

    store
        .save_war_status(&json!({"war_id": 1, "factions": [{"name": "Humans"}]}))
        .await;
    store
        .save_planet_snapshot(&[json!({"index": 0, "biome": {"name": "Ice"}})])
        .await;
    assert_eq!(query.factions().await, Lookup::Cached(json!([{"name": "Humans"}])));
    assert_eq!(query.biomes().await, Lookup::Cached(vec![json!({"name": "Ice"})]));

    FakeSource::set(&source.war, json!({"factions": ["Automaton"]}));
    assert_eq!(query.factions().await, Lookup::Live(json!(["Automaton"])));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn single_planet_falls_back_to_history(pool: SqlitePool) {
    let (_source, runner) = runner(pool);
    let store = runner.store().clone();
    let query = ResourceQuery::new(runner);

    assert_eq!(query.planet(4).await, Lookup::Unavailable);
    store.save_planet_status(4, &json!({"index": 4, "owner": "Humans"})).await;
    assert_eq!(
        query.planet(4).await,
        Lookup::Cached(json!({"index": 4, "owner": "Humans"}))
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refreshes_are_live_only(pool: SqlitePool) {
    let (source, runner) = runner(pool);
    let store = runner.store().clone();
    let query = ResourceQuery::new(runner);

    store.save_war_status(&json!({"war_id": 1})).await;
    assert!(query.refresh_war_status().await.is_none());
    assert!(query.refresh_statistics().await.is_none());
    assert!(query.refresh_assignments().await.is_none());

    FakeSource::set(&source.war, json!({"war_id": 2, "statistics": {"deaths": 9}}));
    FakeSource::set(&source.dispatches, vec![json!({"id": 1, "message": "News"})]);
    assert_eq!(query.refresh_war_status().await.unwrap()["war_id"], 2);
    assert_eq!(query.refresh_statistics().await, Some(json!({"deaths": 9})));
    assert_eq!(query.refresh_dispatches().await.unwrap().len(), 1);
    assert_eq!(store.get_latest_statistics().await, Some(json!({"deaths": 9})));
}
