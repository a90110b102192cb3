//! The seam between the upstream API and its consumers.

use async_trait::async_trait;
use hc_core::biomes::unique_biomes;
use hc_core::types::DbId;
use serde_json::Value;

/// A source of live game data.
///
/// Every operation returns `None` when the data is unavailable, whatever the
/// reason. The derived resources (`statistics`, `factions`, `biomes`) are
/// projected from the primary ones and need no round-trip of their own.
#[async_trait]
pub trait GameDataSource: Send + Sync {
    /// Current war status (a JSON object).
    async fn war_status(&self) -> Option<Value>;

    async fn planets(&self) -> Option<Vec<Value>>;

    async fn planet(&self, index: DbId) -> Option<Value>;

    async fn campaigns(&self) -> Option<Vec<Value>>;

    async fn assignments(&self) -> Option<Vec<Value>>;

    async fn dispatches(&self) -> Option<Vec<Value>>;

    async fn planet_events(&self) -> Option<Vec<Value>>;

    /// The `statistics` field of the war status.
    async fn statistics(&self) -> Option<Value> {
        self.war_status().await.and_then(|war| project(war, "statistics"))
    }

    /// The `factions` field of the war status.
    async fn factions(&self) -> Option<Value> {
        self.war_status().await.and_then(|war| project(war, "factions"))
    }

    /// Unique biomes across the planets listing, `None` when there are none.
    async fn biomes(&self) -> Option<Vec<Value>> {
        let planets = self.planets().await?;
        let biomes = unique_biomes(&planets);
        (!biomes.is_empty()).then_some(biomes)
    }
}

fn project(mut war: Value, field: &str) -> Option<Value> {
    war.get_mut(field)
        .map(Value::take)
        .filter(|value| !value.is_null())
}
