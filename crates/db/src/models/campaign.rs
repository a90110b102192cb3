use hc_core::campaign::CampaignStatus;
use hc_core::types::{DbId, Timestamp};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// A campaign, upserted by `campaign_id`.
///
/// `status` is derived from `expires_at` when the row is written.
#[derive(Debug, Clone, FromRow)]
pub struct CampaignRow {
    pub id: DbId,
    pub campaign_id: DbId,
    pub planet_index: DbId,
    pub status: String,
    pub expires_at: Option<String>,
    pub data: Json<Value>,
    pub recorded_at: Timestamp,
}

impl CampaignRow {
    pub fn status(&self) -> CampaignStatus {
        CampaignStatus::from_db(&self.status)
    }
}
