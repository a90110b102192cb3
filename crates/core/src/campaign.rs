//! Campaign expiry evaluation.
//!
//! The persisted `status` column is derived from `expiresAt` at write time,
//! and re-checked at read time because the wall clock keeps moving between
//! writes.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Derived lifecycle of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Expired,
    Unknown,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a persisted status value. Anything unrecognized is `Unknown`.
    pub fn from_db(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "expired" => Self::Expired,
            _ => Self::Unknown,
        }
    }
}

/// Parse an upstream ISO-8601 timestamp.
///
/// Accepts RFC 3339 (with offset or `Z`) and naive date-times, which are
/// taken as UTC.
pub fn parse_expiry(raw: &str) -> Option<Timestamp> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Status of a campaign with the given expiry, evaluated at `now`.
///
/// Missing or unparseable expiry is `Active`.
pub fn status_at(expires_at: Option<&str>, now: Timestamp) -> CampaignStatus {
    match expires_at.and_then(parse_expiry) {
        Some(expiry) if expiry <= now => CampaignStatus::Expired,
        _ => CampaignStatus::Active,
    }
}

/// Whether a stored campaign still counts as active at `now`.
pub fn is_active_at(status: CampaignStatus, expires_at: Option<&str>, now: Timestamp) -> bool {
    status == CampaignStatus::Active && status_at(expires_at, now) == CampaignStatus::Active
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn future_expiry_is_active() {
        let now = Utc::now();
        let expiry = (now + Duration::days(1)).to_rfc3339();
        assert_eq!(status_at(Some(&expiry), now), CampaignStatus::Active);
    }

    #[test]
    fn past_expiry_is_expired() {
        let now = Utc::now();
        let expiry = (now - Duration::days(1)).to_rfc3339();
        assert_eq!(status_at(Some(&expiry), now), CampaignStatus::Expired);
    }

    #[test]
    fn missing_or_invalid_expiry_is_active() {
        let now = Utc::now();
        assert_eq!(status_at(None, now), CampaignStatus::Active);
        assert_eq!(
            status_at(Some("invalid-date-format"), now),
            CampaignStatus::Active
        );
    }

    #[test]
    fn naive_timestamps_are_utc() {
        let parsed = parse_expiry("2024-05-01T10:30:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T10:30:00+00:00");
        assert!(parse_expiry("2024-05-01T10:30:00.250+02:00").is_some());
    }

    #[test]
    fn active_status_is_rechecked_against_clock() {
        let written = Utc::now();
        let expiry = (written + Duration::hours(1)).to_rfc3339();
        let status = status_at(Some(&expiry), written);
        assert!(is_active_at(status, Some(&expiry), written));
        assert!(!is_active_at(status, Some(&expiry), written + Duration::hours(2)));
        assert!(!is_active_at(CampaignStatus::Unknown, None, written));
    }

    #[test]
    fn db_round_trip_of_status_names() {
        for status in [CampaignStatus::Active, CampaignStatus::Expired, CampaignStatus::Unknown] {
            assert_eq!(CampaignStatus::from_db(status.as_str()), status);
        }
        assert_eq!(CampaignStatus::from_db("paused"), CampaignStatus::Unknown);
    }
}
