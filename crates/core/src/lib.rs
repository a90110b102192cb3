//! Domain types and pure logic shared by every High Command crate.
//!
//! Nothing in here performs I/O: record normalization, campaign expiry,
//! biome extraction and list filtering are plain functions over
//! [`serde_json::Value`] so the store, the collector and the HTTP layer
//! agree on one interpretation of upstream data.

pub mod biomes;
pub mod campaign;
pub mod error;
pub mod listing;
pub mod records;
pub mod types;
