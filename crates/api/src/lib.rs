//! Wire model of symbol graph files.
//!
//! These types mirror the JSON emitted by symbol graph extractors and are
//! shared by the ingestion pipeline and its downstream consumers.

pub mod models;

pub use models::*;
