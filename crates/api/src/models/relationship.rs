use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A directed edge between two symbols, e.g. `memberOf` or `conformsTo`.
///
/// The target may live in another module; `target_fallback` then carries a
/// human-readable name for it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub kind: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_fallback: Option<String>,
    #[serde(flatten)]
    pub mixins: BTreeMap<String, serde_json::Value>,
}
