use super::mixin::{Availability, DeclarationFragment, DeclarationFragments, Mixin};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolIdentifier {
    /// Compiler-assigned identifier, unique within one symbol graph.
    pub precise: String,
    pub interface_language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolKind {
    /// e.g. `swift.func`, `swift.struct`
    pub identifier: String,
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Names {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigator: Option<Vec<DeclarationFragment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_heading: Option<Vec<DeclarationFragment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prose: Option<String>,
}

/// A single API entry of a symbol graph.
///
/// Everything besides the structural fields is kept in `mixins`, keyed by the
/// payload's wire key. Mixins are stored as raw JSON and decoded on demand.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub identifier: SymbolIdentifier,
    pub kind: SymbolKind,
    #[serde(default)]
    pub path_components: Vec<String>,
    #[serde(default)]
    pub names: Names,
    #[serde(default = "default_access_level")]
    pub access_level: String,
    #[serde(flatten)]
    pub mixins: BTreeMap<String, serde_json::Value>,
}

fn default_access_level() -> String {
    "public".to_string()
}

impl Symbol {
    pub fn precise_identifier(&self) -> &str {
        &self.identifier.precise
    }

    pub fn has_mixin(&self, key: &str) -> bool {
        self.mixins.contains_key(key)
    }

    /// Decodes the mixin stored under `M::KEY`, if present.
    pub fn mixin<M: Mixin>(&self) -> Option<Result<M, serde_json::Error>> {
        self.mixins.get(M::KEY).map(|value| M::deserialize(value))
    }

    pub fn set_mixin<M: Mixin>(&mut self, mixin: &M) -> Result<(), serde_json::Error> {
        self.mixins
            .insert(M::KEY.to_string(), serde_json::to_value(mixin)?);
        Ok(())
    }

    pub fn availability(&self) -> Option<Result<Availability, serde_json::Error>> {
        self.mixin::<Availability>()
    }

    pub fn declaration_fragments(&self) -> Option<Result<DeclarationFragments, serde_json::Error>> {
        self.mixin::<DeclarationFragments>()
    }

    /// True when the declaration fragments carry an `async` keyword.
    ///
    /// An unreadable fragments payload counts as not async.
    pub fn is_async_declaration(&self) -> bool {
        matches!(
            self.declaration_fragments(),
            Some(Ok(fragments)) if fragments.contains_keyword("async")
        )
    }
}
