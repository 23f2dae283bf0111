//! Typed views over the keyed metadata payloads attached to symbols.
//!
//! A symbol stores each mixin as raw JSON under its well-known key so that
//! payloads this crate does not model survive a decode/encode cycle untouched.
//! Types implementing [`Mixin`] can be read and written through
//! [`Symbol::mixin`](super::symbol::Symbol::mixin) and
//! [`Symbol::set_mixin`](super::symbol::Symbol::set_mixin).

use super::version::SemanticVersion;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub trait Mixin: Serialize + DeserializeOwned {
    const KEY: &'static str;
}

/// One availability statement for a single domain (platform).
///
/// A missing `domain` means the statement applies unconditionally.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduced: Option<SemanticVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<SemanticVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obsoleted: Option<SemanticVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renamed: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_unconditionally_deprecated: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_unconditionally_unavailable: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub will_eventually_be_deprecated: bool,
}

impl AvailabilityItem {
    pub fn introduced(domain: impl Into<String>, version: SemanticVersion) -> Self {
        Self {
            domain: Some(domain.into()),
            introduced: Some(version),
            ..Self::default()
        }
    }

    pub fn deprecated(domain: impl Into<String>, version: SemanticVersion) -> Self {
        Self {
            domain: Some(domain.into()),
            deprecated: Some(version),
            ..Self::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(transparent)]
pub struct Availability(pub Vec<AvailabilityItem>);

impl Availability {
    pub fn contains_domain(&self, domain: Option<&str>) -> bool {
        self.0.iter().any(|item| item.domain.as_deref() == domain)
    }

    pub fn domain(&self, domain: &str) -> Option<&AvailabilityItem> {
        self.0
            .iter()
            .find(|item| item.domain.as_deref() == Some(domain))
    }

    /// Appends the items of `other` whose domain is not already present.
    /// Returns the number of items added.
    pub fn extend_missing_domains(&mut self, other: &Availability) -> usize {
        let mut added = 0;
        for item in &other.0 {
            if !self.contains_domain(item.domain.as_deref()) {
                self.0.push(item.clone());
                added += 1;
            }
        }
        added
    }
}

impl Mixin for Availability {
    const KEY: &'static str = "availability";
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationFragment {
    pub kind: String,
    pub spelling: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precise_identifier: Option<String>,
}

impl DeclarationFragment {
    pub fn new(kind: impl Into<String>, spelling: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            spelling: spelling.into(),
            precise_identifier: None,
        }
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == "keyword" && self.spelling == keyword
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(transparent)]
pub struct DeclarationFragments(pub Vec<DeclarationFragment>);

impl DeclarationFragments {
    pub fn contains_keyword(&self, keyword: &str) -> bool {
        self.0.iter().any(|f| f.is_keyword(keyword))
    }
}

impl Mixin for DeclarationFragments {
    const KEY: &'static str = "declarationFragments";
}
