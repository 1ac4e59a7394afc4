// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// A destination as reported by one of the search sources.
///
/// Only `name` is guaranteed; everything else depends on what the source
/// knows about the place. Results are immutable once received and keep the
/// `source` tag of their origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Database row id, for results served from the local database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<i64>,
    #[serde(default)]
    pub source: String,
}

impl Destination {
    /// Key identifying "the same place" across sources: case-insensitive
    /// name plus country, with a missing country treated as empty.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}-{}",
            self.name,
            self.country.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }
}
