// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::destination::Destination;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed set of destination sources the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceName {
    Database,
    Google,
    Openstreetmap,
}

impl SourceName {
    pub const ALL: [SourceName; 3] = [
        SourceName::Database,
        SourceName::Google,
        SourceName::Openstreetmap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceName::Database => "database",
            SourceName::Google => "google",
            SourceName::Openstreetmap => "openstreetmap",
        }
    }

    /// Backend endpoint path for this source. The query is supplied as the
    /// `query` URL parameter.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            SourceName::Database => "/api/destinations/database/",
            SourceName::Google => "/api/destinations/google-places/",
            SourceName::Openstreetmap => "/api/destinations/openstreetmap/",
        }
    }

    /// Whether results from this source must be narrowed to cities and
    /// countries. The local database already returns only destination rows.
    pub fn filters_place_types(&self) -> bool {
        !matches!(self, SourceName::Database)
    }

    pub fn parse(name: &str) -> Option<SourceName> {
        match name {
            "database" => Some(SourceName::Database),
            "google" => Some(SourceName::Google),
            "openstreetmap" => Some(SourceName::Openstreetmap),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone)]
pub enum SearchError {
    #[error("HTTP error {0}")]
    HttpStatus(u16),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("API error: {0}")]
    ApiError(String),
}

/// A named destination source that can answer a query.
#[async_trait]
pub trait DestinationSource: Send + Sync {
    /// Fetch destinations matching the query, already narrowed to the
    /// place types this source is allowed to contribute.
    async fn search(&self, query: &str) -> Result<Vec<Destination>, SearchError>;

    /// Get the name of the source
    fn name(&self) -> SourceName;
}
