// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::domain::models::destination::Destination;
use crate::domain::search::source::{DestinationSource, SearchError, SourceName};

/// Response envelope shared by all destination endpoints.
#[derive(Debug, Deserialize)]
struct SourceEnvelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    results: Option<Vec<Destination>>,
}

/// Client for one destination endpoint of the travel backend.
///
/// All three sources speak the same protocol and differ only in path and in
/// whether their results are narrowed to cities and countries, so a single
/// client type covers them.
pub struct EndpointSource {
    name: SourceName,
    url: Url,
    client: reqwest::Client,
}

impl EndpointSource {
    pub fn new(
        name: SourceName,
        base_url: &Url,
        client: reqwest::Client,
    ) -> Result<Self, url::ParseError> {
        let url = base_url.join(name.endpoint_path())?;
        Ok(Self { name, url, client })
    }

    fn narrow_place_types(results: Vec<Destination>) -> Vec<Destination> {
        results
            .into_iter()
            .filter(|item| {
                matches!(item.place_type.as_deref(), Some("city") | Some("country"))
            })
            .collect()
    }
}

#[async_trait]
impl DestinationSource for EndpointSource {
    async fn search(&self, query: &str) -> Result<Vec<Destination>, SearchError> {
        let response = self
            .client
            .get(self.url.clone())
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus(status.as_u16()));
        }

        let envelope: SourceEnvelope = response
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        if envelope.status != "success" {
            return Err(SearchError::ApiError(
                envelope
                    .message
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        let results = envelope.results.ok_or_else(|| {
            SearchError::MalformedResponse("success envelope without results".to_string())
        })?;

        if self.name.filters_place_types() {
            Ok(Self::narrow_place_types(results))
        } else {
            Ok(results)
        }
    }

    fn name(&self) -> SourceName {
        self.name
    }
}
