// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::destination::Destination;
use crate::infrastructure::search::SearchOptions;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SearchRequestDto {
    pub query: String,
    pub sources: Option<Vec<String>>, // e.g., ["database", "google"]
    pub prioritize: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
    pub timeout_ms: Option<u64>,
}

impl SearchRequestDto {
    /// Per-call overrides carried by this request. Query-length gating is
    /// not validated here: a too-short query is answered with an empty
    /// success, not a 400.
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            sources: self.sources.clone(),
            prioritize: self.prioritize.clone(),
            limit: self.limit,
            timeout_ms: self.timeout_ms,
            ..SearchOptions::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponseDto {
    pub status: &'static str,
    pub query: String,
    pub count: usize,
    pub results: Vec<Destination>,
}

impl SearchResponseDto {
    pub fn success(query: String, results: Vec<Destination>) -> Self {
        Self {
            status: "success",
            query,
            count: results.len(),
            results,
        }
    }
}
