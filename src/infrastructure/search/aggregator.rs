// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::future::join_all;
use metrics::counter;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::models::destination::Destination;
use crate::domain::search::source::{DestinationSource, SourceName};
use crate::infrastructure::cache::search_cache::SearchCache;

/// Baseline search configuration, overridable per call through
/// [`SearchOptions`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Source names to query, in order.
    pub sources: Vec<String>,
    /// Source whose results win dedup ties.
    pub prioritize: String,
    /// Maximum number of results returned.
    pub limit: usize,
    /// Per-source request timeout.
    pub timeout: Duration,
    /// Queries with a shorter trimmed length are answered with an empty
    /// list and no requests.
    pub min_query_length: usize,
    /// Maximum age of a cached per-source result set.
    pub cache_lifetime: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources: SourceName::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            prioritize: SourceName::Database.as_str().to_string(),
            limit: 8,
            timeout: Duration::from_millis(5000),
            min_query_length: 2,
            cache_lifetime: Duration::from_millis(300_000),
        }
    }
}

/// Per-call overrides, merged over the aggregator's defaults.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub sources: Option<Vec<String>>,
    pub prioritize: Option<String>,
    pub limit: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub min_query_length: Option<usize>,
    pub cache_lifetime_ms: Option<u64>,
}

impl SearchConfig {
    fn merge(&self, options: &SearchOptions) -> SearchConfig {
        SearchConfig {
            sources: options.sources.clone().unwrap_or_else(|| self.sources.clone()),
            prioritize: options
                .prioritize
                .clone()
                .unwrap_or_else(|| self.prioritize.clone()),
            limit: options.limit.unwrap_or(self.limit),
            timeout: options
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(self.timeout),
            min_query_length: options.min_query_length.unwrap_or(self.min_query_length),
            cache_lifetime: options
                .cache_lifetime_ms
                .map(Duration::from_millis)
                .unwrap_or(self.cache_lifetime),
        }
    }
}

/// Fans a query out to the configured destination sources, races each
/// request against a timeout, caches per-source results and merges them
/// with source-priority deduplication.
///
/// `search` never fails: a source that times out, answers with an error
/// status or returns garbage contributes an empty list and the other
/// sources are unaffected. An all-sources failure is indistinguishable from
/// "no matches" at this boundary.
pub struct DestinationAggregator {
    sources: Vec<Arc<dyn DestinationSource>>,
    cache: Arc<SearchCache>,
    defaults: SearchConfig,
}

impl DestinationAggregator {
    pub fn new(
        sources: Vec<Arc<dyn DestinationSource>>,
        cache: Arc<SearchCache>,
        defaults: SearchConfig,
    ) -> Self {
        Self {
            sources,
            cache,
            defaults,
        }
    }

    /// Search for destinations across the requested sources.
    pub async fn search(&self, query: &str, options: SearchOptions) -> Vec<Destination> {
        let config = self.defaults.merge(&options);

        let query = query.trim();
        if query.chars().count() < config.min_query_length {
            warn!("Query too short (min: {})", config.min_query_length);
            return Vec::new();
        }

        let selected = self.select_sources(&config.sources);
        if selected.is_empty() {
            warn!("No valid sources specified");
            return Vec::new();
        }

        debug!(
            "Searching for \"{}\" across {} sources",
            query,
            selected.len()
        );
        counter!("destination_searches_total").increment(1);

        let lookups = selected.iter().map(|source| {
            let source = Arc::clone(source);
            let cache = Arc::clone(&self.cache);
            let query = query.to_string();
            let timeout = config.timeout;
            let cache_lifetime = config.cache_lifetime;

            async move {
                let name = source.name();

                if let Some(results) = cache.get(&query, name, cache_lifetime) {
                    debug!("Using cached results for {} from {}", query, name);
                    counter!("destination_cache_hits_total", "source" => name.as_str())
                        .increment(1);
                    return (name, results);
                }
                counter!("destination_cache_misses_total", "source" => name.as_str())
                    .increment(1);

                // 超时竞速：计时器获胜时放弃该请求，不做主动取消
                match tokio::time::timeout(timeout, source.search(&query)).await {
                    Ok(Ok(results)) => {
                        debug!("Source {} returned {} results", name, results.len());
                        cache.set(&query, name, results.clone());
                        (name, results)
                    }
                    Ok(Err(e)) => {
                        warn!("Error fetching from {}: {}", name, e);
                        counter!("destination_source_failures_total", "source" => name.as_str())
                            .increment(1);
                        (name, Vec::new())
                    }
                    Err(_) => {
                        warn!("Request to {} timed out after {:?}", name, timeout);
                        counter!("destination_source_timeouts_total", "source" => name.as_str())
                            .increment(1);
                        (name, Vec::new())
                    }
                }
            }
        });

        let results_by_source = join_all(lookups).await;

        let prioritize = SourceName::parse(&config.prioritize);
        let merged = deduplicate(results_by_source, prioritize, config.limit);

        info!("Found {} unique destinations for \"{}\"", merged.len(), query);
        merged
    }

    /// Search every configured default source.
    pub async fn search_all(&self, query: &str) -> Vec<Destination> {
        self.search(query, SearchOptions::default()).await
    }

    /// Search only the local database source.
    pub async fn search_local(&self, query: &str) -> Vec<Destination> {
        self.search(
            query,
            SearchOptions {
                sources: Some(vec![SourceName::Database.as_str().to_string()]),
                ..SearchOptions::default()
            },
        )
        .await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Resolve requested names against the registered sources, keeping the
    /// requested order. Unknown or unregistered names are skipped with a
    /// warning; repeated names collapse to their first occurrence.
    fn select_sources(&self, names: &[String]) -> Vec<Arc<dyn DestinationSource>> {
        let mut seen = HashSet::new();
        names
            .iter()
            .filter_map(|name| {
                let Some(parsed) = SourceName::parse(name) else {
                    warn!("Unknown source: {}", name);
                    return None;
                };
                if !seen.insert(parsed) {
                    return None;
                }
                let registered = self.sources.iter().find(|s| s.name() == parsed);
                if registered.is_none() {
                    warn!("Source {} is not registered", parsed);
                }
                registered.cloned()
            })
            .collect()
    }
}

/// Merge per-source result lists into one deduplicated, capped list.
///
/// Results from the prioritized source are inserted first; a repeated key
/// within that source keeps its original position but takes the later
/// value. The remaining sources are walked in their configured order and
/// only fill keys that are still absent. Output order is insertion order.
fn deduplicate(
    results_by_source: Vec<(SourceName, Vec<Destination>)>,
    prioritize: Option<SourceName>,
    limit: usize,
) -> Vec<Destination> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Destination> = Vec::new();

    if let Some(priority) = prioritize {
        for (_, results) in results_by_source
            .iter()
            .filter(|(name, _)| *name == priority)
        {
            for result in results {
                match positions.get(&result.dedup_key()) {
                    Some(&pos) => merged[pos] = result.clone(),
                    None => {
                        positions.insert(result.dedup_key(), merged.len());
                        merged.push(result.clone());
                    }
                }
            }
        }
    }

    for (name, results) in &results_by_source {
        if prioritize == Some(*name) {
            continue;
        }
        for result in results {
            let key = result.dedup_key();
            if !positions.contains_key(&key) {
                positions.insert(key, merged.len());
                merged.push(result.clone());
            }
        }
    }

    merged.truncate(limit);
    merged
}
