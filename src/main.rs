// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use destrs::config::settings::Settings;
use destrs::infrastructure::cache::search_cache::SearchCache;
use destrs::infrastructure::search::{
    create_sources, DestinationAggregator, SearchConfig,
};
use destrs::presentation::routes;
use destrs::utils::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting destrs...");

    // Initialize Prometheus Metrics
    destrs::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Build the destination sources against the backend
    let sources = create_sources(&settings.backend)?;
    info!(
        "Destination sources initialized against {}",
        settings.backend.base_url
    );

    // 4. Initialize cache and aggregator
    let cache = Arc::new(SearchCache::new());
    let defaults = SearchConfig {
        sources: settings.search.sources.clone(),
        prioritize: settings.search.prioritize.clone(),
        limit: settings.search.limit,
        timeout: Duration::from_millis(settings.search.timeout_ms),
        min_query_length: settings.search.min_query_length,
        cache_lifetime: Duration::from_millis(settings.search.cache_lifetime_ms),
    };
    let aggregator = Arc::new(DestinationAggregator::new(sources, cache, defaults));
    info!("Search aggregator initialized");

    // 5. Start HTTP server
    let app = routes::routes(aggregator);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
