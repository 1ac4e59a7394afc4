// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use std::sync::Arc;
use url::Url;

use crate::config::settings::BackendSettings;
use crate::domain::search::source::{DestinationSource, SourceName};
use crate::infrastructure::search::endpoint_source::EndpointSource;

/// 创建目的地来源集合
///
/// 按固定顺序（database、google、openstreetmap）构建全部来源客户端，
/// 共享同一个 reqwest 客户端。单次调用的 `sources` 选项在此集合内筛选。
pub fn create_sources(
    backend: &BackendSettings,
) -> anyhow::Result<Vec<Arc<dyn DestinationSource>>> {
    let base_url = Url::parse(&backend.base_url)
        .with_context(|| format!("invalid backend base_url: {}", backend.base_url))?;

    let client = reqwest::Client::builder()
        .user_agent(backend.user_agent.clone())
        .build()
        .context("failed to build HTTP client")?;

    let mut sources: Vec<Arc<dyn DestinationSource>> = Vec::with_capacity(SourceName::ALL.len());
    for name in SourceName::ALL {
        let source = EndpointSource::new(name, &base_url, client.clone())
            .with_context(|| format!("invalid endpoint for source {}", name))?;
        sources.push(Arc::new(source));
    }

    Ok(sources)
}
