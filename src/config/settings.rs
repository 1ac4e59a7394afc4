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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、后端端点和搜索默认值等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 目的地后端配置
    pub backend: BackendSettings,
    /// 搜索默认配置
    pub search: SearchSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 目的地后端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    /// 后端基础URL，各来源端点路径在此之上解析
    pub base_url: String,
    /// 请求使用的 User-Agent
    pub user_agent: String,
}

/// 搜索默认配置设置
///
/// 全部可按单次调用覆盖
#[derive(Debug, Deserialize)]
pub struct SearchSettings {
    /// 默认来源列表（按查询顺序）
    pub sources: Vec<String>,
    /// 去重时优先的来源
    pub prioritize: String,
    /// 返回结果数上限
    pub limit: usize,
    /// 单来源请求超时（毫秒）
    pub timeout_ms: u64,
    /// 最小查询长度
    pub min_query_length: usize,
    /// 缓存生命周期（毫秒）
    pub cache_lifetime_ms: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default backend settings
            .set_default("backend.base_url", "http://127.0.0.1:5000")?
            .set_default(
                "backend.user_agent",
                format!("destrs/{}", env!("CARGO_PKG_VERSION")),
            )?
            // Default search settings
            .set_default(
                "search.sources",
                vec!["database", "google", "openstreetmap"],
            )?
            .set_default("search.prioritize", "database")?
            .set_default("search.limit", 8)?
            .set_default("search.timeout_ms", 5000)?
            .set_default("search.min_query_length", 2)?
            .set_default("search.cache_lifetime_ms", 300_000)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("DESTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
