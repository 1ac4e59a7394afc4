// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::search::DestinationAggregator;
use crate::presentation::handlers::search_handler;
use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(aggregator: Arc<DestinationAggregator>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route("/v1/destinations/search", post(search_handler::search))
        .route(
            "/v1/destinations/cache",
            delete(search_handler::clear_cache),
        )
        .layer(Extension(aggregator));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
