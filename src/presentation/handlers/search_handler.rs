// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::application::dto::search_request::{SearchRequestDto, SearchResponseDto};
use crate::infrastructure::search::DestinationAggregator;

/// 处理目的地搜索请求
///
/// 聚合器对来源级失败始终降级为空结果，因此除参数校验外本处理器
/// 不会返回错误响应；过短的查询同样得到空的成功响应。
pub async fn search(
    Extension(aggregator): Extension<Arc<DestinationAggregator>>,
    Json(payload): Json<SearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
            .into_response();
    }

    let results = aggregator.search(&payload.query, payload.options()).await;
    (
        StatusCode::OK,
        Json(SearchResponseDto::success(payload.query, results)),
    )
        .into_response()
}

/// 清空搜索结果缓存
pub async fn clear_cache(
    Extension(aggregator): Extension<Arc<DestinationAggregator>>,
) -> StatusCode {
    aggregator.clear_cache();
    StatusCode::NO_CONTENT
}
