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

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use validator::Validate;

use crate::application::{
    dto::sync_request::SyncListingsRequest,
    use_cases::sync_orchestrator::{SyncOrchestrator, SyncRunError},
};

impl From<SyncRunError> for (StatusCode, String) {
    fn from(err: SyncRunError) -> Self {
        match err {
            SyncRunError::Busy => (StatusCode::CONFLICT, err.to_string()),
            SyncRunError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            SyncRunError::Sync(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
            SyncRunError::Task(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        }
    }
}

fn respond(result: Result<String, SyncRunError>) -> (StatusCode, String) {
    match result {
        Ok(summary) => (StatusCode::OK, summary),
        Err(e) => {
            tracing::error!("Sync run rejected or failed: {}", e);
            e.into()
        }
    }
}

/// 触发招聘列表同步
///
/// 请求体可为空；非空时必须是合法的 `SyncListingsRequest`
pub async fn sync_listings(
    Extension(orchestrator): Extension<Arc<SyncOrchestrator>>,
    body: Bytes,
) -> impl IntoResponse {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        SyncListingsRequest::default()
    } else {
        match serde_json::from_slice::<SyncListingsRequest>(&body) {
            Ok(request) => request,
            Err(e) => return (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e)),
        }
    };

    if let Err(e) = request.validate() {
        return (StatusCode::BAD_REQUEST, format!("Validation failed: {}", e));
    }

    respond(orchestrator.run_listing_sync(request.into()).await)
}

/// 触发图片采集批次
pub async fn sync_images(
    Extension(orchestrator): Extension<Arc<SyncOrchestrator>>,
) -> impl IntoResponse {
    respond(orchestrator.run_image_sync().await)
}

/// 触发店铺目录同步
pub async fn sync_stores(
    Extension(orchestrator): Extension<Arc<SyncOrchestrator>>,
) -> impl IntoResponse {
    respond(orchestrator.run_store_sync().await)
}

/// 取消进行中的运行
pub async fn cancel_sync(
    Extension(orchestrator): Extension<Arc<SyncOrchestrator>>,
) -> impl IntoResponse {
    if orchestrator.cancel() {
        (StatusCode::ACCEPTED, "Cancellation requested".to_string())
    } else {
        (StatusCode::NOT_FOUND, "No sync run in progress".to_string())
    }
}
