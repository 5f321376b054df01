// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::sync_orchestrator::ListingRunParams;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 招聘列表同步请求
///
/// 所有字段可选，缺省时使用配置中的默认值
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct SyncListingsRequest {
    #[validate(length(min = 1, max = 100))]
    pub keyword: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    pub target_count: Option<u32>,
    #[validate(range(min = 1, max = 500))]
    pub max_pages: Option<u32>,
}

impl From<SyncListingsRequest> for ListingRunParams {
    fn from(request: SyncListingsRequest) -> Self {
        ListingRunParams {
            keyword: request.keyword,
            target_count: request.target_count,
            max_pages: request.max_pages,
        }
    }
}
