// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 资格过滤（eligibility_filter）：判断公告截止日期是否晚于固定的截止基准日
pub mod eligibility_filter;
