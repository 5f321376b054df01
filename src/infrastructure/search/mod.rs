// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索结果页模块
///
/// 招聘搜索结果页的分页地址构造与结果块解析
pub mod listing_page;

pub use listing_page::ListingPage;
