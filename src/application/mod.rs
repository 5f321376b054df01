// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含同步用例：招聘列表爬取、店铺目录同步以及编排器
pub mod dto;
pub mod use_cases;
