// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引擎模块
///
/// - reqwest_engine：带伪装客户端标识的纯 HTTP 获取
/// - chromium_engine：基于 chromiumoxide 的无头浏览器会话
pub mod chromium_engine;
pub mod reqwest_engine;
pub mod traits;
