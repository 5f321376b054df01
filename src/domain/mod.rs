// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含同步管道的核心业务逻辑，包括：
/// - 领域模型（models）：招聘公告、店铺、运行计数等实体
/// - 仓库接口（repositories）：持久化网关与图片存储的抽象接口
/// - 服务（services）：截止日期资格过滤等纯业务规则
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod repositories;
pub mod services;
