// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 数据库（database）：连接池、迁移入口和实体映射
/// - 指标（metrics）：Prometheus 导出器和同步计数器
/// - 仓库实现（repositories）：持久化网关的数据库实现
/// - 搜索（search）：招聘搜索结果页的地址构造与解析
/// - 存储（storage）：下载图片的本地存储
/// - 店铺目录（store_directory）：公共店铺目录接口客户端
///
/// 基础设施层依赖于领域层的抽象接口，领域层不感知具体实现。
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod search;
pub mod storage;
pub mod store_directory;
