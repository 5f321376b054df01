// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层依赖的数据持久化抽象契约，具体实现由基础设施层提供：
/// - 持久化网关（persistence_gateway）：公告去重与插入、店铺读取与图片路径回写
/// - 存储仓库（storage_repository）：下载图片的文件存储
pub mod persistence_gateway;
pub mod storage_repository;
