// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含同步用例与编排器
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心记录模型、筛选服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// 纯 HTTP 获取引擎与无头浏览器会话
pub mod engines;

/// 基础设施模块
///
/// 提供数据库、存储、页面解析和指标等外部集成
pub mod infrastructure;

/// 表示层模块
///
/// 管理端同步触发路由
pub mod presentation;

/// 工具模块
///
/// 错误类型、日志初始化和请求节流
pub mod utils;

/// 工作器模块
///
/// 图片采集工作者
pub mod workers;
