// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 招聘公告（listing）：从外部搜索结果解析出的公告记录
/// - 店铺（store）：带有介绍页链接、等待补充图片的店铺记录
/// - 爬取运行（crawl_run）：一次公告爬取的瞬时计数与终止原因
/// - 图片任务（image_job）：单条店铺记录的图片采集结果
pub mod crawl_run;
pub mod image_job;
pub mod listing;
pub mod store;
