// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 图片采集工作者及其浏览器会话生命周期管理
pub mod image_worker;
pub mod session_slot;

pub use image_worker::{ImageAcquisitionWorker, ImageWorkerOptions};
pub use session_slot::SessionSlot;
