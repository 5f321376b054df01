// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// 请求节流器
///
/// 在相邻两次外部请求之间插入固定的礼貌间隔，间隔期间可被取消。
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    interval: Duration,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// 不等待的节流器（测试用）
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 等待一个间隔
    ///
    /// # 返回值
    ///
    /// 等待完成返回 `true`；在等待前或等待中被取消返回 `false`
    pub async fn pause(&self, cancel: &CancellationToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        if self.interval.is_zero() {
            return true;
        }

        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(self.interval) => true,
        }
    }
}

/// 多个工作者共享的起始节流门
///
/// 任意两个工作者相邻两次开始之间至少间隔 `interval`，与工作者数量无关。
#[derive(Debug)]
pub struct PaceGate {
    interval: Duration,
    last_start: tokio::sync::Mutex<Option<Instant>>,
}

impl PaceGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: tokio::sync::Mutex::new(None),
        }
    }

    /// 等待轮到下一次开始
    ///
    /// 获得开始许可返回 `true`；被取消返回 `false`
    pub async fn wait_turn(&self, cancel: &CancellationToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        // Held across the sleep so waiters start one interval apart
        let mut last_start = self.last_start.lock().await;
        if let Some(last) = *last_start {
            let ready_at = last + self.interval;
            tokio::select! {
                _ = cancel.cancelled() => return false,
                _ = tokio::time::sleep_until(ready_at) => {}
            }
        }
        *last_start = Some(Instant::now());
        true
    }
}
