// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{BrowserLauncher, BrowserSession, EngineError};
use std::sync::Arc;
use tracing::{debug, warn};

/// 单个工作者持有的浏览器会话槽
///
/// 会话在首次使用时启动，处理 `recycle_after` 条记录后关闭，
/// 出错时立即丢弃。每个打开的会话恰好关闭一次。
pub struct SessionSlot {
    launcher: Arc<dyn BrowserLauncher>,
    session: Option<Box<dyn BrowserSession>>,
    uses: u32,
    recycle_after: u32,
}

impl SessionSlot {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, recycle_after: u32) -> Self {
        Self {
            launcher,
            session: None,
            uses: 0,
            recycle_after: recycle_after.max(1),
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// 返回当前会话，必要时启动新会话
    pub async fn acquire(&mut self) -> Result<&mut Box<dyn BrowserSession>, EngineError> {
        if self.session.is_none() {
            debug!(launcher = self.launcher.name(), "Launching browser session");
            self.session = Some(self.launcher.launch().await?);
            self.uses = 0;
        }

        self.session
            .as_mut()
            .ok_or_else(|| EngineError::Browser("browser session unavailable".to_string()))
    }

    /// 记录一次成功使用；达到复用上限时关闭会话
    pub async fn release(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.uses += 1;
        if self.uses >= self.recycle_after {
            self.close_current().await;
        }
    }

    /// 丢弃当前会话（出错后调用）
    pub async fn discard(&mut self) {
        self.close_current().await;
    }

    /// 关闭残留会话
    pub async fn shutdown(&mut self) {
        self.close_current().await;
    }

    async fn close_current(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = session.close().await {
                warn!("Failed to close browser session cleanly: {}", e);
            }
        }
        self.uses = 0;
    }
}

impl Drop for SessionSlot {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        // Dropped mid-record (timeout or aborted task), close on the runtime
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = session.close().await {
                        warn!("Failed to close abandoned browser session: {}", e);
                    }
                });
            }
            Err(_) => warn!("Browser session dropped outside a runtime, not closed"),
        }
    }
}
