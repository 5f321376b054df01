// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非成功状态码
    #[error("Unexpected status code: {0}")]
    Status(u16),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 浏览器自动化错误
    #[error("Browser error: {0}")]
    Browser(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl From<chromiumoxide::error::CdpError> for EngineError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        EngineError::Browser(err.to_string())
    }
}

/// 纯 HTTP 页面获取特质
///
/// 每次调用都带有显式超时，不允许无限阻塞。
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 获取页面文本
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String, EngineError>;

    /// 获取二进制内容（图片下载）
    async fn fetch_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

/// 独立的无头浏览器会话
///
/// 会话只能通过 `close` 关闭一次；关闭会消耗会话本身。
#[async_trait]
pub trait BrowserSession: Send {
    /// 导航到指定地址并等待加载
    async fn navigate(&mut self, url: &str) -> Result<(), EngineError>;

    /// 尝试切换到指定名称的内嵌框架
    ///
    /// 框架不存在时返回 `Ok(false)`，不视为错误
    async fn enter_frame(&mut self, frame: &str, timeout: Duration) -> Result<bool, EngineError>;

    /// 返回匹配选择器的所有图片的绝对地址，按文档顺序
    async fn image_sources(&mut self, selector: &str) -> Result<Vec<String>, EngineError>;

    /// 关闭会话并释放浏览器资源
    async fn close(self: Box<Self>) -> Result<(), EngineError>;
}

/// 浏览器会话启动器
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// 启动一个全新的、与其他会话隔离的浏览器会话
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, EngineError>;

    /// 启动器名称
    fn name(&self) -> &'static str;
}
