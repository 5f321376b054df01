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

use crate::engines::traits::{EngineError, PageFetcher};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// 桌面浏览器的客户端标识
///
/// 外部来源会主动拦截非浏览器流量。
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP获取引擎
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建使用指定客户端标识的引擎
    pub fn new(user_agent: &str) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str, timeout: Duration) -> Result<reqwest::Response, EngineError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status(status.as_u16()));
        }

        Ok(response)
    }
}

fn map_request_error(err: reqwest::Error) -> EngineError {
    if err.is_timeout() {
        EngineError::Timeout
    } else {
        EngineError::RequestFailed(err)
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String, EngineError> {
        let start = Instant::now();
        let response = self.get(url, timeout).await?;
        let content = response.text().await.map_err(map_request_error)?;

        tracing::debug!(
            url,
            bytes = content.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(content)
    }

    async fn fetch_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, EngineError> {
        let response = self.get(url, timeout).await?;
        let bytes = response.bytes().await.map_err(map_request_error)?;
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
