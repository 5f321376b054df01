// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{BrowserLauncher, BrowserSession, EngineError};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams,
};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use url::Url;

const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(250);

static PROFILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Chromium 启动配置
#[derive(Debug, Clone)]
pub struct ChromiumOptions {
    /// 是否以无头模式运行
    pub headless: bool,
    /// 远程调试地址；设置后连接已有实例而不是启动新进程
    pub remote_debugging_url: Option<String>,
    /// 页面使用的客户端标识
    pub user_agent: String,
    /// CDP 请求超时
    pub request_timeout: Duration,
}

/// Chromium 会话启动器
///
/// 每次 `launch` 都创建独立的浏览器进程（或远程实例中的独立浏览器上下文），
/// 会话之间不共享 cookie、缓存或存储。
pub struct ChromiumLauncher {
    options: ChromiumOptions,
}

impl ChromiumLauncher {
    pub fn new(options: ChromiumOptions) -> Self {
        Self { options }
    }

    async fn launch_local(&self) -> Result<ChromiumSession, EngineError> {
        let profile_dir = std::env::temp_dir().join(format!(
            "portal-sync-profile-{}-{}",
            std::process::id(),
            PROFILE_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(self.options.request_timeout)
            .user_data_dir(&profile_dir)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if !self.options.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(EngineError::Browser)?;

        let (browser, handler) = Browser::launch(config).await?;
        let handler = spawn_handler(handler);

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(err) => {
                handler.abort();
                return Err(err.into());
            }
        };

        Ok(ChromiumSession {
            browser,
            page: Some(page),
            handler,
            context: None,
            profile_dir: Some(profile_dir),
        })
    }

    async fn launch_remote(&self, url: &str) -> Result<ChromiumSession, EngineError> {
        tracing::debug!("Connecting to remote Chrome instance at: {}", url);
        let (mut browser, handler) = Browser::connect(url).await?;
        let handler = spawn_handler(handler);

        // 远程实例共享进程，用独立的浏览器上下文隔离会话
        let context = browser
            .create_browser_context(CreateBrowserContextParams::default())
            .await?;
        let target = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context.clone())
            .build()
            .map_err(EngineError::Browser)?;

        let page = match browser.new_page(target).await {
            Ok(page) => page,
            Err(err) => {
                let _ = browser.dispose_browser_context(context).await;
                handler.abort();
                return Err(err.into());
            }
        };

        Ok(ChromiumSession {
            browser,
            page: Some(page),
            handler,
            context: Some(context),
            profile_dir: None,
        })
    }
}

fn spawn_handler(mut handler: chromiumoxide::Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    })
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, EngineError> {
        let session = match self.options.remote_debugging_url.as_deref() {
            Some(url) => self.launch_remote(url).await?,
            None => self.launch_local().await?,
        };

        if let Some(page) = session.page.as_ref() {
            if let Err(err) = page.set_user_agent(self.options.user_agent.as_str()).await {
                tracing::warn!("Failed to set user agent on new session: {}", err);
            }
        }

        Ok(Box::new(session))
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

/// 单个 Chromium 会话
pub struct ChromiumSession {
    browser: Browser,
    page: Option<Page>,
    handler: JoinHandle<()>,
    context: Option<BrowserContextId>,
    profile_dir: Option<PathBuf>,
}

impl ChromiumSession {
    fn page(&self) -> Result<&Page, EngineError> {
        self.page
            .as_ref()
            .ok_or_else(|| EngineError::Browser("session page already closed".to_string()))
    }

    async fn current_url(&self) -> Result<Option<Url>, EngineError> {
        let url = self.page()?.url().await?;
        Ok(url.and_then(|u| Url::parse(&u).ok()))
    }
}

/// 将相对地址解析为绝对地址
fn resolve(base: Option<&Url>, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => Some(url.to_string()),
        // data: 等非层级地址会原样保留，由调用方过滤
        Err(_) => base.and_then(|b| b.join(raw).ok()).map(|u| u.to_string()),
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), EngineError> {
        self.page()?.goto(url).await?;
        Ok(())
    }

    async fn enter_frame(&mut self, frame: &str, timeout: Duration) -> Result<bool, EngineError> {
        let selector = format!("iframe#{frame}, iframe[name='{frame}']");
        let deadline = Instant::now() + timeout;

        let src = loop {
            if let Ok(element) = self.page()?.find_element(selector.as_str()).await {
                if let Some(src) = element.attribute("src").await? {
                    break src;
                }
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(FRAME_POLL_INTERVAL).await;
        };

        let base = self.current_url().await?;
        let Some(target) = resolve(base.as_ref(), &src) else {
            return Ok(false);
        };

        // 框架文档作为顶层页面加载，之后的查询都作用于框架内容
        self.page()?.goto(target.as_str()).await?;
        Ok(true)
    }

    async fn image_sources(&mut self, selector: &str) -> Result<Vec<String>, EngineError> {
        let base = self.current_url().await?;
        let elements = self.page()?.find_elements(selector).await?;

        let mut sources = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(src) = element.attribute("src").await? {
                if let Some(resolved) = resolve(base.as_ref(), &src) {
                    sources.push(resolved);
                }
            }
        }
        Ok(sources)
    }

    async fn close(self: Box<Self>) -> Result<(), EngineError> {
        let mut this = *self;
        let mut first_error: Option<EngineError> = None;

        if let Some(page) = this.page.take() {
            if let Err(err) = page.close().await {
                first_error.get_or_insert(err.into());
            }
        }

        match this.context.take() {
            Some(context) => {
                if let Err(err) = this.browser.dispose_browser_context(context).await {
                    first_error.get_or_insert(err.into());
                }
            }
            None => {
                if let Err(err) = this.browser.close().await {
                    first_error.get_or_insert(err.into());
                }
                if let Err(err) = this.browser.wait().await {
                    first_error.get_or_insert(EngineError::Browser(err.to_string()));
                }
            }
        }

        this.handler.abort();

        if let Some(dir) = this.profile_dir.take() {
            if let Err(err) = tokio::fs::remove_dir_all(&dir).await {
                tracing::debug!("Failed to remove browser profile {}: {}", dir.display(), err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
