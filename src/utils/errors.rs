// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::EngineError;
use thiserror::Error;

/// 仓库层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("未找到数据")]
    NotFound,

    #[error("数据已存在")]
    AlreadyExists,

    #[error("无效参数: {0}")]
    InvalidParameter(String),
}

impl From<sea_orm::DbErr> for RepositoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => RepositoryError::AlreadyExists,
            _ => RepositoryError::DatabaseError(err.to_string()),
        }
    }
}

/// 同步管道中单个条目或单页的错误类型
///
/// 循环根据错误种类决定跳过当前条目还是终止整个运行，
/// 而不是依赖捕获范围。
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Duplicate key: ({company}, {title})")]
    DuplicateKey { company: String, title: String },

    #[error("Network timeout: {0}")]
    NetworkTimeout(String),

    #[error("No image found")]
    NoImageFound,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl SyncError {
    /// 该错误是否应终止公告爬取的剩余页面
    ///
    /// 网络错误与数据库不可用会终止运行；
    /// 其余错误只影响当前结果块。
    pub fn is_page_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::NetworkTimeout(_)
                | SyncError::Network(_)
                | SyncError::Repository(RepositoryError::DatabaseError(_))
        )
    }
}

impl From<EngineError> for SyncError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Timeout => SyncError::NetworkTimeout("request timed out".to_string()),
            EngineError::RequestFailed(e) if e.is_timeout() => {
                SyncError::NetworkTimeout(e.to_string())
            }
            EngineError::RequestFailed(e) => SyncError::Network(e.to_string()),
            EngineError::Status(code) => {
                SyncError::Network(format!("unexpected status code {}", code))
            }
            EngineError::Browser(msg) => SyncError::Browser(msg),
            EngineError::Other(msg) => SyncError::Network(msg),
        }
    }
}
