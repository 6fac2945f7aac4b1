use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;
use super::errors::{Result, UploadError};
use super::expiration::Expiration;

/// 上传任务唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct UploadId(Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UploadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 上传目标主机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// 永久存储（catbox）
    #[default]
    #[serde(alias = "catbox")]
    Permanent,
    /// 临时存储，到期自动删除（litterbox）
    #[serde(alias = "litterbox")]
    Temporary,
}

/// 上传来源，二选一
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// 本地文件，流式读取
    File(PathBuf),
    /// 远程 URL，由主机自己抓取（仅 Permanent 模式）
    RemoteUrl(Url),
}

/// 一次上传请求
///
/// 每次用户操作构造一个新请求，终态事件送达后即丢弃，不做任何持久化。
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub source: UploadSource,
    pub mode: UploadMode,
    /// 可选的账号令牌（userhash），原样透传
    pub user_hash: Option<String>,
    /// Temporary 模式的文件上传必填
    pub expiration: Option<Expiration>,
}

impl UploadRequest {
    pub fn file(path: impl Into<PathBuf>, mode: UploadMode) -> Self {
        Self {
            source: UploadSource::File(path.into()),
            mode,
            user_hash: None,
            expiration: None,
        }
    }

    /// URL 上传只有 Permanent 模式支持
    pub fn remote_url(url: Url) -> Self {
        Self {
            source: UploadSource::RemoteUrl(url),
            mode: UploadMode::Permanent,
            user_hash: None,
            expiration: None,
        }
    }

    pub fn with_user_hash(mut self, user_hash: impl Into<String>) -> Self {
        self.user_hash = Some(user_hash.into());
        self
    }

    pub fn with_expiration(mut self, expiration: Expiration) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// 校验字段组合是否合法
    ///
    /// 不合法的请求是前置条件违例，不允许发出任何网络调用。
    pub fn check_preconditions(&self) -> Result<()> {
        match (&self.source, self.mode) {
            (UploadSource::RemoteUrl(_), UploadMode::Temporary) => Err(
                UploadError::invalid_params("invalid upload parameters"),
            ),
            (UploadSource::File(_), UploadMode::Temporary) if self.expiration.is_none() => Err(
                UploadError::invalid_params("expiration is required for temporary uploads"),
            ),
            _ => Ok(()),
        }
    }
}

/// 任务状态机：Idle -> Running -> {Succeeded | Failed}
///
/// 首个终态事件之后状态不再变化；取消和超时都归入 Failed。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum UploadState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// 上传过程对外可见的事件流
///
/// 零个或多个 Progress，之后恰好一个 Completed 或 Failed 收尾。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// 进度更新（0-100，单个请求内单调不减）
    Progress { percent: u8 },
    /// 上传完成，携带托管链接
    Completed { link: String },
    /// 上传失败，携带人类可读的原因
    Failed { error: String },
}

// 静态断言确保类型是 Send 的
const _: () = {
    fn _assert_send<T: Send>() {}
    fn _assert_types() {
        _assert_send::<UploadRequest>();
        _assert_send::<UploadEvent>();
    }
};
