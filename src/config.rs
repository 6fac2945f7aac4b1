//! CLI 的 config.toml 加载

use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::Deserialize;
use url::Url;
use crate::core::{Expiration, UploadMode, UploadRequest, UploadSource};

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// 本地文件路径，跟 url 二选一
    pub file_path: Option<PathBuf>,
    /// 远程 URL，仅 catbox（Permanent）模式
    pub url: Option<String>,
    /// "catbox" / "litterbox"（或 "permanent" / "temporary"）
    #[serde(default)]
    pub mode: UploadMode,
    /// catbox 账号的 userhash，可留空
    pub user_hash: Option<String>,
    /// litterbox 的过期时间，"1h" 或 "1 hour" 两种写法都行
    pub expiration: Option<Expiration>,
    /// 单次上传的总超时（秒）
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// 由配置构造上传请求
    pub fn to_request(&self) -> anyhow::Result<UploadRequest> {
        let source = match (&self.file_path, &self.url) {
            (Some(path), None) => UploadSource::File(path.clone()),
            (None, Some(url)) => {
                UploadSource::RemoteUrl(Url::parse(url).with_context(|| format!("invalid url '{url}'"))?)
            }
            _ => anyhow::bail!("config must set exactly one of file_path or url"),
        };

        // 空字符串等同于没有 userhash
        let user_hash = self
            .user_hash
            .clone()
            .filter(|user_hash| !user_hash.is_empty());

        Ok(UploadRequest {
            source,
            mode: self.mode,
            user_hash,
            expiration: self.expiration,
        })
    }
}
