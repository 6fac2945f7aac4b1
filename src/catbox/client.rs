use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, StatusCode};
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::debug;
use crate::core::{
    FileHost, PercentTracker, ProgressCallback, ProgressStream, Result, UploadError, UploadMode,
    UploadRequest, UploadSource,
};
use super::constants::{
    CATBOX_API_URL, DEFAULT_CONNECT_TIMEOUT, LITTERBOX_API_URL, STREAM_CHUNK_SIZE,
};

/// Catbox 客户端配置
#[derive(Debug, Clone)]
pub struct CatboxClientConfig {
    /// 整个请求的超时；大文件上传不宜设置，None 表示不限制
    pub timeout: Option<Duration>,
    /// 连接超时
    pub connect_timeout: Duration,
}

impl Default for CatboxClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
        }
    }
}

/// catbox / litterbox 上传客户端
///
/// 两个端点是协议的一部分而不是配置项；单次尝试，不做重试。
#[derive(Debug, Clone)]
pub struct CatboxClient {
    client: Client,
}

impl CatboxClient {
    pub fn new() -> Result<Self> {
        Self::with_config(CatboxClientConfig::default())
    }

    pub fn with_config(config: CatboxClientConfig) -> Result<Self> {
        let mut builder = Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client })
    }

    /// 模式决定端点
    fn endpoint(mode: UploadMode) -> &'static str {
        match mode {
            UploadMode::Permanent => CATBOX_API_URL,
            UploadMode::Temporary => LITTERBOX_API_URL,
        }
    }

    /// 响应约定：200 时正文去掉首尾空白就是链接，其余状态码一律失败
    fn parse_response(status: StatusCode, body: &str) -> Result<String> {
        if status == StatusCode::OK {
            Ok(body.trim().to_string())
        } else {
            Err(UploadError::server_error(status.as_u16()))
        }
    }
}

#[async_trait]
impl FileHost for CatboxClient {
    async fn upload_file(
        &self,
        request: &UploadRequest,
        progress: Option<ProgressCallback>,
    ) -> Result<String> {
        request.check_preconditions()?;

        let path = match &request.source {
            UploadSource::File(path) => path,
            UploadSource::RemoteUrl(_) => {
                return Err(UploadError::internal("upload_file called with a URL source"));
            }
        };

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| UploadError::invalid_params("file name is not valid UTF-8"))?
            .to_string();

        let file = File::open(path).await?;
        let file_size = file.metadata().await?.len();

        // 不整块读入内存：ReaderStream 流式发送，进度按 chunk 累计
        let reader = ReaderStream::with_capacity(file, STREAM_CHUNK_SIZE);
        let body = match progress {
            Some(callback) => {
                let tracker = Arc::new(PercentTracker::new(file_size, callback));
                Body::wrap_stream(ProgressStream::new(reader, tracker))
            }
            None => Body::wrap_stream(reader),
        };

        let file_part = Part::stream_with_length(body, file_size).file_name(file_name);

        let mut form = Form::new().text("reqtype", "fileupload");
        if request.mode == UploadMode::Temporary {
            let expiration = request.expiration.ok_or_else(|| {
                UploadError::invalid_params("expiration is required for temporary uploads")
            })?;
            form = form.text("time", expiration.as_token());
        }
        if let Some(user_hash) = &request.user_hash {
            form = form.text("userhash", user_hash.clone());
        }
        let form = form.part("fileToUpload", file_part);

        debug!(mode = ?request.mode, size = file_size, "uploading file");
        let response = self
            .client
            .post(Self::endpoint(request.mode))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Self::parse_response(status, &body)
    }

    async fn upload_url(&self, request: &UploadRequest) -> Result<String> {
        // 客户端也可以被直接使用，所以这里同样不允许违例请求碰网络
        request.check_preconditions()?;

        let url = match &request.source {
            UploadSource::RemoteUrl(url) => url,
            UploadSource::File(_) => {
                return Err(UploadError::internal("upload_url called with a file source"));
            }
        };

        let mut params = vec![
            ("reqtype", "urlupload".to_string()),
            ("url", url.to_string()),
        ];
        if let Some(user_hash) = &request.user_hash {
            params.push(("userhash", user_hash.clone()));
        }

        debug!(%url, "requesting url upload");
        let response = self
            .client
            .post(Self::endpoint(request.mode))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Self::parse_response(status, &body)
    }
}
