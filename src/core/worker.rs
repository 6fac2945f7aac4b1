use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use super::errors::{Result, UploadError};
use super::progress::ProgressCallback;
use super::traits::FileHost;
use super::types::{UploadEvent, UploadRequest, UploadSource, UploadState};
use super::validation;

/// 单次上传的执行单元
///
/// 一个 worker 只跑一个请求：前置校验 -> 本地文件校验 -> 传输 -> 终态事件。
/// 进度和结果通过事件通道送回发起方，状态通过 watch 通道公布。
pub struct UploadWorker {
    host: Arc<dyn FileHost>,
    event_tx: mpsc::UnboundedSender<UploadEvent>,
    state_tx: watch::Sender<UploadState>,
    cancellation_token: CancellationToken,
    timeout: Option<Duration>,
}

impl UploadWorker {
    pub fn new(
        host: Arc<dyn FileHost>,
        event_tx: mpsc::UnboundedSender<UploadEvent>,
        state_tx: watch::Sender<UploadState>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            host,
            event_tx,
            state_tx,
            cancellation_token,
            timeout: None,
        }
    }

    /// 整个上传（包括传输）的总超时；None 交给传输层的默认行为
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 执行请求并发出恰好一个终态事件
    pub async fn run(self, request: UploadRequest) -> Result<String> {
        let _ = self.state_tx.send(UploadState::Running);

        let result = self.execute(&request).await;
        match &result {
            Ok(link) => {
                let _ = self.state_tx.send(UploadState::Succeeded);
                let _ = self.event_tx.send(UploadEvent::Completed { link: link.clone() });
            }
            Err(err) => {
                let _ = self.state_tx.send(UploadState::Failed);
                let _ = self.event_tx.send(UploadEvent::Failed {
                    error: err.to_string(),
                });
            }
        }

        result
    }

    async fn execute(&self, request: &UploadRequest) -> Result<String> {
        // 前置条件违例和本地校验失败都不允许碰网络
        request.check_preconditions()?;

        if let UploadSource::File(path) = &request.source {
            let metadata = tokio::fs::metadata(path).await?;
            if !metadata.is_file() {
                return Err(UploadError::invalid_params(format!(
                    "'{}' is not a regular file",
                    path.display()
                )));
            }
            validation::validate(path, metadata.len())?;
            debug!(path = %path.display(), size = metadata.len(), "file passed local validation");
        }

        let transfer = async {
            match &request.source {
                UploadSource::File(_) => {
                    self.host
                        .upload_file(request, Some(self.progress_callback()))
                        .await
                }
                UploadSource::RemoteUrl(_) => self.host.upload_url(request).await,
            }
        };

        let transfer = async {
            match self.timeout {
                Some(timeout) => tokio::time::timeout(timeout, transfer)
                    .await
                    .map_err(|_| UploadError::Timeout(timeout))?,
                None => transfer.await,
            }
        };

        tokio::select! {
            result = transfer => result,
            _ = self.cancellation_token.cancelled() => Err(UploadError::Cancelled),
        }
    }

    fn progress_callback(&self) -> ProgressCallback {
        let event_tx = self.event_tx.clone();
        Arc::new(move |percent| {
            let _ = event_tx.send(UploadEvent::Progress { percent });
        })
    }
}
