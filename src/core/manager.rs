use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Semaphore, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use super::errors::{Result, UploadError};
use super::traits::FileHost;
use super::types::{UploadEvent, UploadId, UploadRequest, UploadState};
use super::worker::UploadWorker;

/// 单飞上传管理器
///
/// 每个用户界面（surface）持有一个实例；同一时间最多一个在途上传，
/// 在途期间再次 start 会被直接拒绝而不是排队或并发。
pub struct UploadManager {
    host: Arc<dyn FileHost>,
    slot: Arc<Semaphore>,
    timeout: Option<Duration>,
}

impl UploadManager {
    pub fn new(host: Arc<dyn FileHost>) -> Self {
        Self {
            host,
            // 单飞槽位：一个 permit
            slot: Arc::new(Semaphore::new(1)),
            timeout: None,
        }
    }

    /// 单个上传的总超时；None 交给传输层的默认行为
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 启动一次上传
    ///
    /// 已有在途任务时返回 AlreadyInFlight；槽位在任务结束时释放，
    /// 无论成功、失败还是取消。
    pub fn start(&self, request: UploadRequest) -> Result<ActiveUpload> {
        let permit = self
            .slot
            .clone()
            .try_acquire_owned()
            .map_err(|_| UploadError::AlreadyInFlight)?;

        let id = UploadId::new();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(UploadState::Idle);
        let cancellation_token = CancellationToken::new();

        let mut worker = UploadWorker::new(
            self.host.clone(),
            event_tx,
            state_tx,
            cancellation_token.clone(),
        );
        if let Some(timeout) = self.timeout {
            worker = worker.with_timeout(timeout);
        }

        debug!(%id, "starting upload task");
        let join_handle = tokio::spawn(async move {
            let result = worker.run(request).await;
            // 任务收尾后释放单飞槽位
            drop(permit);
            result
        });

        Ok(ActiveUpload {
            id,
            event_rx,
            state_rx,
            cancellation_token,
            join_handle,
        })
    }
}

/// 在途上传句柄
///
/// 事件通道在终态事件之后关闭；句柄被丢弃不会取消任务。
pub struct ActiveUpload {
    pub id: UploadId,
    event_rx: mpsc::UnboundedReceiver<UploadEvent>,
    state_rx: watch::Receiver<UploadState>,
    cancellation_token: CancellationToken,
    join_handle: JoinHandle<Result<String>>,
}

impl ActiveUpload {
    /// 接收下一个事件；通道关闭（终态事件已送达）后返回 None
    pub async fn next_event(&mut self) -> Option<UploadEvent> {
        self.event_rx.recv().await
    }

    /// 任务当前状态
    pub fn state(&self) -> UploadState {
        *self.state_rx.borrow()
    }

    /// 请求取消，幂等；任务会以 Cancelled 错误收尾
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    /// 等待任务结束并拿到最终结果
    pub async fn wait(self) -> Result<String> {
        self.join_handle
            .await
            .map_err(|err| UploadError::internal(format!("upload task panicked: {err}")))?
    }
}
