use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use boxcat::core::ProgressCallback;
use boxcat::{
    ActiveUpload, Expiration, FileHost, Result, UploadError, UploadEvent, UploadManager,
    UploadMode, UploadRequest, UploadState,
};

/// 模拟主机 - 用于测试
struct MockHost {
    delay: Duration,
    link: String,
    file_calls: AtomicU32,
    url_calls: AtomicU32,
}

impl MockHost {
    fn new(link: &str, delay: Duration) -> Self {
        Self {
            delay,
            link: link.to_string(),
            file_calls: AtomicU32::new(0),
            url_calls: AtomicU32::new(0),
        }
    }

    fn transport_calls(&self) -> u32 {
        self.file_calls.load(Ordering::SeqCst) + self.url_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FileHost for MockHost {
    async fn upload_file(
        &self,
        _request: &UploadRequest,
        progress: Option<ProgressCallback>,
    ) -> Result<String> {
        self.file_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        if let Some(callback) = progress {
            for percent in [50, 100] {
                callback(percent);
            }
        }

        Ok(self.link.clone())
    }

    async fn upload_url(&self, _request: &UploadRequest) -> Result<String> {
        self.url_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(self.link.clone())
    }
}

// 创建带扩展名的测试文件
fn test_file(suffix: &str, size: usize) -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    std::fs::write(file.path(), vec![0u8; size]).unwrap();
    file
}

async fn collect_events(upload: &mut ActiveUpload) -> Vec<UploadEvent> {
    let mut events = Vec::new();
    while let Some(event) = upload.next_event().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn upload_delivers_progress_then_a_single_terminal_event() {
    let host = Arc::new(MockHost::new(
        "https://files.catbox.moe/abc123.png",
        Duration::ZERO,
    ));
    let manager = UploadManager::new(host);

    let file = test_file(".png", 1024);
    let request = UploadRequest::file(file.path(), UploadMode::Permanent);
    let mut upload = manager.start(request).unwrap();

    let events = collect_events(&mut upload).await;
    assert_eq!(
        events,
        vec![
            UploadEvent::Progress { percent: 50 },
            UploadEvent::Progress { percent: 100 },
            UploadEvent::Completed {
                link: "https://files.catbox.moe/abc123.png".to_string()
            },
        ]
    );

    assert_eq!(upload.state(), UploadState::Succeeded);
    let link = upload.wait().await.unwrap();
    assert_eq!(link, "https://files.catbox.moe/abc123.png");
}

#[tokio::test]
async fn second_start_while_in_flight_is_rejected() {
    let host = Arc::new(MockHost::new(
        "https://files.catbox.moe/abc123.png",
        Duration::from_millis(300),
    ));
    let manager = UploadManager::new(host);

    let file = test_file(".png", 1024);
    let first = manager
        .start(UploadRequest::file(file.path(), UploadMode::Permanent))
        .unwrap();

    // 在途期间的第二次 start 直接拒绝
    let second = manager.start(UploadRequest::file(file.path(), UploadMode::Permanent));
    assert!(matches!(second, Err(UploadError::AlreadyInFlight)));

    // 第一个任务结束后槽位释放
    first.wait().await.unwrap();
    let third = manager.start(UploadRequest::file(file.path(), UploadMode::Permanent));
    assert!(third.is_ok());
    third.unwrap().wait().await.unwrap();
}

#[tokio::test]
async fn temporary_url_upload_fails_without_a_network_call() {
    let host = Arc::new(MockHost::new(
        "https://files.catbox.moe/abc123.png",
        Duration::ZERO,
    ));
    let manager = UploadManager::new(host.clone());

    let url = url::Url::parse("https://example.com/cat.png").unwrap();
    let mut request = UploadRequest::remote_url(url);
    request.mode = UploadMode::Temporary;

    let mut upload = manager.start(request).unwrap();
    let events = collect_events(&mut upload).await;
    match events.as_slice() {
        [UploadEvent::Failed { error }] => {
            assert!(error.contains("invalid upload parameters"), "{error}");
        }
        other => panic!("expected a single Failed event, got {other:?}"),
    }

    assert!(matches!(
        upload.wait().await,
        Err(UploadError::InvalidParams(_))
    ));
    assert_eq!(host.transport_calls(), 0);
}

#[tokio::test]
async fn rejected_file_fails_without_a_network_call() {
    let host = Arc::new(MockHost::new(
        "https://files.catbox.moe/abc123.png",
        Duration::ZERO,
    ));
    let manager = UploadManager::new(host.clone());

    let file = test_file(".jar", 1024);
    let request = UploadRequest::file(file.path(), UploadMode::Temporary)
        .with_expiration(Expiration::OneHour);
    let mut upload = manager.start(request).unwrap();

    let events = collect_events(&mut upload).await;
    match events.as_slice() {
        [UploadEvent::Failed { error }] => {
            assert!(error.contains("not allowed"), "{error}");
        }
        other => panic!("expected a single Failed event, got {other:?}"),
    }
    assert_eq!(host.transport_calls(), 0);
}

#[tokio::test]
async fn cancel_fails_the_upload_and_frees_the_slot() {
    let host = Arc::new(MockHost::new(
        "https://files.catbox.moe/abc123.png",
        Duration::from_secs(30),
    ));
    let manager = UploadManager::new(host);

    let file = test_file(".png", 1024);
    let upload = manager
        .start(UploadRequest::file(file.path(), UploadMode::Permanent))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    upload.cancel();

    assert!(matches!(upload.wait().await, Err(UploadError::Cancelled)));

    // 取消之后可以立刻开始下一次上传
    let next = manager.start(UploadRequest::file(file.path(), UploadMode::Permanent));
    assert!(next.is_ok());
    next.unwrap().cancel();
}

#[tokio::test]
async fn manager_timeout_applies_to_the_whole_upload() {
    let host = Arc::new(MockHost::new(
        "https://files.catbox.moe/abc123.png",
        Duration::from_secs(30),
    ));
    let manager = UploadManager::new(host).with_timeout(Duration::from_millis(50));

    let file = test_file(".png", 1024);
    let upload = manager
        .start(UploadRequest::file(file.path(), UploadMode::Permanent))
        .unwrap();

    assert!(matches!(upload.wait().await, Err(UploadError::Timeout(_))));
}
