use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};
use bytes::Bytes;
use futures::Stream;
use pin_project_lite::pin_project;

/// 进度回调，只在百分比变化时触发一次
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// 百分比追踪器
///
/// percent = floor(bytes_sent / total_bytes * 100)，封顶 100。
/// 用 fetch_max 保证单个请求内回调值单调不减。
pub struct PercentTracker {
    total_bytes: u64,
    bytes_sent: AtomicU64,
    last_percent: AtomicU64,
    callback: ProgressCallback,
}

impl PercentTracker {
    pub fn new(total_bytes: u64, callback: ProgressCallback) -> Self {
        Self {
            total_bytes,
            bytes_sent: AtomicU64::new(0),
            last_percent: AtomicU64::new(0),
            callback,
        }
    }

    /// 累加已发送字节，百分比前进时发出回调
    pub fn record_bytes(&self, bytes: u64) {
        let sent = self.bytes_sent.fetch_add(bytes, Ordering::Relaxed) + bytes;

        // 空文件没有可计量的传输量，直接视为 100%
        let percent = if self.total_bytes == 0 {
            100
        } else {
            ((sent as u128 * 100) / self.total_bytes as u128).min(100) as u64
        };

        let previous = self.last_percent.fetch_max(percent, Ordering::Relaxed);
        if percent > previous {
            (self.callback)(percent as u8);
        }
    }
}

pin_project! {
    /// 包装底层文件流，把每个 chunk 的字节数记入 PercentTracker
    pub struct ProgressStream<S> {
        #[pin]
        inner: S,
        tracker: Arc<PercentTracker>,
    }
}

impl<S> ProgressStream<S> {
    pub fn new(inner: S, tracker: Arc<PercentTracker>) -> Self {
        Self { inner, tracker }
    }
}

impl<S> Stream for ProgressStream<S>
where
    S: Stream<Item = std::io::Result<Bytes>>,
{
    type Item = std::io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        match this.inner.poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                let bytes_len = chunk.len();
                if bytes_len > 0 {
                    this.tracker.record_bytes(bytes_len as u64);
                }

                Poll::Ready(Some(Ok(chunk)))
            }
            other => other,
        }
    }
}
