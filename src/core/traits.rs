use async_trait::async_trait;
use super::errors::Result;
use super::progress::ProgressCallback;
use super::types::UploadRequest;

/// 文件托管主机接口 - 所有传输实现都必须实现此接口
///
/// worker 只依赖这个 seam，测试里用 mock 替掉真实的 HTTP 客户端。
#[async_trait]
pub trait FileHost: Send + Sync {
    /// 以 multipart 流式上传本地文件，返回托管链接
    ///
    /// 进度回调在传输期间按百分比变化触发。
    async fn upload_file(
        &self,
        request: &UploadRequest,
        progress: Option<ProgressCallback>,
    ) -> Result<String>;

    /// 让主机自己抓取远程 URL（仅 Permanent 模式），返回托管链接
    ///
    /// 请求体很小，没有进度事件。
    async fn upload_url(&self, request: &UploadRequest) -> Result<String>;
}
