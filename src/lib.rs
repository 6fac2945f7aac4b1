pub mod catbox;
pub mod config;
pub mod core;

// 重新导出核心类型
pub use self::core::{
    ActiveUpload,
    Expiration,
    FileHost,
    Result,
    UploadError,
    UploadEvent,
    UploadId,
    UploadManager,
    UploadMode,
    UploadRequest,
    UploadSource,
    UploadState,
};

// 重新导出客户端
pub use catbox::{CatboxClient, CatboxClientConfig};

pub use config::Config;
