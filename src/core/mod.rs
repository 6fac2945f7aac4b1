mod errors;
mod expiration;
mod manager;
mod progress;
mod traits;
mod types;
mod validation;
mod worker;

pub use errors::{Result, UploadError};
pub use expiration::Expiration;
pub use manager::{ActiveUpload, UploadManager};
pub use progress::{PercentTracker, ProgressCallback, ProgressStream};
pub use traits::FileHost;
pub use types::{UploadEvent, UploadId, UploadMode, UploadRequest, UploadSource, UploadState};
pub use validation::{BLOCKED_EXTENSIONS, MAX_FILE_SIZE, Rejection, validate};
pub use worker::UploadWorker;
