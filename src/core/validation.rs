use std::path::Path;
use thiserror::Error;

/// catbox 的文件大小上限，严格大于才拒绝（正好 200MB 可以上传）
pub const MAX_FILE_SIZE: u64 = 200 * 1024 * 1024;

/// 主机明确拒绝的扩展名
pub const BLOCKED_EXTENSIONS: [&str; 4] = ["exe", "scr", "cpl", "jar"];

/// doc / docx / docm 等整族都被拒绝
const BLOCKED_EXTENSION_PREFIX: &str = "doc";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("File exceeds the 200MB limit ({size} bytes)")]
    TooLarge { size: u64 },

    #[error("File type '.{extension}' is not allowed by the host")]
    DisallowedType { extension: String },
}

/// 发出任何网络请求之前的本地校验
///
/// 纯谓词：只看调用方已经拿到的元数据，不做文件系统或网络访问。
pub fn validate(path: &Path, file_size: u64) -> Result<(), Rejection> {
    if file_size > MAX_FILE_SIZE {
        return Err(Rejection::TooLarge { size: file_size });
    }

    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        let extension = extension.to_lowercase();
        if extension.starts_with(BLOCKED_EXTENSION_PREFIX)
            || BLOCKED_EXTENSIONS.contains(&extension.as_str())
        {
            return Err(Rejection::DisallowedType { extension });
        }
    }

    Ok(())
}
