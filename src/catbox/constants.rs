/// catbox 永久存储 API
pub const CATBOX_API_URL: &str = "https://catbox.moe/user/api.php";

/// litterbox 临时存储 API
pub const LITTERBOX_API_URL: &str = "https://litterbox.catbox.moe/resources/internals/api.php";

/// 建立连接的默认超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 30;

/// 文件流的读取缓冲大小
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;
