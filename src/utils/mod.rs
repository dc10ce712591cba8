//! # 工具模块
//!
//! 这个模块包含各种工具函数和实用程序：
//!
//! - URL识别和解析工具
//! - 缓存路径推导
//!
//! # 模块组织
//!
//! - `url` - URL处理、缓存文件名推导等工具函数

pub mod url;

// Re-export commonly used items for convenience
pub use url::{default_cache_path, is_url_and_has_protocol, Url, DEFAULT_CACHE_DIR};
