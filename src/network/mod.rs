//! # 网络模块
//!
//! 这个模块包含所有与网络通信和文档缓存相关的功能：
//!
//! - HTTP会话管理和文档下载
//! - 本地文件缓存
//!
//! # 模块组织
//!
//! - `session` - HTTP会话管理、请求处理
//! - `cache` - 本地文档缓存，缓存存在时不再请求网络

pub mod cache;
pub mod session;

// Re-export commonly used items for convenience
pub use cache::DocumentCache;
pub use session::Session;
