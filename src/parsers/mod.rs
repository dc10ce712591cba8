//! # 解析器模块
//!
//! 这个模块包含把分类列表页面解析为分类映射所需的功能：
//!
//! - HTML解析和DOM查询
//! - 分类标题识别
//! - 列表条目提取
//! - 深度优先遍历
//!
//! # 模块组织
//!
//! - `html` - HTML文档解析、分类识别、条目提取和遍历

pub mod html;

// Re-export commonly used items for convenience
pub use html::{build_category_map, html_to_dom, html_to_dom_detect, WalkStats};
