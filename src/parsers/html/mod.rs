//! HTML解析和处理模块
//!
//! - `utils`: 标签常量和节点匹配结果类型
//! - `dom`: 基础DOM操作
//! - `classifier`: 分类标题识别
//! - `extractor`: 列表条目提取
//! - `walker`: DOM遍历，构建分类映射

pub mod classifier;
pub mod dom;
pub mod extractor;
pub mod utils;
pub mod walker;

pub use classifier::{match_category_heading, set_category};
pub use dom::{
    find_nodes, first_child, get_charset, get_node_attr, get_node_name, has_class, html_to_dom,
    html_to_dom_detect, node_text, text_content,
};
pub use extractor::{match_list_entry, set_item};
pub use utils::NodeMatch;
pub use walker::{build_category_map, walk, WalkStats};
