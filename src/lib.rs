//! # Wikilist Library
//!
//! 将分类列表页面（维基百科风格的标题 + 列表结构）转换为带多语言翻译的 JSON 目录。
//!
//! ## 模块组织
//!
//! - `core` - 核心流程编排、致命错误和输出路径处理
//! - `parsers` - HTML解析、分类识别和条目提取
//! - `catalog` - 分类映射、扁平化和结果组装
//! - `network` - 网络请求和文档缓存
//! - `languages` - 语言参考数据加载与合并
//! - `translation` - 分批翻译和翻译客户端
//! - `config` - 分层配置加载
//! - `env` - 环境变量管理
//! - `utils` - 工具函数和实用程序

pub mod catalog;
pub mod config;
pub mod core;
pub mod env;
pub mod languages;
pub mod network;
pub mod parsers;
pub mod translation;
pub mod utils;

// Re-export commonly used items for convenience
pub use catalog::{assemble, flatten, CatalogRecord, CategoryMap, FlatEntry, Flattened, Item};
pub use core::{CatalogError, CatalogOptions, CatalogResult};
pub use parsers::html::{build_category_map, html_to_dom, WalkStats};
pub use translation::{BatchTranslator, TranslationReport, Translator};
