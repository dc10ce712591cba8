//! 翻译模块
//!
//! 把扁平化条目的名称分批发送给外部翻译服务，并把译文按位置合并回条目：
//! - **client**: 翻译服务接口与 HTTP 实现
//! - **batch**: 窗口切分与逐语言的批处理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use wikilist::catalog::{flatten, CategoryMap, Item};
//! use wikilist::languages::TargetLanguage;
//! use wikilist::translation::{BatchTranslator, HttpTranslator, DEFAULT_API_URL};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut map = CategoryMap::new();
//! map.add("Ball sports", Item::bare("Tennis"));
//! let mut flattened = flatten(&map, 1)?;
//!
//! let client = reqwest::blocking::Client::new();
//! let translator = HttpTranslator::new(client, DEFAULT_API_URL, Some("token".to_string()))?;
//! let report = BatchTranslator::new(&translator, "en")
//!     .translate_all(&mut flattened, &[TargetLanguage::new("pl")]);
//! assert!(report.all_completed());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod client;
pub mod error;

pub use batch::{
    BatchTranslator, LanguageReport, LanguageStatus, TranslationReport, Window, Windows,
    DEFAULT_SOURCE_LANG, DEFAULT_WINDOW_SIZE,
};
pub use client::{HttpTranslator, TextFormat, Translator, DEFAULT_API_URL};
pub use error::{TranslationError, TranslationResult};
