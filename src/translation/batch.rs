//! 批次管理器模块
//!
//! 把扁平化后的条目名称按固定宽度切分为窗口，逐语言、逐窗口顺序调用翻译服务，
//! 并按位置把译文合并回扁平条目。
//!
//! # 失败策略
//!
//! 某个窗口的请求失败，或返回的译文数量与窗口大小不符时，放弃该语言剩余的窗口，
//! 继续处理下一个语言。已经合并的译文（包括其他语言和该语言之前的窗口）保持不变。

use std::fmt;

use crate::catalog::{FlatEntry, Flattened};
use crate::languages::TargetLanguage;
use crate::translation::client::{TextFormat, Translator};
use crate::translation::error::TranslationError;

/// 单次请求的最大条目数
pub const DEFAULT_WINDOW_SIZE: usize = 100;

/// 条目名称的源语言
pub const DEFAULT_SOURCE_LANG: &str = "en";

/// 半开区间 `[left, right)` 表示的批次窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub left: usize,
    pub right: usize,
    /// 是否为该语言的最后一个窗口
    pub terminal: bool,
}

impl Window {
    pub fn len(&self) -> usize {
        self.right - self.left
    }

    pub fn is_empty(&self) -> bool {
        self.left == self.right
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.left, self.right)
    }
}

/// 窗口迭代器
///
/// 每次取 `[left, left + width)`，右端达到或超过总长度时截断并标记为最后一个窗口；
/// 空窗口直接结束迭代。
#[derive(Debug, Clone)]
pub struct Windows {
    len: usize,
    width: usize,
    left: usize,
    done: bool,
}

impl Windows {
    pub fn new(len: usize, width: usize) -> Self {
        Self {
            len,
            width,
            left: 0,
            // 宽度为 0 时永远得不到非空窗口
            done: width == 0,
        }
    }
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.done {
            return None;
        }

        let left = self.left;
        let mut right = left + self.width;
        let mut terminal = false;
        if right >= self.len {
            right = self.len;
            terminal = true;
        }

        if left >= right {
            self.done = true;
            return None;
        }

        self.left = right;
        self.done = terminal;

        Some(Window {
            left,
            right,
            terminal,
        })
    }
}

/// 单个语言的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageStatus {
    /// 所有窗口均已合并
    Completed,
    /// 在某个窗口失败后放弃了剩余窗口
    Aborted {
        window: Window,
        error: TranslationError,
    },
}

/// 单个语言的报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageReport {
    pub code: String,
    /// 成功合并的窗口数
    pub windows_merged: usize,
    /// 获得译文的条目数
    pub translated_items: usize,
    pub status: LanguageStatus,
}

impl LanguageReport {
    pub fn is_completed(&self) -> bool {
        self.status == LanguageStatus::Completed
    }

    /// 单行摘要，用于日志输出
    pub fn summary(&self) -> String {
        match &self.status {
            LanguageStatus::Completed => format!(
                "语言 {}: 完成, {} 个窗口, {} 个条目",
                self.code, self.windows_merged, self.translated_items
            ),
            LanguageStatus::Aborted { window, error } => format!(
                "语言 {}: 在窗口 {} 中止 ({}), 已翻译 {} 个条目",
                self.code, window, error, self.translated_items
            ),
        }
    }
}

/// 整个运行的翻译报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationReport {
    pub languages: Vec<LanguageReport>,
}

impl TranslationReport {
    pub fn all_completed(&self) -> bool {
        self.languages.iter().all(LanguageReport::is_completed)
    }

    pub fn aborted(&self) -> impl Iterator<Item = &LanguageReport> {
        self.languages.iter().filter(|report| !report.is_completed())
    }

    pub fn get(&self, code: &str) -> Option<&LanguageReport> {
        self.languages.iter().find(|report| report.code == code)
    }
}

/// 分批翻译器
pub struct BatchTranslator<'a> {
    translator: &'a dyn Translator,
    source_lang: String,
    window_size: usize,
    format: TextFormat,
}

impl<'a> BatchTranslator<'a> {
    pub fn new(translator: &'a dyn Translator, source_lang: &str) -> Self {
        Self {
            translator,
            source_lang: source_lang.to_string(),
            window_size: DEFAULT_WINDOW_SIZE,
            format: TextFormat::Text,
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// 依次翻译所有目标语言
    ///
    /// 单个语言失败不会影响其他语言。
    pub fn translate_all(
        &self,
        flattened: &mut Flattened,
        targets: &[TargetLanguage],
    ) -> TranslationReport {
        let mut report = TranslationReport::default();

        for target in targets {
            let language_report =
                self.translate_language(&mut flattened.entries, &flattened.source_names, target);
            report.languages.push(language_report);
        }

        report
    }

    /// 翻译单个目标语言
    ///
    /// `entries` 与 `source_names` 必须等长且一一对应。
    pub fn translate_language(
        &self,
        entries: &mut [FlatEntry],
        source_names: &[String],
        target: &TargetLanguage,
    ) -> LanguageReport {
        debug_assert_eq!(entries.len(), source_names.len());

        let mut report = LanguageReport {
            code: target.code.clone(),
            windows_merged: 0,
            translated_items: 0,
            status: LanguageStatus::Completed,
        };

        tracing::info!(
            "开始翻译 {} 个条目到 {}",
            source_names.len(),
            target.code
        );

        for window in Windows::new(source_names.len(), self.window_size) {
            let batch = &source_names[window.left..window.right];

            let result = self
                .translator
                .translate(batch, &self.source_lang, &target.code, self.format)
                .and_then(|translated| {
                    if translated.len() == batch.len() {
                        Ok(translated)
                    } else {
                        Err(TranslationError::LengthMismatch {
                            expected: batch.len(),
                            actual: translated.len(),
                        })
                    }
                });

            let translated = match result {
                Ok(translated) => translated,
                Err(error) => {
                    tracing::warn!(
                        "语言 {} 的窗口 {} 翻译失败，跳过剩余窗口 (暂时性: {}): {}",
                        target.code,
                        window,
                        error.is_transient(),
                        error
                    );
                    report.status = LanguageStatus::Aborted { window, error };
                    break;
                }
            };

            for (offset, text) in translated.into_iter().enumerate() {
                entries[window.left + offset]
                    .translations
                    .insert(target.code.clone(), text);
            }

            report.windows_merged += 1;
            report.translated_items += window.len();
            tracing::debug!("语言 {} 窗口 {} 已合并", target.code, window);
        }

        report
    }
}
