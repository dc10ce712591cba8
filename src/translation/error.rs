//! 翻译模块统一错误处理
//!
//! 翻译错误只影响单个语言：批处理器记录错误并跳过该语言剩余的窗口，
//! 不会中断整个流程。

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 翻译服务返回错误状态
    #[error("翻译服务错误 (HTTP {status}): {message}")]
    ServiceError { status: u16, message: String },

    /// 返回的译文数量与请求不符
    #[error("译文数量不匹配: 请求 {expected} 条, 返回 {actual} 条")]
    LengthMismatch { expected: usize, actual: usize },

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl TranslationError {
    /// 检查错误是否可能是暂时性的
    ///
    /// 只写入中止日志，本流程不重试。
    pub fn is_transient(&self) -> bool {
        match self {
            TranslationError::NetworkError(_) => true,
            TranslationError::ServiceError { status, .. } => *status == 429 || *status >= 500,
            TranslationError::ConfigError(_)
            | TranslationError::LengthMismatch { .. }
            | TranslationError::InvalidInput(_)
            | TranslationError::SerializationError(_) => false,
        }
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => TranslationError::ServiceError {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None if error.is_decode() => {
                TranslationError::SerializationError(format!("响应解析失败: {}", error))
            }
            None => TranslationError::NetworkError(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::SerializationError(format!("JSON序列化错误: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;
