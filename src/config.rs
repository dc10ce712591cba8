//! 配置管理
//!
//! 加载顺序（后者覆盖前者）：
//! 1. `.env` 系列文件
//! 2. 内置默认值
//! 3. 显式指定的配置文件，或 [`CONFIG_PATHS`] 中第一个存在的文件
//! 4. `WIKILIST_` 前缀的环境变量（嵌套字段用 `__` 分隔，如 `WIKILIST_TRANSLATION__BATCH_SIZE`）
//! 5. [`crate::env`] 中定义的类型化环境变量

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::core::{CatalogError, CatalogResult};
use crate::env::{translation, EnvVar};
use crate::translation::{DEFAULT_API_URL, DEFAULT_SOURCE_LANG, DEFAULT_WINDOW_SIZE};
use crate::utils::url::Url;

/// 配置文件查找路径
pub const CONFIG_PATHS: &[&str] = &[
    "wikilist.toml",
    ".wikilist.toml",
    "~/.config/wikilist/config.toml",
    "/etc/wikilist/config.toml",
];

pub const DEFAULT_SOURCE_URL: &str = "https://en.wikipedia.org/wiki/List_of_sports";
pub const DEFAULT_OUTPUT_PATH: &str = "data/sports.json";

/// 列表页面来源
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    /// 下载缓存路径，未设置时由 URL 推导
    pub cache_path: Option<String>,
    pub user_agent: Option<String>,
    /// HTTP 超时（秒），0 表示使用客户端默认值
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            cache_path: None,
            user_agent: None,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 目录输出路径，支持 `%timestamp%`
    pub path: String,
    /// 可选：原始分类映射的输出路径
    pub categories_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            categories_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LanguagesConfig {
    /// 合并后的语言参考文件（`join-languages` 的输出）
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationSettings {
    pub enabled: bool,
    pub api_url: String,
    pub auth_token: Option<String>,
    pub source_lang: String,
    pub target_languages: Vec<String>,
    pub batch_size: usize,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: DEFAULT_API_URL.to_string(),
            auth_token: None,
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            target_languages: vec!["pl".to_string()],
            batch_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub languages: LanguagesConfig,
    pub translation: TranslationSettings,
}

impl CatalogConfig {
    /// 按完整的层次加载配置
    ///
    /// `explicit_path` 指定时必须存在，否则返回错误；未指定时搜索 [`CONFIG_PATHS`]。
    pub fn load(explicit_path: Option<&Path>) -> CatalogResult<Self> {
        load_dotenv();

        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        match explicit_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(CatalogError::Config(format!(
                        "配置文件不存在: {}",
                        path.display()
                    )));
                }
                tracing::info!("加载配置文件: {}", path.display());
                builder = builder.add_source(File::from(path));
            }
            None => {
                for path in CONFIG_PATHS {
                    let expanded_path = shellexpand::tilde(path);
                    if Path::new(expanded_path.as_ref()).exists() {
                        tracing::info!("加载配置文件: {}", expanded_path);
                        builder = builder.add_source(File::with_name(&expanded_path));
                        break;
                    }
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("WIKILIST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: CatalogConfig = builder.build()?.try_deserialize()?;
        config.apply_env_overrides()?;
        config.validate()?;

        tracing::debug!(
            "配置已加载 - 来源: {}, 目标语言: {:?}",
            config.source.url,
            config.translation.target_languages
        );

        Ok(config)
    }

    /// 只解析 TOML 文本，不读取环境变量
    pub fn from_toml_str(content: &str) -> CatalogResult<Self> {
        let config: CatalogConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 应用类型化环境变量覆盖
    pub fn apply_env_overrides(&mut self) -> CatalogResult<()> {
        if let Some(token) = translation::AuthToken::get_if_set()? {
            self.translation.auth_token = Some(token);
        }

        if let Some(api_url) = translation::ApiUrl::get_if_set()? {
            tracing::info!("环境变量覆盖 API URL: {}", api_url);
            self.translation.api_url = api_url;
        }

        if let Some(source_lang) = translation::SourceLang::get_if_set()? {
            self.translation.source_lang = source_lang;
        }

        if let Some(target_languages) = translation::TargetLangs::get_if_set()? {
            self.translation.target_languages = target_languages;
        }

        if let Some(batch_size) = translation::BatchSize::get_if_set()? {
            self.translation.batch_size = batch_size;
        }

        Ok(())
    }

    /// 验证配置
    pub fn validate(&self) -> CatalogResult<()> {
        if self.translation.batch_size == 0 {
            return Err(CatalogError::Config("批次大小不能为0".to_string()));
        }

        if self.translation.source_lang.trim().is_empty() {
            return Err(CatalogError::Config("源语言不能为空".to_string()));
        }

        if self.translation.enabled {
            Url::parse(&self.translation.api_url).map_err(|e| {
                CatalogError::Config(format!(
                    "无效的API地址 {}: {}",
                    self.translation.api_url, e
                ))
            })?;
        }

        if self.output.path.trim().is_empty() {
            return Err(CatalogError::Config("输出路径不能为空".to_string()));
        }

        Ok(())
    }

    /// 生成示例配置文件
    pub fn write_example(path: &Path) -> CatalogResult<()> {
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| CatalogError::Config(format!("序列化配置失败: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 加载 .env 文件，只使用第一个存在的文件
fn load_dotenv() {
    let env_files = [".env.local", ".env.development", ".env.production", ".env"];

    for env_file in &env_files {
        if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
            tracing::info!("已加载环境变量文件: {}", env_file);
            break;
        }
    }
}
