//! 语言参考数据
//!
//! 目标语言来自一张以 ISO 639-1 代码为键的参考表。该表由多个来源内连接得到：
//! ISO 639-1 本地化名称（JSON）与波兰语名称（CSV）。任何来源中缺失的代码都会被丢弃。

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::mem::take;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CatalogError, CatalogResult};

/// 单个语言的参考记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lang {
    #[serde(rename = "ISO_639_1")]
    pub iso_639_1: String,
    #[serde(rename = "ISO_639_2", default)]
    pub iso_639_2: String,
    #[serde(default)]
    pub eng: String,
    #[serde(default)]
    pub fr: String,
    #[serde(default)]
    pub ger: String,
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub endonym: String,
    #[serde(default)]
    pub pl: String,
}

impl Lang {
    /// 用 `other` 中的非空字段填充本记录的空字段
    pub fn merge_from(&mut self, other: &Lang) {
        fn fill(target: &mut String, source: &str) {
            if target.is_empty() && !source.is_empty() {
                *target = source.to_string();
            }
        }

        fill(&mut self.iso_639_1, &other.iso_639_1);
        fill(&mut self.iso_639_2, &other.iso_639_2);
        fill(&mut self.eng, &other.eng);
        fill(&mut self.fr, &other.fr);
        fill(&mut self.ger, &other.ger);
        fill(&mut self.family, &other.family);
        fill(&mut self.endonym, &other.endonym);
        fill(&mut self.pl, &other.pl);
    }
}

/// 语言代码到参考记录的映射
pub type LanguageMap = BTreeMap<String, Lang>;

/// 一个启用的翻译目标语言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage {
    /// 发送给翻译服务的语言代码，也是译文映射的键
    pub code: String,
    /// 英文名称，仅用于日志
    pub name: Option<String>,
}

impl TargetLanguage {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: None,
        }
    }

    pub fn with_name(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: Some(name.to_string()).filter(|n| !n.is_empty()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LocaleFile {
    data: BTreeMap<String, String>,
}

fn read_file(path: &Path) -> CatalogResult<String> {
    fs::read_to_string(path).map_err(|e| {
        CatalogError::Languages(format!("无法读取 {}: {}", path.display(), e))
    })
}

/// 解析 ISO 639-1 本地化名称 JSON（`{"Data": {code: name}}`）
///
/// 长度不为 2 的代码是地区变体（如 `en-GB`），直接跳过。
pub fn parse_iso639_locales(content: &str) -> CatalogResult<LanguageMap> {
    let file: LocaleFile = serde_json::from_str(content)
        .map_err(|e| CatalogError::Languages(format!("ISO 639-1 数据格式错误: {}", e)))?;

    Ok(file
        .data
        .into_iter()
        .filter(|(code, _)| code.len() == 2)
        .map(|(code, name)| {
            let lang = Lang {
                iso_639_1: code.clone(),
                eng: name,
                ..Lang::default()
            };
            (code, lang)
        })
        .collect())
}

pub fn load_iso639_locales(path: &Path) -> CatalogResult<LanguageMap> {
    let map = parse_iso639_locales(&read_file(path)?)?;
    tracing::info!("从 {} 读取了 {} 个语言", path.display(), map.len());
    Ok(map)
}

/// 按分隔符切分一行 CSV，支持双引号字段和 `""` 转义
fn split_fields(line: &str, sep: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            c if c == sep && !in_quotes => fields.push(take(&mut field).trim().to_string()),
            c => field.push(c),
        }
    }

    fields.push(field.trim().to_string());
    fields
}

/// 解析两列的波兰语名称 CSV（`code,name`）
///
/// 以 `#` 开头的行和空行被忽略，列数不为 2 的行视为错误。
pub fn parse_polish_names(content: &str) -> CatalogResult<LanguageMap> {
    let mut map = LanguageMap::new();

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = split_fields(line, ',');
        if fields.len() != 2 {
            return Err(CatalogError::Languages(format!(
                "第 {} 行应有 2 列, 实际 {} 列: {}",
                number + 1,
                fields.len(),
                line
            )));
        }

        let pl = fields.pop().unwrap_or_default();
        let code = fields.pop().unwrap_or_default();
        map.insert(
            code,
            Lang {
                pl,
                ..Lang::default()
            },
        );
    }

    Ok(map)
}

pub fn load_polish_names(path: &Path) -> CatalogResult<LanguageMap> {
    let map = parse_polish_names(&read_file(path)?)?;
    tracing::info!("从 {} 读取了 {} 个语言", path.display(), map.len());
    Ok(map)
}

/// 以 ISO 639-1 代码内连接
///
/// 结果只包含 `base` 中且在每个来源中都存在的代码，字段按来源顺序填充。
pub fn join(base: &LanguageMap, sources: &[&LanguageMap]) -> LanguageMap {
    let mut joined = LanguageMap::new();

    'codes: for (code, base_lang) in base {
        let mut lang = Lang {
            iso_639_1: code.clone(),
            ..base_lang.clone()
        };

        for source in sources {
            match source.get(code) {
                Some(other) => lang.merge_from(other),
                None => continue 'codes,
            }
        }

        joined.insert(code.clone(), lang);
    }

    tracing::info!("连接后剩余 {} 个语言", joined.len());
    joined
}

pub fn load_joined(path: &Path) -> CatalogResult<LanguageMap> {
    serde_json::from_str(&read_file(path)?)
        .map_err(|e| CatalogError::Languages(format!("{} 格式错误: {}", path.display(), e)))
}

pub fn write_joined(path: &Path, languages: &LanguageMap) -> CatalogResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(languages)?)?;
    Ok(())
}

/// 从参考表中选出启用的目标语言，按代码排序
///
/// 参考表中不存在的代码会被跳过并记录警告。
pub fn target_languages(languages: &LanguageMap, enabled: &[String]) -> Vec<TargetLanguage> {
    let enabled: BTreeSet<&str> = enabled.iter().map(String::as_str).collect();

    for code in &enabled {
        if !languages.contains_key(*code) {
            tracing::warn!("语言 {} 不在参考表中，已跳过", code);
        }
    }

    languages
        .iter()
        .filter(|(code, _)| enabled.contains(code.as_str()))
        .map(|(code, lang)| TargetLanguage::with_name(code, &lang.eng))
        .collect()
}
