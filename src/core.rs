use chrono::{SecondsFormat, Utc};
use markup5ever_rcdom::{Handle, RcDom};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{assemble, flatten, write_catalog, CatalogRecord, CategoryMap};
use crate::config::CatalogConfig;
use crate::env::EnvError;
use crate::languages::{load_joined, target_languages, TargetLanguage};
use crate::network::{DocumentCache, Session};
use crate::parsers::html::{build_category_map, html_to_dom_detect, WalkStats};
use crate::translation::{BatchTranslator, TranslationError, TranslationReport, Translator};
use crate::utils::url::{default_cache_path, is_url_and_has_protocol, Url};

/// Represents errors that abort a catalog run
///
/// Per-language translation failures are not represented here; they are
/// absorbed into [`TranslationReport`] and never stop the run.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The document could not be obtained
    #[error("Failed to fetch document: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Extraction tallies disagree with the flattened sequence
    #[error("Internal count mismatch: walk recorded {expected} items but flattening produced {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The language reference data is missing or malformed
    #[error("Language table error: {0}")]
    Languages(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(error: reqwest::Error) -> Self {
        CatalogError::Fetch(error.to_string())
    }
}

impl From<config::ConfigError> for CatalogError {
    fn from(error: config::ConfigError) -> Self {
        CatalogError::Config(error.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(error: toml::de::Error) -> Self {
        CatalogError::Config(format!("TOML解析错误: {}", error))
    }
}

impl From<TranslationError> for CatalogError {
    fn from(error: TranslationError) -> Self {
        CatalogError::Config(error.to_string())
    }
}

impl From<EnvError> for CatalogError {
    fn from(error: EnvError) -> Self {
        CatalogError::Config(error.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Options for a single catalog run
///
/// Built from [`CatalogConfig`] and then overridden by command line flags.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// URL or local file path of the list page
    pub target: String,
    /// Where a fetched page is cached; derived from the URL when unset
    pub cache_path: Option<String>,
    /// Catalog output path, supports `%timestamp%`
    pub output_path: String,
    /// Optional dump of the raw category map
    pub category_map_output: Option<String>,
    /// Joined language reference file
    pub languages_path: Option<String>,
    /// Enabled target language codes
    pub target_languages: Vec<String>,
    pub no_translate: bool,
    pub silent: bool,
}

impl CatalogOptions {
    pub fn from_config(config: &CatalogConfig, target: Option<&str>) -> Self {
        Self {
            target: target.unwrap_or(&config.source.url).to_string(),
            cache_path: config.source.cache_path.clone(),
            output_path: config.output.path.clone(),
            category_map_output: config.output.categories_path.clone(),
            languages_path: config.languages.path.clone(),
            target_languages: config.translation.target_languages.clone(),
            no_translate: !config.translation.enabled,
            silent: false,
        }
    }
}

/// Summary of a finished run
#[derive(Debug)]
pub struct CatalogOutcome {
    pub category_map: CategoryMap,
    pub records: Vec<CatalogRecord>,
    pub stats: WalkStats,
    pub report: TranslationReport,
    /// Where the catalog was written, after `%timestamp%` substitution
    pub output_path: Option<PathBuf>,
}

/// Builds the annotated catalog from an already parsed document
///
/// Walks the tree, flattens the category map and, when a translator is
/// given, translates every item name into each target language.
pub fn build_catalog(
    document: &Handle,
    batcher: Option<&BatchTranslator<'_>>,
    targets: &[TargetLanguage],
) -> CatalogResult<CatalogOutcome> {
    let (category_map, stats) = build_category_map(document);
    let mut flattened = flatten(&category_map, stats.item_count)?;

    let report = match batcher {
        Some(batcher) => batcher.translate_all(&mut flattened, targets),
        None => TranslationReport::default(),
    };

    Ok(CatalogOutcome {
        category_map,
        records: assemble(flattened.entries),
        stats,
        report,
        output_path: None,
    })
}

/// Obtains the document tree from a URL (through the cache) or a local file
pub fn load_document(
    session: &Session,
    target: &str,
    cache_path: Option<&str>,
) -> CatalogResult<RcDom> {
    if is_url_and_has_protocol(target) {
        let url = Url::parse(target)
            .map_err(|e| CatalogError::Fetch(format!("Invalid URL {target}: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CatalogError::Fetch(format!(
                "Unsupported URL scheme: {}",
                url.scheme()
            )));
        }

        let cache_path = cache_path
            .map(str::to_string)
            .unwrap_or_else(|| default_cache_path(&url));
        return DocumentCache::new(cache_path).load_or_fetch(session, &url);
    }

    // 本地文件路径
    let path = Path::new(target);
    if !path.exists() {
        return Err(CatalogError::Fetch(format!("File not found: {target}")));
    }

    let data = fs::read(path)?;
    html_to_dom_detect(&data, None)
}

/// Runs the whole batch job: fetch, walk, translate, persist
pub fn create_catalog(
    session: &Session,
    options: &CatalogOptions,
    translator: Option<&dyn Translator>,
    config: &CatalogConfig,
) -> CatalogResult<CatalogOutcome> {
    let dom = load_document(session, &options.target, options.cache_path.as_deref())?;

    let targets = match (&options.languages_path, options.no_translate) {
        (_, true) => Vec::new(),
        (Some(path), false) => {
            target_languages(&load_joined(Path::new(path))?, &options.target_languages)
        }
        (None, false) => options
            .target_languages
            .iter()
            .map(|code| TargetLanguage::new(code))
            .collect(),
    };

    let batcher = translator
        .filter(|_| !options.no_translate)
        .map(|translator| {
            BatchTranslator::new(translator, &config.translation.source_lang)
                .with_window_size(config.translation.batch_size)
        });

    let mut outcome = build_catalog(&dom.document, batcher.as_ref(), &targets)?;

    if let Some(path) = &options.category_map_output {
        let path = format_output_path(path);
        if let Some(parent) = Path::new(&path).parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(&outcome.category_map)?)?;
    }

    let output_path = PathBuf::from(format_output_path(&options.output_path));
    write_catalog(&output_path, &outcome.records)?;
    outcome.output_path = Some(output_path);

    tracing::info!(
        "got {} sport categories, {} items",
        outcome.category_map.len(),
        outcome.stats.item_count
    );
    for language in &outcome.report.languages {
        tracing::info!("{}", language.summary());
    }

    Ok(outcome)
}

/// Parses Content-Type header value into media type and charset
pub fn parse_content_type(content_type: &str) -> (String, String) {
    let mut media_type = String::new();
    let mut charset = String::new();

    let parts: Vec<&str> = content_type.split(';').collect();

    if !parts.is_empty() {
        media_type = parts[0].trim().to_lowercase();
    }

    for part in parts.iter().skip(1) {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("charset=") {
            charset = value.trim_matches('"').to_string();
        }
    }

    (media_type, charset)
}

/// Formats output path with timestamp substitution
pub fn format_output_path(path: &str) -> String {
    let datetime: &str = &Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    path.replace("%timestamp%", &datetime.replace(':', "_"))
}

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// Prints an error message to stderr
pub fn print_error_message(msg: &str, use_color: bool) {
    if use_color {
        eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
    } else {
        eprintln!("{msg}");
    }
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::html_to_dom;
    use crate::translation::{TextFormat, TranslationResult};

    struct Upper;

    impl Translator for Upper {
        fn translate(
            &self,
            texts: &[String],
            _source: &str,
            _target: &str,
            _format: TextFormat,
        ) -> TranslationResult<Vec<String>> {
            Ok(texts.iter().map(|t| t.to_uppercase()).collect())
        }
    }

    const BALL_SPORTS: &str = r#"<h2><span class="mw-headline">Ball sports</span></h2>
        <ul><li><a href="/wiki/Football">Football</a></li><li>Tennis</li></ul>"#;

    #[test]
    fn test_catalog_error_display() {
        let error = CatalogError::CountMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            error.to_string(),
            "Internal count mismatch: walk recorded 3 items but flattening produced 2"
        );
    }

    #[test]
    fn test_build_catalog_translates_ball_sports() {
        let dom = html_to_dom(BALL_SPORTS.as_bytes(), "utf-8").unwrap();
        let translator = Upper;
        let batcher = BatchTranslator::new(&translator, "en");

        let outcome =
            build_catalog(&dom.document, Some(&batcher), &[TargetLanguage::new("pl")]).unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].translations["pl"], "FOOTBALL");
        assert_eq!(outcome.records[1].translations["pl"], "TENNIS");
        assert!(outcome.report.all_completed());
    }

    #[test]
    fn test_build_catalog_without_translator() {
        let dom = html_to_dom(BALL_SPORTS.as_bytes(), "utf-8").unwrap();
        let outcome = build_catalog(&dom.document, None, &[]).unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.records.iter().all(|r| r.translations.is_empty()));
        assert!(outcome.report.languages.is_empty());
    }

    #[test]
    fn test_load_document_missing_file() {
        let session = Session::new(None, 0).unwrap();
        let result = load_document(&session, "/definitely/not/here.html", None);
        assert!(matches!(result, Err(CatalogError::Fetch(_))));
    }

    #[test]
    fn test_load_document_rejects_other_schemes() {
        let session = Session::new(None, 0).unwrap();
        let result = load_document(&session, "ftp://example.com/list.html", None);
        assert!(matches!(result, Err(CatalogError::Fetch(_))));
    }

    #[test]
    fn test_parse_content_type_with_charset() {
        let (media_type, charset) = parse_content_type("Text/HTML; charset=utf-8");
        assert_eq!(media_type, "text/html");
        assert_eq!(charset, "utf-8");
    }

    #[test]
    fn test_parse_content_type_quoted() {
        let (_, charset) = parse_content_type("text/html; charset=\"ISO-8859-2\"; boundary=x");
        assert_eq!(charset, "ISO-8859-2");
    }

    #[test]
    fn test_parse_content_type_empty() {
        let (media_type, charset) = parse_content_type("");
        assert_eq!(media_type, "");
        assert_eq!(charset, "");
    }

    #[test]
    fn test_format_output_path_as_is() {
        assert_eq!(format_output_path("data/sports.json"), "data/sports.json");
    }

    #[test]
    fn test_format_output_path_timestamp() {
        let path = format_output_path("data/sports-%timestamp%.json");
        assert!(path.starts_with("data/sports-"));
        assert!(!path.contains("%timestamp%"));
        assert!(!path.contains(':'));
    }
}
