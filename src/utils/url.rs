pub use url::Url;

/// 未指定缓存路径时使用的目录
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// 检查输入是否为带协议的 URL
pub fn is_url_and_has_protocol(input: &str) -> bool {
    match Url::parse(input) {
        Ok(parsed_url) => !parsed_url.scheme().is_empty() && parsed_url.scheme().len() > 1,
        Err(_) => false,
    }
}

/// 根据 URL 推导缓存文件路径
///
/// 取路径的最后一段作为文件名，例如
/// `https://en.wikipedia.org/wiki/List_of_sports` -> `cache/List_of_sports.html`。
pub fn default_cache_path(url: &Url) -> String {
    let name = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(sanitize_file_name)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "index".to_string());

    if name.ends_with(".html") || name.ends_with(".htm") {
        format!("{DEFAULT_CACHE_DIR}/{name}")
    } else {
        format!("{DEFAULT_CACHE_DIR}/{name}.html")
    }
}

fn sanitize_file_name(segment: &str) -> String {
    segment
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '%' => '_',
            c => c,
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}
