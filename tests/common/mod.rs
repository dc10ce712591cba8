// 集成测试公共模块
//
// 提供页面构造和桩翻译器

use std::cell::RefCell;
use std::io::Cursor;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::RcDom;

use wikilist::translation::{TextFormat, TranslationError, TranslationResult, Translator};

/// HTML测试工具
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 创建测试用的DOM结构
    pub fn create_test_dom(html: &str) -> RcDom {
        let mut input = Cursor::new(html);
        parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut input)
            .unwrap()
    }

    /// 包含两个分类的简单列表页面
    pub fn create_sports_page() -> String {
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>List of sports</title>
    <meta charset="UTF-8">
</head>
<body>
    <h2><span class="mw-headline">Ball sports</span></h2>
    <ul>
        <li><a href="/wiki/Football">Football</a></li>
        <li>Tennis</li>
    </ul>
    <h2><span class="mw-headline">Combat sports</span></h2>
    <ul>
        <li><a href="/wiki/Boxing">Boxing</a></li>
    </ul>
</body>
</html>"#
            .to_string()
    }

    /// 生成一个分类下的 `count` 个条目
    pub fn create_long_page(category: &str, count: usize) -> String {
        let mut html = format!(
            r#"<html><body><h3><span class="mw-headline">{}</span></h3><ul>"#,
            category
        );
        for i in 0..count {
            html.push_str(&format!(r#"<li><a href="/wiki/Sport_{i}">Sport {i}</a></li>"#));
        }
        html.push_str("</ul></body></html>");
        html
    }
}

/// 把文本转为大写，并记录每次请求的目标语言和批次大小
#[derive(Default)]
pub struct UppercaseTranslator {
    pub calls: RefCell<Vec<(String, usize)>>,
}

impl Translator for UppercaseTranslator {
    fn translate(
        &self,
        texts: &[String],
        _source: &str,
        target: &str,
        _format: TextFormat,
    ) -> TranslationResult<Vec<String>> {
        self.calls
            .borrow_mut()
            .push((target.to_string(), texts.len()));
        Ok(texts.iter().map(|t| t.to_uppercase()).collect())
    }
}

/// 对指定语言的第 `fail_on` 个窗口（从 1 开始）返回服务错误
pub struct FailingTranslator {
    pub code: &'static str,
    pub fail_on: usize,
    seen: RefCell<usize>,
}

impl FailingTranslator {
    pub fn new(code: &'static str, fail_on: usize) -> Self {
        Self {
            code,
            fail_on,
            seen: RefCell::new(0),
        }
    }
}

impl Translator for FailingTranslator {
    fn translate(
        &self,
        texts: &[String],
        _source: &str,
        target: &str,
        _format: TextFormat,
    ) -> TranslationResult<Vec<String>> {
        if target == self.code {
            let mut seen = self.seen.borrow_mut();
            *seen += 1;
            if *seen == self.fail_on {
                return Err(TranslationError::ServiceError {
                    status: 503,
                    message: "backend unavailable".to_string(),
                });
            }
        }
        Ok(texts.iter().map(|t| format!("[{target}] {t}")).collect())
    }
}

/// 总是少返回一条译文
pub struct ShortTranslator;

impl Translator for ShortTranslator {
    fn translate(
        &self,
        texts: &[String],
        _source: &str,
        _target: &str,
        _format: TextFormat,
    ) -> TranslationResult<Vec<String>> {
        Ok(texts.iter().skip(1).cloned().collect())
    }
}
