//! 分类识别模块
//!
//! 识别开启新分类的标题节点：`<h2>`/`<h3>` 的第一个子节点必须是
//! 带有 `class="mw-headline"` 的 `<span>`，其去除首尾空白后的文本即为分类名。

use markup5ever_rcdom::Handle;

use super::dom::{first_child, get_node_name, has_class, text_content};
use super::utils::{is_category_heading, NodeMatch, HEADLINE_CLASS, HEADLINE_LABEL_TAG};
use super::walker::WalkStats;

/// 判断节点是否为分类标题，匹配时返回分类名
pub fn match_category_heading(node: &Handle) -> NodeMatch<String> {
    match get_node_name(node) {
        Some(tag) if is_category_heading(tag) => {}
        _ => return NodeMatch::NotMatched,
    }

    let Some(label) = first_child(node) else {
        return NodeMatch::Malformed("heading has no children");
    };

    if get_node_name(&label) != Some(HEADLINE_LABEL_TAG) || !has_class(&label, HEADLINE_CLASS) {
        return NodeMatch::NotMatched;
    }

    let headline = text_content(&label);
    let headline = headline.trim();
    if headline.is_empty() {
        return NodeMatch::Malformed("headline label has no text");
    }

    NodeMatch::Matched(headline.to_string())
}

/// 尝试用节点更新当前分类
///
/// 返回 `true` 表示分类已更新；此时调用方不应再从该节点提取条目或向下遍历。
/// 不匹配时 `category` 保持不变。
pub fn set_category(node: &Handle, category: &mut Option<String>, stats: &mut WalkStats) -> bool {
    match match_category_heading(node) {
        NodeMatch::Matched(headline) => {
            stats.headline_chars += headline.chars().count();
            stats.categories_opened += 1;
            tracing::trace!("进入分类: {}", headline);
            *category = Some(headline);
            true
        }
        NodeMatch::Malformed(reason) => {
            tracing::trace!("忽略异常标题节点: {}", reason);
            false
        }
        NodeMatch::NotMatched => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::{find_nodes, html_to_dom};
    use markup5ever_rcdom::RcDom;

    /// 返回的 DOM 必须在断言期间保持存活，否则节点的子节点会被清空
    fn first(html: &str, tag: &str) -> (RcDom, Handle) {
        let dom = html_to_dom(html.as_bytes(), "utf-8").unwrap();
        let node = find_nodes(&dom.document, &[tag]).remove(0);
        (dom, node)
    }

    #[test]
    fn headline_opens_category() {
        let (_dom, node) = first(
            r#"<h2><span class="mw-headline" id="Ball">  Ball sports </span></h2>"#,
            "h2",
        );
        let mut category = None;
        let mut stats = WalkStats::default();

        assert!(set_category(&node, &mut category, &mut stats));
        assert_eq!(category.as_deref(), Some("Ball sports"));
        assert_eq!(stats.headline_chars, "Ball sports".len());
        assert_eq!(stats.categories_opened, 1);
    }

    #[test]
    fn h3_is_also_a_category_heading() {
        let (_dom, node) = first(r#"<h3><span class="mw-headline">Racket</span></h3>"#, "h3");
        assert_eq!(
            match_category_heading(&node),
            NodeMatch::Matched("Racket".to_string())
        );
    }

    #[test]
    fn other_headings_are_ignored() {
        let (_dom, node) = first(r#"<h4><span class="mw-headline">Deep</span></h4>"#, "h4");
        assert_eq!(match_category_heading(&node), NodeMatch::NotMatched);
    }

    #[test]
    fn span_without_headline_class_is_ignored() {
        let (_dom, node) = first(r#"<h2><span class="mw-editsection">edit</span></h2>"#, "h2");
        let mut category = Some("Previous".to_string());
        let mut stats = WalkStats::default();

        assert!(!set_category(&node, &mut category, &mut stats));
        assert_eq!(category.as_deref(), Some("Previous"));
    }

    #[test]
    fn empty_headline_leaves_category_untouched() {
        let (_dom, node) = first(r#"<h2><span class="mw-headline">   </span></h2>"#, "h2");
        let mut category = Some("Previous".to_string());
        let mut stats = WalkStats::default();

        assert!(!set_category(&node, &mut category, &mut stats));
        assert_eq!(category.as_deref(), Some("Previous"));
        assert_eq!(stats, WalkStats::default());
    }

    #[test]
    fn headline_without_children_does_not_fault() {
        let (_dom, node) = first(r#"<h2><span class="mw-headline"></span></h2>"#, "h2");
        assert!(matches!(
            match_category_heading(&node),
            NodeMatch::Malformed(_)
        ));

        let (_empty_dom, empty) = first("<h2></h2>", "h2");
        assert!(matches!(
            match_category_heading(&empty),
            NodeMatch::Malformed(_)
        ));
    }

    #[test]
    fn label_must_be_first_child() {
        let (_dom, node) = first(
            r#"<h2>Intro <span class="mw-headline">Late</span></h2>"#,
            "h2",
        );
        assert_eq!(match_category_heading(&node), NodeMatch::NotMatched);
    }
}
