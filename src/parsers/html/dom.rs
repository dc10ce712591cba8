use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::core::{parse_content_type, CatalogError, CatalogResult};

/// 将 HTML 字节转换为 DOM
///
/// 未知的编码标签按 UTF-8 处理（有损解码）。
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> CatalogResult<RcDom> {
    let s: String = if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        string.into_owned()
    } else {
        String::from_utf8_lossy(data).into_owned()
    };

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())
        .map_err(|e| CatalogError::Parse(format!("failed to parse HTML document: {e}")))
}

/// 解析文档，必要时按 `<meta>` 声明的字符集重新解码
pub fn html_to_dom_detect(data: &[u8], declared_encoding: Option<&str>) -> CatalogResult<RcDom> {
    if let Some(encoding) = declared_encoding.filter(|e| !e.is_empty()) {
        return html_to_dom(data, encoding);
    }

    let dom = html_to_dom(data, "utf-8")?;
    match get_charset(&dom.document) {
        Some(charset) if !charset.eq_ignore_ascii_case("utf-8") && !charset.is_empty() => {
            tracing::debug!("文档声明字符集 {}，重新解码", charset);
            html_to_dom(data, &charset)
        }
        _ => Ok(dom),
    }
}

/// 查找指定路径的DOM节点
pub fn find_nodes(node: &Handle, node_names: &[&str]) -> Vec<Handle> {
    let mut found_nodes = Vec::new();
    let Some((node_name, rest)) = node_names.split_first() else {
        return found_nodes;
    };

    let is_match = get_node_name(node) == Some(*node_name);

    if is_match && rest.is_empty() {
        found_nodes.push(node.clone());
    }

    let next_names = if is_match && !rest.is_empty() {
        rest
    } else {
        node_names
    };

    for child_node in node.children.borrow().iter() {
        found_nodes.append(&mut find_nodes(child_node, next_names));
    }

    found_nodes
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 检查 `class` 属性是否包含指定类名
pub fn has_class(node: &Handle, class_name: &str) -> bool {
    get_node_attr(node, "class")
        .map(|classes| classes.split_ascii_whitespace().any(|c| c == class_name))
        .unwrap_or(false)
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 获取第一个子节点（包括文本节点和注释）
pub fn first_child(node: &Handle) -> Option<Handle> {
    node.children.borrow().first().cloned()
}

/// 文本节点自身的内容；非文本节点返回 `None`
pub fn node_text(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// 收集节点下所有文本节点的内容
pub fn text_content(node: &Handle) -> String {
    let mut buf = String::new();
    collect_text(node, &mut buf);
    buf
}

fn collect_text(node: &Handle, buf: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        buf.push_str(&contents.borrow());
        return;
    }

    for child in node.children.borrow().iter() {
        collect_text(child, buf);
    }
}

/// 获取文档声明的字符集
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, &["html", "head", "meta"]).iter() {
        if let Some(charset) = get_node_attr(meta_node, "charset") {
            return Some(charset);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(content) = get_node_attr(meta_node, "content") {
                let (_media_type, charset) = parse_content_type(&content);
                return Some(charset);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(dom: &RcDom) -> Handle {
        find_nodes(&dom.document, &["html", "body"])
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn finds_nested_nodes_by_path() {
        let dom = html_to_dom(
            b"<html><body><ul><li>a</li><li>b</li></ul><p><li>c</li></p></body></html>",
            "utf-8",
        )
        .unwrap();

        assert_eq!(find_nodes(&dom.document, &["ul", "li"]).len(), 2);
        assert_eq!(find_nodes(&dom.document, &["li"]).len(), 3);
    }

    #[test]
    fn reads_attributes_and_classes() {
        let dom = html_to_dom(
            br#"<span class="mw-headline extra" id="Ball">x</span>"#,
            "utf-8",
        )
        .unwrap();
        let span = find_nodes(&dom.document, &["span"]).remove(0);

        assert_eq!(get_node_attr(&span, "id").as_deref(), Some("Ball"));
        assert_eq!(get_node_attr(&span, "href"), None);
        assert!(has_class(&span, "mw-headline"));
        assert!(!has_class(&span, "mw"));
    }

    #[test]
    fn text_helpers_distinguish_own_text_from_descendants() {
        let dom = html_to_dom(b"<p>one <b>two</b></p>", "utf-8").unwrap();
        let p = body_of(&dom).children.borrow()[0].clone();

        let first = first_child(&p).unwrap();
        assert_eq!(node_text(&first).as_deref(), Some("one "));
        assert_eq!(node_text(&p), None);
        assert_eq!(text_content(&p), "one two");
    }

    #[test]
    fn detects_meta_charset() {
        let dom = html_to_dom(
            br#"<html><head><meta charset="windows-1250"></head><body></body></html>"#,
            "utf-8",
        )
        .unwrap();

        assert_eq!(get_charset(&dom.document).as_deref(), Some("windows-1250"));
    }

    #[test]
    fn redecodes_with_declared_charset() {
        // "Łódź" in windows-1250
        let mut data = br#"<html><head><meta charset="windows-1250"></head><body><p>"#.to_vec();
        data.extend_from_slice(&[0xA3, 0xF3, 0x64, 0x9F]);
        data.extend_from_slice(b"</p></body></html>");

        let dom = html_to_dom_detect(&data, None).unwrap();
        let p = find_nodes(&dom.document, &["p"]).remove(0);
        assert_eq!(text_content(&p), "Łódź");
    }
}
