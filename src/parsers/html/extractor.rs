//! 条目提取模块
//!
//! 在已开启的分类中识别 `<li>` 列表条目，支持两种形状：
//!
//! - **链接条目**: 第一个子节点是带 `href` 的 `<a>`，名称取链接的第一个子节点文本（原样保留）
//! - **纯文本条目**: 第一个子节点不是链接，名称取该子节点的文本（去除首尾空白）

use markup5ever_rcdom::Handle;

use crate::catalog::{CategoryMap, Item};

use super::dom::{first_child, get_node_attr, get_node_name, node_text, text_content};
use super::utils::{NodeMatch, LINK_TAG, LINK_TARGET_ATTR, LIST_ENTRY_TAG};
use super::walker::WalkStats;

/// 判断节点是否为目录条目，匹配时返回条目
pub fn match_list_entry(node: &Handle) -> NodeMatch<Item> {
    if get_node_name(node) != Some(LIST_ENTRY_TAG) {
        return NodeMatch::NotMatched;
    }

    let Some(child) = first_child(node) else {
        return NodeMatch::Malformed("list entry has no children");
    };

    if get_node_name(&child) == Some(LINK_TAG) {
        let href = match get_node_attr(&child, LINK_TARGET_ATTR) {
            Some(href) if !href.is_empty() => href,
            _ => return NodeMatch::Malformed("link without target"),
        };

        let Some(label) = first_child(&child) else {
            return NodeMatch::Malformed("link has no children");
        };

        return NodeMatch::Matched(Item::linked(own_text(&label), href));
    }

    let name = own_text(&child);
    let name = name.trim();
    if name.is_empty() {
        return NodeMatch::Malformed("list entry has no text");
    }

    NodeMatch::Matched(Item::bare(name))
}

/// 文本节点取自身内容，元素节点取其全部后代文本
fn own_text(node: &Handle) -> String {
    node_text(node).unwrap_or_else(|| text_content(node))
}

/// 尝试从节点提取条目并记录到当前分类
///
/// 没有开启的分类时不做任何事。返回是否记录了条目。
pub fn set_item(
    node: &Handle,
    category: Option<&str>,
    category_map: &mut CategoryMap,
    stats: &mut WalkStats,
) -> bool {
    let Some(category) = category else {
        return false;
    };

    match match_list_entry(node) {
        NodeMatch::Matched(item) => {
            stats.item_chars += item.name.chars().count();
            stats.item_count += 1;
            category_map.add(category, item);
            true
        }
        NodeMatch::Malformed(reason) => {
            tracing::trace!("忽略异常列表条目 ({}): {}", category, reason);
            false
        }
        NodeMatch::NotMatched => false,
    }
}
