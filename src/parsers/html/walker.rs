//! DOM遍历器模块
//!
//! 深度优先遍历整个 DOM 树，将分类识别和条目提取组合为分类映射。
//!
//! # 遍历规则
//!
//! 对兄弟链中的每个节点依次：
//!
//! 1. 尝试识别分类标题；识别成功则更新当前分类，跳过该节点（不提取、不下降）
//! 2. 尝试提取条目
//! 3. 带着当前分类的副本递归进入子节点
//!
//! 当前分类按值传入每一层递归，子树中的分类变化不会泄漏到祖先或其他子树。
//!
//! # 使用示例
//!
//! ```rust
//! use wikilist::parsers::html::{build_category_map, html_to_dom};
//!
//! let html = r#"<h2><span class="mw-headline">Ball sports</span></h2>
//! <ul><li><a href="/wiki/Football">Football</a></li><li>Tennis</li></ul>"#;
//! let dom = html_to_dom(html.as_bytes(), "utf-8").unwrap();
//!
//! let (category_map, stats) = build_category_map(&dom.document);
//! assert_eq!(stats.item_count, 2);
//! assert_eq!(category_map.get("Ball sports").unwrap().len(), 2);
//! ```

use markup5ever_rcdom::Handle;

use crate::catalog::CategoryMap;

use super::classifier::set_category;
use super::extractor::set_item;

/// 遍历过程中累计的诊断计数
///
/// 仅用于日志和一致性校验，不参与控制流。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// 所有分类标题的字符数
    pub headline_chars: usize,
    /// 开启分类的次数（同名分类重复出现时重复计数）
    pub categories_opened: usize,
    /// 所有条目名称的字符数
    pub item_chars: usize,
    /// 记录的条目总数
    pub item_count: usize,
}

/// 从文档根节点构建分类映射
pub fn build_category_map(document: &Handle) -> (CategoryMap, WalkStats) {
    let mut category_map = CategoryMap::new();
    let mut stats = WalkStats::default();

    walk(document, None, &mut category_map, &mut stats);

    tracing::info!(
        "遍历完成: {} 个分类, {} 个条目",
        category_map.len(),
        stats.item_count
    );
    tracing::debug!(
        "标题字符数 {}, 条目字符数 {}",
        stats.headline_chars,
        stats.item_chars
    );

    (category_map, stats)
}

/// 遍历节点的子节点链
///
/// `category` 是进入该节点时的分类，按值传入。
pub fn walk(
    node: &Handle,
    mut category: Option<String>,
    category_map: &mut CategoryMap,
    stats: &mut WalkStats,
) {
    for child in node.children.borrow().iter() {
        if set_category(child, &mut category, stats) {
            // if category was set then dont descend
            continue;
        }

        set_item(child, category.as_deref(), category_map, stats);
        walk(child, category.clone(), category_map, stats);
    }
}
