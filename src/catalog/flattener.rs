//! 扁平化模块
//!
//! 将分类映射展开为 (分类, 条目) 的扁平序列，以及与之平行的源文本序列，
//! 供翻译批处理按位置合并结果。

use std::collections::BTreeMap;

use crate::catalog::{CategoryMap, Item};
use crate::core::{CatalogError, CatalogResult};

/// 扁平化后的一行：条目、所属分类和逐语言的翻译
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub category: String,
    pub item: Item,
    /// 目标语言代码 -> 译文，随语言处理逐步填充
    pub translations: BTreeMap<String, String>,
}

impl FlatEntry {
    pub fn new(category: &str, item: Item) -> Self {
        Self {
            category: category.to_string(),
            item,
            translations: BTreeMap::new(),
        }
    }
}

/// 扁平化结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    pub entries: Vec<FlatEntry>,
    /// 与 `entries` 一一对应的条目名称，作为翻译输入
    pub source_names: Vec<String>,
}

impl Flattened {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 展开分类映射
///
/// `expected_count` 是遍历阶段统计的条目数；展开后的长度与之不符说明内部逻辑有缺陷，
/// 返回 [`CatalogError::CountMismatch`]，绝不截断。
pub fn flatten(category_map: &CategoryMap, expected_count: usize) -> CatalogResult<Flattened> {
    let total = category_map.item_count();

    let mut entries = Vec::with_capacity(total);
    let mut source_names = Vec::with_capacity(total);

    for (category, items) in category_map.iter() {
        for item in items {
            source_names.push(item.name.clone());
            entries.push(FlatEntry::new(category, item.clone()));
        }
    }

    if entries.len() != expected_count {
        return Err(CatalogError::CountMismatch {
            expected: expected_count,
            actual: entries.len(),
        });
    }

    tracing::debug!("扁平化得到 {} 个条目", entries.len());

    Ok(Flattened {
        entries,
        source_names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> CategoryMap {
        let mut map = CategoryMap::new();
        map.add("Ball sports", Item::linked("Football", "/wiki/Football"));
        map.add("Ball sports", Item::bare("Tennis"));
        map.add("Water sports", Item::bare("Rowing"));
        map
    }

    #[test]
    fn preserves_order_within_and_across_categories() {
        let flat = flatten(&sample_map(), 3).unwrap();

        let rows: Vec<(&str, &str)> = flat
            .entries
            .iter()
            .map(|e| (e.category.as_str(), e.item.name.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Ball sports", "Football"),
                ("Ball sports", "Tennis"),
                ("Water sports", "Rowing"),
            ]
        );
        assert_eq!(flat.source_names, vec!["Football", "Tennis", "Rowing"]);
        assert!(flat.entries.iter().all(|e| e.translations.is_empty()));
    }

    #[test]
    fn count_mismatch_is_fatal() {
        let err = flatten(&sample_map(), 4).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::CountMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn empty_map_flattens_to_nothing() {
        let flat = flatten(&CategoryMap::new(), 0).unwrap();
        assert!(flat.is_empty());
        assert!(flat.source_names.is_empty());
    }
}
