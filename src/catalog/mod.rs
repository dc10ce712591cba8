//! # 目录模块
//!
//! 遍历结果的数据结构以及后续处理：
//!
//! - `Item` / `CategoryMap` - 遍历产生的分类映射（保持分类首次出现的顺序）
//! - `flattener` - 将分类映射展开为扁平条目序列
//! - `assembler` - 将带翻译的扁平条目组装为最终输出记录

pub mod assembler;
pub mod flattener;

use std::collections::HashMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::parsers::html::utils::INITIAL_CATEGORY_CAPACITY;

pub use assembler::{assemble, read_catalog, write_catalog, CatalogRecord};
pub use flattener::{flatten, FlatEntry, Flattened};

/// 单个目录条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Item {
    /// 带链接的条目
    pub fn linked(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: Some(href.into()),
        }
    }

    /// 没有链接的条目
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: None,
        }
    }
}

/// 分类到条目序列的映射
///
/// 分类按首次记录条目的顺序迭代，分类内的条目按记录顺序排列（只追加）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    categories: Vec<(String, Vec<Item>)>,
    index: HashMap<String, usize>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 向分类追加条目，分类不存在时创建
    pub fn add(&mut self, category: &str, item: Item) {
        let position = match self.index.get(category) {
            Some(&position) => position,
            None => {
                self.categories.push((
                    category.to_string(),
                    Vec::with_capacity(INITIAL_CATEGORY_CAPACITY),
                ));
                self.index
                    .insert(category.to_string(), self.categories.len() - 1);
                self.categories.len() - 1
            }
        };

        self.categories[position].1.push(item);
    }

    pub fn get(&self, category: &str) -> Option<&Vec<Item>> {
        self.index
            .get(category)
            .map(|&position| &self.categories[position].1)
    }

    /// 分类数量
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// 所有分类中的条目总数
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(category, _)| category.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Item])> {
        self.categories
            .iter()
            .map(|(category, items)| (category.as_str(), items.as_slice()))
    }
}

impl Serialize for CategoryMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (category, items) in &self.categories {
            map.serialize_entry(category, items)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_category_order() {
        let mut map = CategoryMap::new();
        map.add("Water", Item::bare("Rowing"));
        map.add("Air", Item::bare("Gliding"));
        map.add("Water", Item::bare("Sailing"));

        assert_eq!(map.categories().collect::<Vec<_>>(), vec!["Water", "Air"]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.item_count(), 3);
        assert_eq!(
            map.get("Water").unwrap(),
            &vec![Item::bare("Rowing"), Item::bare("Sailing")]
        );
        assert_eq!(map.get("Land"), None);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let mut map = CategoryMap::new();
        map.add("Zeta", Item::linked("Zorbing", "/wiki/Zorbing"));
        map.add("Alpha", Item::bare("Archery"));

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"Zeta":[{"Name":"Zorbing","Href":"/wiki/Zorbing"}],"Alpha":[{"Name":"Archery"}]}"#
        );
    }

    #[test]
    fn item_without_href_deserializes() {
        let item: Item = serde_json::from_str(r#"{"Name":"Tennis"}"#).unwrap();
        assert_eq!(item, Item::bare("Tennis"));
    }
}
