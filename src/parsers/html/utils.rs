/// 可以开启新分类的标题标签
pub const CATEGORY_HEADING_TAGS: &[&str] = &["h2", "h3"];

/// 标题内部承载分类名的标签
pub const HEADLINE_LABEL_TAG: &str = "span";

/// 标记章节标题的 class 值
pub const HEADLINE_CLASS: &str = "mw-headline";

/// 列表条目标签
pub const LIST_ENTRY_TAG: &str = "li";

/// 链接标签及其目标属性
pub const LINK_TAG: &str = "a";
pub const LINK_TARGET_ATTR: &str = "href";

/// 新分类条目列表的初始容量
pub const INITIAL_CATEGORY_CAPACITY: usize = 10;

/// 检查是否为分类标题标签
pub fn is_category_heading(tag_name: &str) -> bool {
    CATEGORY_HEADING_TAGS.contains(&tag_name)
}

/// 节点形状匹配结果
///
/// 分类识别和条目提取不会因为节点结构异常而失败，
/// `Malformed` 只用于诊断日志，效果等同于 `NotMatched`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeMatch<T> {
    /// 节点符合预期形状
    Matched(T),
    /// 节点不是目标类型
    NotMatched,
    /// 节点是目标类型，但缺少子节点、文本或属性
    Malformed(&'static str),
}

impl<T> NodeMatch<T> {
    /// 转换为 `Option`，丢弃不匹配的原因
    pub fn matched(self) -> Option<T> {
        match self {
            NodeMatch::Matched(value) => Some(value),
            NodeMatch::NotMatched | NodeMatch::Malformed(_) => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, NodeMatch::Matched(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_h2_and_h3_open_categories() {
        assert!(is_category_heading("h2"));
        assert!(is_category_heading("h3"));
        assert!(!is_category_heading("h1"));
        assert!(!is_category_heading("h4"));
    }

    #[test]
    fn malformed_is_treated_as_not_matched() {
        assert_eq!(NodeMatch::<u8>::Malformed("no child").matched(), None);
        assert_eq!(NodeMatch::<u8>::NotMatched.matched(), None);
        assert_eq!(NodeMatch::Matched(3).matched(), Some(3));
    }
}
