use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::{respond, FaqEntry};
use crate::error::{Error, Result};

/// Ordered, read-only collection of FAQ entries.
///
/// Built once at startup and never modified afterwards; entry order is the
/// matching order used by [`respond`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<FaqEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    /// The platform's stock customer-service questions.
    pub fn builtin() -> Self {
        Self::new(vec![
            FaqEntry::new(
                "阜平大枣的保质期是多久？",
                "阜平大枣在密封干燥环境下可保存12个月，开封后建议在3个月内食用完毕。",
                "产品咨询",
            ),
            FaqEntry::new(
                "核桃如何保存？",
                "核桃应存放在阴凉干燥处，避免阳光直射，可冷藏保存延长保质期。",
                "产品咨询",
            ),
            FaqEntry::new(
                "蜂蜜结晶了还能吃吗？",
                "蜂蜜结晶是正常现象，不影响品质和营养，可隔水加热恢复液态。",
                "产品咨询",
            ),
            FaqEntry::new(
                "如何申请退换货？",
                "收货后7天内如有质量问题可申请退换货，请联系客服提供订单号和问题照片。",
                "售后服务",
            ),
            FaqEntry::new(
                "配送范围和时间？",
                "全国包邮，一般3-5个工作日到达，偏远地区可能需要7-10天。",
                "物流配送",
            ),
        ])
    }

    /// Parse a JSON array of `{question, answer, category}` objects.
    ///
    /// Every field must be non-blank. An empty array is accepted.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<FaqEntry> = serde_json::from_str(json)?;

        for (index, entry) in entries.iter().enumerate() {
            let blank = [
                ("question", &entry.question),
                ("answer", &entry.answer),
                ("category", &entry.category),
            ]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty());

            if let Some((field, _)) = blank {
                return Err(Error::InvalidEntry { index, field });
            }
        }

        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading knowledge base from {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let kb = Self::from_json_str(&content)?;
        info!("Loaded {} FAQ entries from {}", kb.len(), path.display());
        Ok(kb)
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a quick question by its 1-based number.
    pub fn get(&self, number: usize) -> Option<&FaqEntry> {
        number.checked_sub(1).and_then(|index| self.entries.get(index))
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !categories.contains(&entry.category.as_str()) {
                categories.push(&entry.category);
            }
        }
        categories
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a FaqEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.category == category)
    }

    pub fn respond(&self, query: &str) -> &str {
        respond(query, &self.entries)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::faq::FALLBACK_RESPONSE;

    #[test]
    fn test_builtin_order_and_categories() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.len(), 5);
        assert_eq!(kb.entries()[0].question, "阜平大枣的保质期是多久？");
        assert_eq!(kb.entries()[4].question, "配送范围和时间？");
        assert_eq!(kb.categories(), vec!["产品咨询", "售后服务", "物流配送"]);
    }

    #[test]
    fn test_by_category_keeps_order() {
        let kb = KnowledgeBase::builtin();
        let questions: Vec<&str> = kb
            .by_category("产品咨询")
            .map(|entry| entry.question.as_str())
            .collect();
        assert_eq!(
            questions,
            vec!["阜平大枣的保质期是多久？", "核桃如何保存？", "蜂蜜结晶了还能吃吗？"]
        );
        assert_eq!(kb.by_category("不存在").count(), 0);
    }

    #[test]
    fn test_get_is_one_based() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.get(0).is_none());
        assert_eq!(kb.get(1).map(|e| e.category.as_str()), Some("产品咨询"));
        assert_eq!(kb.get(4).map(|e| e.category.as_str()), Some("售后服务"));
        assert!(kb.get(6).is_none());
    }

    #[test]
    fn test_builtin_respond() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.respond("你好，如何申请退换货？"),
            "收货后7天内如有质量问题可申请退换货，请联系客服提供订单号和问题照片。"
        );
        // Built-in questions are single tokens, so partial phrasing misses.
        assert_eq!(kb.respond("大枣能放多久"), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_from_json_str() {
        let kb = KnowledgeBase::from_json_str(
            r#"[
                {"question": "保质期 多久", "answer": "12个月", "category": "A"},
                {"question": "运费", "answer": "包邮", "category": "B"}
            ]"#,
        )
        .unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.respond("请问保质期是多久"), "12个月");
    }

    #[test]
    fn test_from_json_str_accepts_empty_array() {
        let kb = KnowledgeBase::from_json_str("[]").unwrap();
        assert!(kb.is_empty());
        assert_eq!(kb.respond("任何问题"), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_from_json_str_rejects_blank_fields() {
        let err = KnowledgeBase::from_json_str(
            r#"[
                {"question": "运费", "answer": "包邮", "category": "B"},
                {"question": "保质期", "answer": "  ", "category": "A"}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEntry {
                index: 1,
                field: "answer"
            }
        ));
    }

    #[test]
    fn test_from_json_str_rejects_missing_fields() {
        let err = KnowledgeBase::from_json_str(r#"[{"question": "运费", "answer": "包邮"}]"#)
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let err = KnowledgeBase::from_json_str("not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"question": "蜂蜜", "answer": "纯天然", "category": "山区蜂蜜"}}]"#
        )
        .unwrap();

        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.respond("蜂蜜怎么卖"), "纯天然");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = KnowledgeBase::load(&path).unwrap_err();
        match err {
            Error::Io { path: err_path, .. } => assert_eq!(err_path, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
