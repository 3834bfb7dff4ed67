pub mod knowledge_base;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use knowledge_base::KnowledgeBase;

/// Reply used when no stored question shares a token with the query.
pub const FALLBACK_RESPONSE: &str = "抱歉，我没有找到相关信息。您可以联系人工客服获得更详细的帮助。";

/// A single stored question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub category: String,
}

impl FaqEntry {
    pub fn new(question: &str, answer: &str, category: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            category: category.to_string(),
        }
    }

    /// Returns the first whitespace-delimited token of the question that
    /// occurs verbatim inside `query`.
    ///
    /// Splitting uses Unicode `White_Space`, so the ASCII separator controls
    /// U+001C..U+001F stay inside a token.
    fn matching_token<'a>(&'a self, query: &str) -> Option<&'a str> {
        self.question
            .split_whitespace()
            .find(|token| query.contains(*token))
    }
}

/// Pick the answer for `query`.
///
/// Entries are tried front to back and the first one with any question token
/// contained in the query wins. Matching is a plain substring test: no case
/// folding, no punctuation handling, no word segmentation. Short tokens will
/// therefore match a lot of unrelated queries.
pub fn respond<'a>(query: &str, entries: &'a [FaqEntry]) -> &'a str {
    let hit = entries
        .iter()
        .enumerate()
        .find_map(|(index, entry)| entry.matching_token(query).map(|token| (index, token, entry)));

    match hit {
        Some((index, token, entry)) => {
            debug!(index, token, category = %entry.category, "matched FAQ entry");
            entry.answer.as_str()
        }
        None => {
            debug!(entries = entries.len(), "no FAQ entry matched, using fallback");
            FALLBACK_RESPONSE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelf_life_kb() -> Vec<FaqEntry> {
        vec![FaqEntry::new("保质期 多久", "12个月", "A")]
    }

    #[test]
    fn test_split_tokens_match_inside_query() {
        let kb = shelf_life_kb();
        assert_eq!(respond("请问保质期是多久", &kb), "12个月");
    }

    #[test]
    fn test_unrelated_query_falls_back() {
        let kb = shelf_life_kb();
        assert_eq!(respond("你好", &kb), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_empty_query_falls_back() {
        let kb = shelf_life_kb();
        assert_eq!(respond("", &kb), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_empty_knowledge_base_falls_back() {
        assert_eq!(respond("请问保质期是多久", &[]), FALLBACK_RESPONSE);
        assert_eq!(respond("", &[]), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let kb = vec![
            FaqEntry::new("运费", "包邮", "物流"),
            FaqEntry::new("保质期", "12个月", "产品"),
            FaqEntry::new("保质期 运费", "另一个答案", "其他"),
        ];
        // Both the first and the third entry match; order decides, not match count.
        assert_eq!(respond("保质期和运费", &kb), "包邮");
        assert_eq!(respond("保质期多长", &kb), "12个月");
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let kb = vec![FaqEntry::new("Shipping time", "3-5 days", "logistics")];
        assert_eq!(respond("what is the shipping cost", &kb), FALLBACK_RESPONSE);
        assert_eq!(respond("Shipping?", &kb), "3-5 days");
    }

    #[test]
    fn test_punctuation_is_part_of_the_token() {
        let kb = vec![FaqEntry::new("核桃如何保存？", "阴凉干燥处", "产品咨询")];
        assert_eq!(respond("核桃如何保存", &kb), FALLBACK_RESPONSE);
        assert_eq!(respond("请问核桃如何保存？谢谢", &kb), "阴凉干燥处");
    }

    #[test]
    fn test_single_character_token_matches_broadly() {
        let kb = vec![
            FaqEntry::new("的 价格", "每斤20元", "价格"),
            FaqEntry::new("退货", "7天内可退", "售后"),
        ];
        // "的" appears almost everywhere, so the first entry shadows the second.
        assert_eq!(respond("我的退货怎么办", &kb), "每斤20元");
    }

    #[test]
    fn test_whitespace_only_question_never_matches() {
        let kb = vec![FaqEntry::new("   ", "never", "x")];
        assert_eq!(respond("anything at all", &kb), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_separator_controls_do_not_split_tokens() {
        let kb = vec![FaqEntry::new("保质期\u{1f}多久", "12个月", "A")];
        assert_eq!(respond("请问保质期是多久", &kb), FALLBACK_RESPONSE);
        assert_eq!(respond("保质期\u{1f}多久?", &kb), "12个月");
    }

    #[test]
    fn test_builtin_questions_answer_themselves() {
        let kb = KnowledgeBase::builtin();
        for entry in kb.entries() {
            assert_eq!(respond(&entry.question, kb.entries()), entry.answer);
        }
    }
}
