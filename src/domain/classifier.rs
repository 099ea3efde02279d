//! Heading classification against an ordered cascade of per-level patterns.

use regex::Regex;
use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};

/// Level 1: `一、Title`
pub const CJK_ENUMERATION: &str = r"^([一二三四五六七八九十]+)、\s*(\S.*)$";
/// Level 2: `（一）Title`
pub const CJK_PARENTHESIZED: &str = r"^（([一二三四五六七八九十]+)）\s*(\S.*)$";
/// Level 3: `1. Title`
pub const DIGIT_PERIOD: &str = r"^([0-9]+)\.\s*(\S.*)$";
/// Optional extra level: `（1）Title`
pub const DIGIT_PARENTHESIZED: &str = r"^（([0-9]+)）\s*(\S.*)$";

/// One heading shape: a regex capturing the numeral (group 1) and the title
/// (group 2), plus the literals that rebuild the numbering token around the
/// numeral.
#[derive(Debug, Clone)]
pub struct HeadingPattern {
    regex: Regex,
    prefix: String,
    suffix: String,
}

impl HeadingPattern {
    /// Compile a heading pattern.
    ///
    /// `level` is only used for error reporting; the effective level is the
    /// position in [`HeadingPatterns`].
    pub fn new(
        level: usize,
        pattern: &str,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> DomainResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| DomainError::InvalidPattern {
            level,
            pattern: pattern.to_string(),
            source,
        })?;
        // captures_len counts the implicit whole-match group
        if regex.captures_len() < 3 {
            return Err(DomainError::MissingCaptureGroups {
                level,
                pattern: pattern.to_string(),
            });
        }
        Ok(Self {
            regex,
            prefix: prefix.into(),
            suffix: suffix.into(),
        })
    }

    pub fn cjk_enumeration() -> Self {
        Self::builtin(CJK_ENUMERATION, "", "、")
    }

    pub fn cjk_parenthesized() -> Self {
        Self::builtin(CJK_PARENTHESIZED, "（", "）")
    }

    pub fn digit_period() -> Self {
        Self::builtin(DIGIT_PERIOD, "", ".")
    }

    pub fn parenthesized_digits() -> Self {
        Self::builtin(DIGIT_PARENTHESIZED, "（", "）")
    }

    fn builtin(pattern: &str, prefix: &str, suffix: &str) -> Self {
        Self {
            regex: Regex::new(pattern).expect("builtin heading pattern compiles"),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Rebuild the numbering token, e.g. `一` -> `一、`.
    pub fn format_number(&self, numeral: &str) -> String {
        format!("{}{}{}", self.prefix, numeral, self.suffix)
    }

    fn captures<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.regex.captures(line)?;
        let numeral = caps.get(1)?.as_str();
        let title = caps.get(2)?.as_str().trim_end();
        if title.is_empty() {
            return None;
        }
        Some((numeral, title))
    }
}

/// A line recognized as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// 1-based nesting level
    pub level: usize,
    /// Bare numeral as captured, without punctuation
    pub numeral: &'a str,
    /// Heading text with the numbering stripped
    pub title: &'a str,
}

/// Ordered heading patterns, level 1 first.
#[derive(Debug, Clone)]
pub struct HeadingPatterns {
    patterns: Vec<HeadingPattern>,
}

impl Default for HeadingPatterns {
    fn default() -> Self {
        Self {
            patterns: vec![
                HeadingPattern::cjk_enumeration(),
                HeadingPattern::cjk_parenthesized(),
                HeadingPattern::digit_period(),
            ],
        }
    }
}

impl HeadingPatterns {
    pub fn new(patterns: Vec<HeadingPattern>) -> DomainResult<Self> {
        if patterns.is_empty() {
            return Err(DomainError::EmptyPatternSet);
        }
        Ok(Self { patterns })
    }

    /// Number of configured levels.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, level: usize) -> Option<&HeadingPattern> {
        level.checked_sub(1).and_then(|i| self.patterns.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeadingPattern> {
        self.patterns.iter()
    }

    /// Classify a trimmed line. First matching level wins, shallowest first.
    pub fn classify<'a>(&self, line: &'a str) -> Option<Heading<'a>> {
        self.patterns
            .iter()
            .enumerate()
            .find_map(|(i, pattern)| {
                pattern.captures(line).map(|(numeral, title)| Heading {
                    level: i + 1,
                    numeral,
                    title,
                })
            })
            .inspect(|h| trace!(level = h.level, numeral = h.numeral, "heading"))
    }

    pub fn format_number(&self, level: usize, numeral: &str) -> Option<String> {
        self.get(level).map(|p| p.format_number(numeral))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("一、授信申请方案1", 1, "一", "授信申请方案1")]
    #[case("十二、 风险评估", 1, "十二", "风险评估")]
    #[case("（一）基本情况", 2, "一", "基本情况")]
    #[case("1. 贷款主体", 3, "1", "贷款主体")]
    #[case("12.批复额度", 3, "12", "批复额度")]
    fn given_heading_line_when_classifying_then_extracts_parts(
        #[case] line: &str,
        #[case] level: usize,
        #[case] numeral: &str,
        #[case] title: &str,
    ) {
        let patterns = HeadingPatterns::default();
        let heading = patterns.classify(line).expect("heading");
        assert_eq!(heading.level, level);
        assert_eq!(heading.numeral, numeral);
        assert_eq!(heading.title, title);
    }

    #[rstest]
    #[case("贷款主体为 XX 有限公司")]
    #[case("2024 年批复总额为……")]
    #[case("一、")]
    #[case("（一）")]
    #[case("3.")]
    #[case("| 产品 | 销量 |")]
    fn given_body_line_when_classifying_then_no_match(#[case] line: &str) {
        assert!(HeadingPatterns::default().classify(line).is_none());
    }

    #[test]
    fn given_default_patterns_when_formatting_then_reconstructs_punctuation() {
        let patterns = HeadingPatterns::default();
        assert_eq!(patterns.format_number(1, "二"), Some("二、".to_string()));
        assert_eq!(patterns.format_number(2, "三"), Some("（三）".to_string()));
        assert_eq!(patterns.format_number(3, "4"), Some("4.".to_string()));
        assert_eq!(patterns.format_number(4, "4"), None);
        assert_eq!(patterns.format_number(0, "4"), None);
    }

    #[test]
    fn given_pattern_without_groups_when_compiling_then_errors() {
        let result = HeadingPattern::new(1, r"^[0-9]+\.", "", ".");
        assert!(matches!(
            result,
            Err(DomainError::MissingCaptureGroups { level: 1, .. })
        ));
    }

    #[test]
    fn given_broken_regex_when_compiling_then_errors() {
        let result = HeadingPattern::new(2, r"^(([0-9]+", "", "");
        assert!(matches!(result, Err(DomainError::InvalidPattern { level: 2, .. })));
    }

    #[test]
    fn given_empty_pattern_list_when_creating_then_errors() {
        assert!(matches!(
            HeadingPatterns::new(vec![]),
            Err(DomainError::EmptyPatternSet)
        ));
    }

    #[test]
    fn given_fourth_level_when_classifying_then_uses_position_as_level() {
        let mut levels: Vec<HeadingPattern> = HeadingPatterns::default().iter().cloned().collect();
        levels.push(HeadingPattern::parenthesized_digits());
        let patterns = HeadingPatterns::new(levels).unwrap();

        let heading = patterns.classify("（2）补充说明").unwrap();
        assert_eq!(heading.level, 4);
        assert_eq!(patterns.format_number(4, heading.numeral), Some("（2）".to_string()));
    }
}
