//! 패턴 매칭 모듈
//!
//! glob 패턴을 사용한 입력 파일 이름 필터링을 담당합니다.

use glob::Pattern;

use crate::error::{JSplitError, Result};

/// 기본 입력 파일 패턴
pub const DEFAULT_PATTERN: &str = "dummy_data_*.json";

/// 컴파일된 패턴 매처
pub struct PatternMatcher {
    raw: String,
    pattern: Pattern,
}

impl PatternMatcher {
    /// 새 패턴 매처 생성
    ///
    /// # Arguments
    /// * `pattern` - 글로브 패턴 문자열
    ///
    /// # Examples
    /// ```
    /// use jsplit::pattern::PatternMatcher;
    ///
    /// let matcher = PatternMatcher::new("dummy_data_*.json").unwrap();
    /// assert!(matcher.matches("dummy_data_001.json"));
    /// assert!(!matcher.matches("report.json"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        let compiled = Pattern::new(pattern).map_err(|_| JSplitError::InvalidPattern {
            pattern: pattern.to_string(),
        })?;

        Ok(Self {
            raw: pattern.to_string(),
            pattern: compiled,
        })
    }

    /// 파일 이름이 패턴과 일치하는지 확인
    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.matches(file_name)
    }

    /// 원본 패턴 문자열
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        let matcher = PatternMatcher::new(DEFAULT_PATTERN).unwrap();
        assert!(matcher.matches("dummy_data_1.json"));
        assert!(matcher.matches("dummy_data_2024_01.json"));
        assert!(!matcher.matches("dummy_data.json"));
        assert!(!matcher.matches("other_1.json"));
        assert_eq!(matcher.as_str(), DEFAULT_PATTERN);
    }

    #[test]
    fn test_pattern_matcher_with_question_mark() {
        let matcher = PatternMatcher::new("log?.json").unwrap();
        assert!(matcher.matches("log1.json"));
        assert!(!matcher.matches("log.json"));
        assert!(!matcher.matches("log12.json"));
    }

    #[test]
    fn test_pattern_matcher_with_brackets() {
        let matcher = PatternMatcher::new("part[0-9].json").unwrap();
        assert!(matcher.matches("part1.json"));
        assert!(!matcher.matches("partA.json"));
    }

    #[test]
    fn test_pattern_matcher_invalid() {
        assert!(matches!(
            PatternMatcher::new("[invalid"),
            Err(JSplitError::InvalidPattern { .. })
        ));
    }
}
