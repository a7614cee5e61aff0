//! 키 경로 모듈
//!
//! `"a.b.c"` 형식의 점 구분 키 경로로 중첩 JSON 객체의 값을 찾습니다.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{JSplitError, Result};

/// 점(`.`)으로 구분된 키 경로
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    raw: String,
    segments: Vec<String>,
}

impl KeyPath {
    /// 키 경로 파싱
    ///
    /// 빈 문자열만 거부합니다. `"a..b"`처럼 빈 세그먼트가 있으면
    /// 빈 이름의 키를 그대로 찾습니다.
    ///
    /// # Examples
    /// ```
    /// use jsplit::key::KeyPath;
    /// use serde_json::json;
    ///
    /// let key = KeyPath::new("review.date").unwrap();
    /// let record = json!({"review": {"date": "2024-01-01 00:00:00"}});
    /// assert_eq!(key.lookup(&record), Some(&json!("2024-01-01 00:00:00")));
    /// ```
    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(JSplitError::InvalidKeyPath {
                key: raw.to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            segments: raw.split('.').map(str::to_string).collect(),
        })
    }

    /// 원본 키 경로 문자열
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// 세그먼트 목록
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// 폴더 이름용 표현 (`.` → `_`)
    pub fn folder_fragment(&self) -> String {
        self.raw.replace('.', "_")
    }

    /// 레코드에서 키 경로의 값을 찾음
    ///
    /// 중간 값이 객체가 아니거나 키가 없으면 `None`을 반환합니다.
    pub fn lookup<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        let mut current = record;

        for segment in &self.segments {
            match current {
                Value::Object(map) => {
                    current = map.get(segment)?;
                }
                _ => return None,
            }
        }

        Some(current)
    }
}

impl FromStr for KeyPath {
    type Err = JSplitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// 값이 "비어 있지 않은지" 확인
///
/// `null`, `false`, 0, 빈 문자열, 빈 배열, 빈 객체는 비어 있는 값입니다.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
