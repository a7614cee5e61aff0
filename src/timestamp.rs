//! 타임스탬프 파싱 모듈
//!
//! `YYYY-MM-DD HH:MM:SS` 또는 `YYYY-MM-DD HH:MM:SS.ffffff` 형식의 문자열을
//! 비교 가능한 시각으로 변환합니다. 소수점 이하 7자리 이상은 반올림 없이
//! 6자리(마이크로초)로 잘라냅니다.

use chrono::{NaiveDateTime, Timelike};
use serde_json::Value;
use thiserror::Error;

/// 초 단위 형식
pub const SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 소수점 이하 최대 자릿수 (마이크로초)
pub const MAX_FRACTION_DIGITS: usize = 6;

/// 타임스탬프 파싱 에러
#[derive(Error, Debug)]
pub enum TimestampError {
    /// 빈 문자열
    #[error("타임스탬프 값이 비어 있습니다")]
    Empty,

    /// 문자열이 아닌 값
    #[error("타임스탬프 값이 문자열이 아닙니다: {value}")]
    NotAString { value: String },

    /// 소수부 형식 오류
    #[error("소수점 이하 형식이 잘못되었습니다: '{value}'")]
    InvalidFraction { value: String },

    /// 날짜/시간 형식 불일치
    #[error("'{value}' 값이 형식과 일치하지 않습니다: {source}")]
    Format {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// 타임스탬프 문자열 파싱
///
/// # Examples
/// ```
/// use jsplit::timestamp::parse_timestamp;
///
/// let long = parse_timestamp("2024-01-01 00:00:00.1234567").unwrap();
/// let micro = parse_timestamp("2024-01-01 00:00:00.123456").unwrap();
/// assert_eq!(long, micro);
/// ```
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, TimestampError> {
    if raw.is_empty() {
        return Err(TimestampError::Empty);
    }

    match raw.split_once('.') {
        Some((base, fraction)) => {
            let truncated: String = fraction.chars().take(MAX_FRACTION_DIGITS).collect();
            let micros = parse_fraction(&truncated).ok_or_else(|| {
                TimestampError::InvalidFraction {
                    value: raw.to_string(),
                }
            })?;

            let seconds = parse_seconds(base)?;
            seconds
                .with_nanosecond(micros * 1_000)
                .ok_or_else(|| TimestampError::InvalidFraction {
                    value: raw.to_string(),
                })
        }
        None => parse_seconds(raw),
    }
}

/// JSON 값에서 타임스탬프 파싱 (문자열만 허용)
pub fn parse_timestamp_value(value: &Value) -> Result<NaiveDateTime, TimestampError> {
    match value {
        Value::String(s) => parse_timestamp(s),
        other => Err(TimestampError::NotAString {
            value: other.to_string(),
        }),
    }
}

/// 콘솔/리포트 출력용 형식
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

fn parse_seconds(value: &str) -> Result<NaiveDateTime, TimestampError> {
    NaiveDateTime::parse_from_str(value, SECONDS_FORMAT).map_err(|source| {
        TimestampError::Format {
            value: value.to_string(),
            source,
        }
    })
}

/// 1~6자리 숫자를 마이크로초로 변환 ("12" → 120000)
fn parse_fraction(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let padded = format!("{:0<width$}", digits, width = MAX_FRACTION_DIGITS);
    padded.parse().ok()
}
