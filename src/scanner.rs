//! JSON 파일 스캔 모듈
//!
//! 입력 파일을 수집하고, 각 파일의 레코드에서 대표 타임스탬프를 추출합니다.

use chrono::NaiveDateTime;
use memmap2::Mmap;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::distributor::GROUP_FOLDER_PREFIX;
use crate::error::{JSplitError, Result};
use crate::key::{is_present, KeyPath};
use crate::pattern::PatternMatcher;
use crate::timestamp::parse_timestamp_value;

/// 타임스탬프가 확인된 입력 파일
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// 파일 경로
    pub path: PathBuf,
    /// 스캔 시점의 파일 크기 (바이트)
    pub size: u64,
    /// 대표 타임스탬프
    pub timestamp: NaiveDateTime,
}

impl SourceFile {
    pub fn new(path: PathBuf, size: u64, timestamp: NaiveDateTime) -> Self {
        Self {
            path,
            size,
            timestamp,
        }
    }

    /// 파일 이름 (표시용)
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// 파일을 건너뛴 이유 (경고 수준)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 최상위 값이 배열이 아님
    NotARecordArray,
    /// 빈 배열
    EmptyArray,
    /// 어떤 레코드에서도 키 값을 찾지 못함
    KeyNotFound { key: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotARecordArray => write!(f, "리스트 형식이 아닙니다"),
            SkipReason::EmptyArray => write!(f, "빈 리스트입니다"),
            SkipReason::KeyNotFound { key } => write!(f, "유효한 '{}' 값이 없습니다", key),
        }
    }
}

/// 단일 파일 스캔 결과
#[derive(Debug)]
pub enum ScanOutcome {
    /// 정렬 대상
    Ready(SourceFile),
    /// 경고 후 제외
    Skipped { path: PathBuf, reason: SkipReason },
    /// 에러 후 제외
    Failed { path: PathBuf, error: JSplitError },
}

/// 전체 스캔 결과
#[derive(Debug, Default)]
pub struct ScanReport {
    pub files: Vec<SourceFile>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
    pub failed: Vec<(PathBuf, JSplitError)>,
}

impl ScanReport {
    pub fn push(&mut self, outcome: ScanOutcome) {
        match outcome {
            ScanOutcome::Ready(file) => self.files.push(file),
            ScanOutcome::Skipped { path, reason } => self.skipped.push((path, reason)),
            ScanOutcome::Failed { path, error } => self.failed.push((path, error)),
        }
    }

    /// 스캔한 전체 파일 수
    pub fn total(&self) -> usize {
        self.files.len() + self.skipped.len() + self.failed.len()
    }
}

/// 스캔 옵션
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 대용량 파일 임계값 (이상이면 메모리 매핑 사용)
    pub mmap_threshold: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            mmap_threshold: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 메모리 매핑 임계값 설정
    pub fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }
}

/// 입력 폴더에서 패턴과 일치하는 JSON 파일 수집
///
/// 결과는 파일 이름 순으로 정렬되어 스캔 순서가 재현 가능합니다.
/// 이전 실행에서 만든 `group_*` 폴더 안으로는 내려가지 않습니다.
pub fn collect_json_files(
    input: &Path,
    matcher: &PatternMatcher,
    max_depth: usize,
) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(JSplitError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    if !input.is_dir() {
        return Err(JSplitError::NotADirectory {
            path: input.to_path_buf(),
        });
    }

    let json_files = WalkDir::new(input)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_group_folder(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .map(|s| s.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|s| matcher.matches(s))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    Ok(json_files)
}

fn is_group_folder(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with(GROUP_FOLDER_PREFIX))
            .unwrap_or(false)
}

/// 파일 목록 전체 스캔
///
/// `progress`는 파일 하나를 처리할 때마다 호출됩니다.
pub fn scan<F>(
    paths: Vec<PathBuf>,
    key: &KeyPath,
    options: &ScanOptions,
    mut progress: F,
) -> ScanReport
where
    F: FnMut(&Path),
{
    let mut report = ScanReport::default();

    for path in paths {
        progress(path.as_path());
        report.push(scan_file(path, key, options));
    }

    report
}

/// 단일 파일 스캔
///
/// 첫 번째로 비어 있지 않은 키 값을 가진 레코드의 타임스탬프를 사용합니다.
pub fn scan_file(path: PathBuf, key: &KeyPath, options: &ScanOptions) -> ScanOutcome {
    let size = match std::fs::metadata(&path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            let error = JSplitError::FileOpenError {
                file: path.clone(),
                reason: e.to_string(),
            };
            return ScanOutcome::Failed { path, error };
        }
    };

    let json = match load_json(&path, size, options) {
        Ok(json) => json,
        Err(error) => return ScanOutcome::Failed { path, error },
    };

    let records = match json {
        Value::Array(records) if records.is_empty() => {
            return ScanOutcome::Skipped {
                path,
                reason: SkipReason::EmptyArray,
            }
        }
        Value::Array(records) => records,
        _ => {
            return ScanOutcome::Skipped {
                path,
                reason: SkipReason::NotARecordArray,
            }
        }
    };

    let Some(raw) = first_timestamp_value(&records, key) else {
        return ScanOutcome::Skipped {
            path,
            reason: SkipReason::KeyNotFound {
                key: key.to_string(),
            },
        };
    };

    match parse_timestamp_value(raw) {
        Ok(timestamp) => ScanOutcome::Ready(SourceFile::new(path, size, timestamp)),
        Err(source) => {
            let error = JSplitError::InvalidTimestamp {
                file: path.clone(),
                source,
            };
            ScanOutcome::Failed { path, error }
        }
    }
}

/// 레코드 순서대로 첫 번째 유효한 키 값 찾기
fn first_timestamp_value<'a>(records: &'a [Value], key: &KeyPath) -> Option<&'a Value> {
    records
        .iter()
        .filter_map(|record| key.lookup(record))
        .find(|value| is_present(value))
}

fn load_json(path: &Path, size: u64, options: &ScanOptions) -> Result<Value> {
    if size >= options.mmap_threshold {
        parse_with_mmap(path)
    } else {
        parse_with_reader(path)
    }
}

/// 버퍼 리더를 사용한 JSON 파싱
fn parse_with_reader(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|e| JSplitError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| JSplitError::ParseError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// 메모리 매핑을 사용한 JSON 파싱 (대용량 파일용)
fn parse_with_mmap(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|e| JSplitError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mmap = unsafe {
        Mmap::map(&file).map_err(|e| JSplitError::FileOpenError {
            file: path.to_path_buf(),
            reason: format!("메모리 매핑 실패: {}", e),
        })?
    };

    serde_json::from_slice(&mmap).map_err(|e| JSplitError::ParseError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })
}
