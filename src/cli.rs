//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::key::KeyPath;
use crate::partition::{PartitionPolicy, DEFAULT_COUNT_GROUPS, DEFAULT_SIZE_GROUPS};
use crate::pattern::DEFAULT_PATTERN;

/// 분할 기준
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum SplitMode {
    /// 파일 수 균등 분할 (기본 10개 그룹)
    #[default]
    Count,
    /// 누적 파일 크기 균등 분할 (기본 11개 그룹)
    Size,
}

impl std::fmt::Display for SplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitMode::Count => write!(f, "Count"),
            SplitMode::Size => write!(f, "Size"),
        }
    }
}

/// jsplit CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "jsplit",
    author = "YourName <your@email.com>",
    version,
    about = "JSON TIMESTAMP SPLITTER - 타임스탬프 순으로 JSON 파일들을 N개의 폴더로 분할하는 CLI 도구",
    long_about = r#"
JSON TIMESTAMP SPLITTER
=======================

폴더 내 JSON 파일(레코드 배열)을 읽어 지정한 키의 타임스탬프로
오름차순 정렬한 뒤, N개의 group_<키>_<번호> 폴더로 나누어 이동합니다.

분할 기준:
  • count: 폴더마다 파일 수가 거의 같도록 (기본 10개 그룹)
  • size:  폴더마다 누적 파일 크기가 거의 같도록 (기본 11개 그룹)

타임스탬프 형식:
  YYYY-MM-DD HH:MM:SS 또는 YYYY-MM-DD HH:MM:SS.ffffff
  (소수점 이하 7자리 이상은 6자리로 잘라냄)

예제:
  jsplit
  jsplit -i ./data --key reviewData.date
  jsplit -i ./data --mode size --dry-run
  jsplit -i ./data --pattern "*.json" --groups 5 --report plan.json
"#
)]
pub struct Args {
    /// JSON 파일들이 있는 입력 폴더 경로
    #[arg(short, long, default_value = ".")]
    pub input: PathBuf,

    /// 그룹 폴더를 만들 위치 (기본값: 입력 폴더)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 정렬 기준 타임스탬프 키 (중첩 키는 "a.b.c" 형식)
    #[arg(short, long, default_value = "fixedAt")]
    pub key: String,

    /// 분할 기준
    #[arg(short, long, value_enum, default_value_t = SplitMode::Count)]
    pub mode: SplitMode,

    /// 그룹 수 (기본값: count 10, size 11)
    #[arg(short, long)]
    pub groups: Option<usize>,

    /// 파일 이름 패턴 필터 (glob 형식)
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// 최대 폴더 탐색 깊이 (1 = 입력 폴더만, group_* 폴더는 제외)
    #[arg(long, default_value_t = 1)]
    pub max_depth: usize,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 이동 없이 분할 계획만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// JSON 리포트 파일 경로
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl Args {
    /// 키 경로 파싱
    pub fn key_path(&self) -> Result<KeyPath> {
        KeyPath::new(&self.key)
    }

    /// 분할 정책 생성
    pub fn partition_policy(&self) -> PartitionPolicy {
        match self.mode {
            SplitMode::Count => {
                PartitionPolicy::EqualCount(self.groups.unwrap_or(DEFAULT_COUNT_GROUPS))
            }
            SplitMode::Size => {
                PartitionPolicy::EqualByteSize(self.groups.unwrap_or(DEFAULT_SIZE_GROUPS))
            }
        }
    }

    /// 그룹 폴더 생성 위치
    pub fn output_root(&self) -> &Path {
        self.output.as_deref().unwrap_or(self.input.as_path())
    }
}
