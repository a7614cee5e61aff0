//! jsplit - JSON TIMESTAMP SPLITTER
//!
//! 폴더 내 JSON 파일들을 레코드의 타임스탬프 순으로 정렬하여 N개의 폴더로
//! 나누어 이동하는 CLI 도구입니다.
//!
//! # 처리 흐름
//!
//! 1. 📁 **수집**: glob 패턴과 일치하는 JSON 파일 탐색
//! 2. 🔍 **스캔**: 각 파일에서 첫 번째 유효한 타임스탬프 추출 (`a.b.c` 중첩 키 지원)
//! 3. 🔃 **정렬**: 타임스탬프 오름차순 안정 정렬
//! 4. ✂️ **분할**: 파일 수 균등 또는 누적 크기 균등 정책으로 N개 그룹 생성
//! 5. 📦 **이동**: `group_<키>_<번호>` 폴더로 파일 이동
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법 (현재 폴더, fixedAt 키, 10개 그룹)
//! jsplit
//!
//! # 크기 기준 11개 그룹, 계획만 확인
//! jsplit -i ./data --mode size --dry-run
//!
//! # 중첩 키 사용
//! jsplit -i ./data --key reviewData.date
//! ```

pub mod cli;
pub mod distributor;
pub mod error;
pub mod key;
pub mod partition;
pub mod pattern;
pub mod report;
pub mod scanner;
pub mod sorter;
pub mod stats;
pub mod timestamp;

// Re-exports for convenient access
pub use cli::{Args, SplitMode};
pub use distributor::{distribute, group_folder_name, DistributionReport};
pub use error::{JSplitError, Result};
pub use key::KeyPath;
pub use partition::{partition, Group, Partition, PartitionPolicy};
pub use pattern::PatternMatcher;
pub use scanner::{collect_json_files, scan, ScanOptions, ScanOutcome, ScanReport, SourceFile};
pub use sorter::sort_by_timestamp;
pub use stats::{format_bytes, Statistics};
pub use timestamp::parse_timestamp;
