//! 그룹 분할 모듈
//!
//! 정렬된 파일 목록을 연속된 N개의 그룹으로 나눕니다.
//!
//! - [`PartitionPolicy::EqualCount`]: 그룹 간 파일 수 차이가 최대 1
//! - [`PartitionPolicy::EqualByteSize`]: 그룹별 누적 크기가 목표 크기(전체/N)에
//!   가깝도록 앞에서부터 채움

use std::fmt;

use crate::error::{JSplitError, Result};
use crate::scanner::SourceFile;

/// 파일 수 기준 기본 그룹 수
pub const DEFAULT_COUNT_GROUPS: usize = 10;

/// 크기 기준 기본 그룹 수 (크기 끝수를 받아낼 마지막 그룹 포함)
pub const DEFAULT_SIZE_GROUPS: usize = 11;

/// 분할 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionPolicy {
    /// 파일 수 균등 분할
    EqualCount(usize),
    /// 누적 바이트 크기 균등 분할
    EqualByteSize(usize),
}

impl PartitionPolicy {
    /// 목표 그룹 수
    pub fn groups(&self) -> usize {
        match self {
            PartitionPolicy::EqualCount(n) | PartitionPolicy::EqualByteSize(n) => *n,
        }
    }
}

impl fmt::Display for PartitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionPolicy::EqualCount(n) => write!(f, "파일 수 균등 ({}개 그룹)", n),
            PartitionPolicy::EqualByteSize(n) => write!(f, "파일 크기 균등 ({}개 그룹)", n),
        }
    }
}

/// 하나의 출력 폴더에 들어갈 파일 묶음
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// 1부터 시작하는 그룹 번호
    pub index: usize,
    pub files: Vec<SourceFile>,
}

impl Group {
    /// 그룹 내 파일 크기 합계
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// 분할 결과
#[derive(Debug, Clone)]
pub struct Partition {
    pub policy: PartitionPolicy,
    pub groups: Vec<Group>,
    /// 전체 파일 크기 합계
    pub total_size: u64,
    /// 그룹당 목표 크기 (크기 기준 정책에서만)
    pub target_size: Option<f64>,
}

impl Partition {
    /// 분할된 전체 파일 수
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

/// 정렬된 파일 목록을 정책에 따라 분할
///
/// 파일 수가 그룹 수보다 적으면 아무 그룹도 만들지 않고 에러를 반환합니다.
pub fn partition(files: Vec<SourceFile>, policy: PartitionPolicy) -> Result<Partition> {
    let n = policy.groups();
    if n == 0 {
        return Err(JSplitError::InvalidGroupCount { groups: n });
    }
    if files.len() < n {
        return Err(JSplitError::InsufficientFiles {
            found: files.len(),
            required: n,
        });
    }

    let total_size: u64 = files.iter().map(|f| f.size).sum();

    let (lengths, target_size) = match policy {
        PartitionPolicy::EqualCount(_) => (even_split_lengths(files.len(), n), None),
        PartitionPolicy::EqualByteSize(_) => {
            let sizes: Vec<u64> = files.iter().map(|f| f.size).collect();
            (
                size_balanced_lengths(&sizes, n),
                Some(total_size as f64 / n as f64),
            )
        }
    };

    Ok(Partition {
        policy,
        groups: split_into_groups(files, &lengths),
        total_size,
        target_size,
    })
}

/// 파일 수 균등 분할 길이
///
/// 각 그룹은 `len / n`개이며, 앞쪽 `len % n`개 그룹이 하나씩 더 가집니다.
pub fn even_split_lengths(len: usize, n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }

    let base = len / n;
    let extra = len % n;
    (0..n).map(|i| base + usize::from(i < extra)).collect()
}

/// 누적 크기 기준 분할 길이
///
/// 현재 그룹의 누적 크기가 `total / n` 이상이 되고 확정된 그룹이 `n - 1`개
/// 미만이면 그룹을 닫습니다. 남은 파일은 마지막 그룹이 모두 가져갑니다.
/// 남은 파일 수가 아직 열리지 않은 그룹 수와 같아지면 목표 크기에 못 미쳐도
/// 그룹을 닫아, 크기 편차가 커도 항상 `n`개 그룹이 만들어집니다.
/// `sizes.len() >= n`을 전제로 합니다.
pub fn size_balanced_lengths(sizes: &[u64], n: usize) -> Vec<usize> {
    if n == 0 || sizes.is_empty() {
        return Vec::new();
    }

    let total: u128 = sizes.iter().map(|&s| u128::from(s)).sum();
    let groups = n as u128;

    let mut lengths = Vec::with_capacity(n);
    let mut current_len = 0usize;
    let mut current_size = 0u128;

    for (i, &size) in sizes.iter().enumerate() {
        current_len += 1;
        current_size += u128::from(size);

        let closed = lengths.len();
        if closed >= n - 1 {
            continue;
        }

        let remaining = sizes.len() - i - 1;
        let reached_target = current_size * groups >= total;
        let must_close = remaining <= n - closed - 1;

        if reached_target || must_close {
            lengths.push(current_len);
            current_len = 0;
            current_size = 0;
        }
    }

    if current_len > 0 {
        lengths.push(current_len);
    }

    lengths
}

fn split_into_groups(files: Vec<SourceFile>, lengths: &[usize]) -> Vec<Group> {
    let mut iter = files.into_iter();

    lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| Group {
            index: i + 1,
            files: iter.by_ref().take(len).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::path::PathBuf;

    fn files_with_sizes(sizes: &[u64]) -> Vec<SourceFile> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                SourceFile::new(
                    PathBuf::from(format!("dummy_data_{:02}.json", i)),
                    size,
                    base + Duration::minutes(i as i64),
                )
            })
            .collect()
    }

    #[test]
    fn test_even_split_lengths() {
        assert_eq!(even_split_lengths(10, 10), vec![1; 10]);
        assert_eq!(even_split_lengths(23, 10), vec![3, 3, 3, 2, 2, 2, 2, 2, 2, 2]);
        assert_eq!(even_split_lengths(7, 3), vec![3, 2, 2]);
    }

    #[test]
    fn test_even_split_bounds() {
        for len in 10..60 {
            let lengths = even_split_lengths(len, 10);
            assert_eq!(lengths.len(), 10);
            assert_eq!(lengths.iter().sum::<usize>(), len);
            for l in lengths {
                assert!(l == len / 10 || l == len.div_ceil(10));
            }
        }
    }

    #[test]
    fn test_size_balanced_closes_at_target() {
        // 합계 1,100,000 / 11 = 100,000
        let mut sizes = vec![100_000; 10];
        sizes.extend([50_000, 50_000]);

        let lengths = size_balanced_lengths(&sizes, 11);
        assert_eq!(lengths, vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_size_balanced_accumulates_small_files() {
        // 합계 400 / 4 = 100
        let sizes = [40, 40, 40, 100, 60, 60, 30, 30];
        assert_eq!(size_balanced_lengths(&sizes, 4), vec![3, 1, 2, 2]);
    }

    #[test]
    fn test_size_balanced_last_group_absorbs_remainder() {
        let sizes = [10; 20];
        let lengths = size_balanced_lengths(&sizes, 3);
        // 목표 66.7 → 7개씩 닫힘, 마지막 그룹이 나머지 6개
        assert_eq!(lengths, vec![7, 7, 6]);
    }

    #[test]
    fn test_size_balanced_skewed_sizes_still_yield_n_groups() {
        let mut sizes = vec![1; 10];
        sizes.push(1_000_000);
        let lengths = size_balanced_lengths(&sizes, 11);
        assert_eq!(lengths, vec![1; 11]);

        let sizes = [1_000_000, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
        let lengths = size_balanced_lengths(&sizes, 5);
        assert_eq!(lengths.len(), 5);
        assert_eq!(lengths.iter().sum::<usize>(), sizes.len());
        assert!(lengths.iter().all(|&l| l > 0));
    }

    #[test]
    fn test_size_balanced_zero_sizes() {
        let sizes = [0; 12];
        let lengths = size_balanced_lengths(&sizes, 11);
        assert_eq!(lengths.len(), 11);
        assert_eq!(lengths.iter().sum::<usize>(), 12);
    }

    #[test]
    fn test_partition_equal_count() {
        let files = files_with_sizes(&[1; 10]);
        let result = partition(files.clone(), PartitionPolicy::EqualCount(10)).unwrap();

        assert_eq!(result.groups.len(), 10);
        assert!(result.target_size.is_none());
        for (group, file) in result.groups.iter().zip(&files) {
            assert_eq!(group.files, vec![file.clone()]);
        }
        assert_eq!(result.groups[9].index, 10);
    }

    #[test]
    fn test_partition_equal_byte_size_covers_all_files() {
        let sizes = [5, 900, 3, 3, 70, 10, 10, 10, 400, 1, 1, 2, 250, 8, 8];
        let files = files_with_sizes(&sizes);
        let result = partition(files.clone(), PartitionPolicy::EqualByteSize(11)).unwrap();

        assert_eq!(result.groups.len(), 11);
        assert_eq!(result.total_size, sizes.iter().sum::<u64>());
        assert!(result.groups.iter().all(|g| !g.is_empty()));

        let flattened: Vec<SourceFile> = result
            .groups
            .iter()
            .flat_map(|g| g.files.iter().cloned())
            .collect();
        assert_eq!(flattened, files);
    }

    #[test]
    fn test_partition_target_size() {
        let files = files_with_sizes(&[100_000; 11]);
        let result = partition(files, PartitionPolicy::EqualByteSize(11)).unwrap();
        assert_eq!(result.target_size, Some(100_000.0));
        assert_eq!(result.file_count(), 11);
    }

    #[test]
    fn test_partition_insufficient_files() {
        let files = files_with_sizes(&[1; 5]);
        assert!(matches!(
            partition(files.clone(), PartitionPolicy::EqualCount(10)),
            Err(JSplitError::InsufficientFiles {
                found: 5,
                required: 10
            })
        ));
        assert!(matches!(
            partition(files, PartitionPolicy::EqualByteSize(11)),
            Err(JSplitError::InsufficientFiles { .. })
        ));
    }

    #[test]
    fn test_partition_zero_groups() {
        assert!(matches!(
            partition(Vec::new(), PartitionPolicy::EqualCount(0)),
            Err(JSplitError::InvalidGroupCount { groups: 0 })
        ));
    }
}
