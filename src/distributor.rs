//! 파일 배치 모듈
//!
//! 그룹마다 출력 폴더를 만들고 파일을 이동합니다. 개별 파일의 이동 실패는
//! 기록만 하고 나머지 파일 처리를 계속합니다.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{JSplitError, Result};
use crate::key::KeyPath;
use crate::partition::{Group, Partition};

/// 그룹 폴더 이름 접두사
pub const GROUP_FOLDER_PREFIX: &str = "group_";

/// 그룹 폴더 이름 (예: `group_fixedAt_01`)
pub fn group_folder_name(key: &KeyPath, index: usize) -> String {
    format!("{}{}_{:02}", GROUP_FOLDER_PREFIX, key.folder_fragment(), index)
}

/// 그룹별 대상 폴더 목록 (디스크 변경 없음)
pub fn plan_folders(partition: &Partition, output_root: &Path, key: &KeyPath) -> Vec<PathBuf> {
    partition
        .groups
        .iter()
        .map(|group| output_root.join(group_folder_name(key, group.index)))
        .collect()
}

/// 그룹 하나의 배치 결과
#[derive(Debug, Clone)]
pub struct GroupPlacement {
    pub index: usize,
    pub folder: PathBuf,
    /// 이동에 성공한 파일 수
    pub moved: usize,
    /// 이동에 성공한 파일 크기 합계
    pub moved_bytes: u64,
    /// 그룹에 배정된 파일 수
    pub assigned: usize,
}

/// 이동 실패 기록
#[derive(Debug)]
pub struct MoveFailure {
    pub path: PathBuf,
    pub error: JSplitError,
}

/// 전체 배치 결과
#[derive(Debug, Default)]
pub struct DistributionReport {
    pub placements: Vec<GroupPlacement>,
    pub failures: Vec<MoveFailure>,
}

impl DistributionReport {
    /// 이동된 전체 파일 수
    pub fn moved(&self) -> usize {
        self.placements.iter().map(|p| p.moved).sum()
    }

    /// 이동된 전체 바이트
    pub fn moved_bytes(&self) -> u64 {
        self.placements.iter().map(|p| p.moved_bytes).sum()
    }
}

/// 그룹 순서대로 폴더를 만들고 파일을 이동
///
/// `progress`는 파일 하나를 처리할 때마다 호출됩니다.
pub fn distribute<F>(
    partition: &Partition,
    output_root: &Path,
    key: &KeyPath,
    mut progress: F,
) -> DistributionReport
where
    F: FnMut(&Path),
{
    let mut report = DistributionReport::default();

    for group in &partition.groups {
        let folder = output_root.join(group_folder_name(key, group.index));
        let placement = place_group(group, folder, &mut report.failures, &mut progress);
        report.placements.push(placement);
    }

    report
}

fn place_group<F>(
    group: &Group,
    folder: PathBuf,
    failures: &mut Vec<MoveFailure>,
    progress: &mut F,
) -> GroupPlacement
where
    F: FnMut(&Path),
{
    let mut placement = GroupPlacement {
        index: group.index,
        folder,
        moved: 0,
        moved_bytes: 0,
        assigned: group.len(),
    };

    if let Err(e) = fs::create_dir_all(&placement.folder) {
        for file in &group.files {
            progress(file.path.as_path());
            failures.push(MoveFailure {
                path: file.path.clone(),
                error: JSplitError::CreateDirError {
                    folder: placement.folder.clone(),
                    reason: e.to_string(),
                },
            });
        }
        return placement;
    }

    for file in &group.files {
        progress(file.path.as_path());
        match move_file(&file.path, &placement.folder) {
            Ok(_) => {
                placement.moved += 1;
                placement.moved_bytes += file.size;
            }
            Err(error) => failures.push(MoveFailure {
                path: file.path.clone(),
                error,
            }),
        }
    }

    placement
}

/// 파일 이름을 유지한 채 폴더로 이동
///
/// 대상 경로에 이미 파일이 있으면 덮어쓰지 않고 에러를 반환합니다.
/// `rename`이 실패하면 (다른 파일 시스템 등) 복사 후 원본 삭제를 시도합니다.
pub fn move_file(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let file_name = src.file_name().ok_or_else(|| JSplitError::MoveError {
        file: src.to_path_buf(),
        reason: "파일 이름이 없습니다".to_string(),
    })?;
    let dest = dest_dir.join(file_name);

    if dest.exists() {
        return Err(JSplitError::DestinationExists { path: dest });
    }

    let rename_err = match fs::rename(src, &dest) {
        Ok(()) => return Ok(dest),
        Err(e) => e,
    };

    let move_error = |reason: String| JSplitError::MoveError {
        file: src.to_path_buf(),
        reason,
    };

    if fs::copy(src, &dest).is_err() {
        let _ = fs::remove_file(&dest);
        return Err(move_error(rename_err.to_string()));
    }

    if let Err(e) = fs::remove_file(src) {
        let _ = fs::remove_file(&dest);
        return Err(move_error(e.to_string()));
    }

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{partition, PartitionPolicy};
    use crate::scanner::SourceFile;
    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    fn key() -> KeyPath {
        KeyPath::new("fixedAt").unwrap()
    }

    fn make_files(dir: &Path, count: usize) -> Vec<SourceFile> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..count)
            .map(|i| {
                let path = dir.join(format!("dummy_data_{}.json", i));
                fs::write(&path, "[]").unwrap();
                SourceFile::new(path, 2, base + Duration::seconds(i as i64))
            })
            .collect()
    }

    #[test]
    fn test_group_folder_name() {
        assert_eq!(group_folder_name(&key(), 1), "group_fixedAt_01");
        assert_eq!(group_folder_name(&key(), 11), "group_fixedAt_11");

        let nested = KeyPath::new("reviewData.date").unwrap();
        assert_eq!(group_folder_name(&nested, 3), "group_reviewData_date_03");
    }

    #[test]
    fn test_move_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.json");
        fs::write(&src, "[]").unwrap();
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();

        let dest = move_file(&src, &dest_dir).unwrap();
        assert_eq!(dest, dest_dir.join("a.json"));
        assert!(dest.exists());
        assert!(!src.exists());
    }

    #[test]
    fn test_move_file_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.json");
        fs::write(&src, "[1]").unwrap();
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();
        fs::write(dest_dir.join("a.json"), "[2]").unwrap();

        assert!(matches!(
            move_file(&src, &dest_dir),
            Err(JSplitError::DestinationExists { .. })
        ));
        assert!(src.exists());
        assert_eq!(fs::read_to_string(dest_dir.join("a.json")).unwrap(), "[2]");
    }

    #[test]
    fn test_distribute_moves_every_file() {
        let dir = TempDir::new().unwrap();
        let files = make_files(dir.path(), 7);
        let result = partition(files, PartitionPolicy::EqualCount(3)).unwrap();

        let mut calls = 0;
        let report = distribute(&result, dir.path(), &key(), |_| calls += 1);

        assert_eq!(calls, 7);
        assert_eq!(report.moved(), 7);
        assert_eq!(report.moved_bytes(), 14);
        assert!(report.failures.is_empty());

        let counts: Vec<_> = report.placements.iter().map(|p| p.moved).collect();
        assert_eq!(counts, vec![3, 2, 2]);
        assert!(dir.path().join("group_fixedAt_01/dummy_data_0.json").exists());
        assert!(dir.path().join("group_fixedAt_03/dummy_data_6.json").exists());
    }

    #[test]
    fn test_distribute_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        let files = make_files(dir.path(), 4);
        let result = partition(files, PartitionPolicy::EqualCount(2)).unwrap();

        // 첫 파일을 미리 삭제해 이동 실패를 유도
        fs::remove_file(dir.path().join("dummy_data_0.json")).unwrap();

        let report = distribute(&result, dir.path(), &key(), |_| {});

        assert_eq!(report.moved(), 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, dir.path().join("dummy_data_0.json"));
        assert!(dir.path().join("group_fixedAt_01/dummy_data_1.json").exists());
    }

    #[test]
    fn test_plan_folders() {
        let dir = TempDir::new().unwrap();
        let files = make_files(dir.path(), 3);
        let result = partition(files, PartitionPolicy::EqualCount(3)).unwrap();

        let folders = plan_folders(&result, Path::new("out"), &key());
        assert_eq!(
            folders,
            vec![
                PathBuf::from("out/group_fixedAt_01"),
                PathBuf::from("out/group_fixedAt_02"),
                PathBuf::from("out/group_fixedAt_03"),
            ]
        );
        assert!(!dir.path().join("group_fixedAt_01").exists());
    }
}
