//! JSON 리포트 모듈
//!
//! 분할 계획과 실행 결과를 JSON 파일로 남깁니다.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::distributor::{plan_folders, DistributionReport};
use crate::error::{JSplitError, Result};
use crate::key::KeyPath;
use crate::partition::{Partition, PartitionPolicy};
use crate::scanner::ScanReport;
use crate::timestamp::format_timestamp;

/// 전체 실행 리포트
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub key: String,
    pub policy: String,
    pub group_count: usize,
    pub dry_run: bool,
    pub total_size: u64,
    pub target_size: Option<f64>,
    pub groups: Vec<GroupReport>,
    pub skipped: Vec<FileIssue>,
    pub failed: Vec<FileIssue>,
    pub move_failures: Vec<FileIssue>,
}

/// 그룹별 리포트
#[derive(Debug, Serialize)]
pub struct GroupReport {
    pub index: usize,
    pub folder: PathBuf,
    pub file_count: usize,
    pub total_size: u64,
    pub first_timestamp: Option<String>,
    pub last_timestamp: Option<String>,
    pub files: Vec<String>,
}

/// 제외/실패 파일 항목
#[derive(Debug, Serialize)]
pub struct FileIssue {
    pub path: PathBuf,
    pub reason: String,
}

impl RunReport {
    /// 스캔/분할 결과로 리포트 생성
    pub fn new(
        key: &KeyPath,
        scan: &ScanReport,
        partition: &Partition,
        output_root: &Path,
        dry_run: bool,
    ) -> Self {
        let folders = plan_folders(partition, output_root, key);

        let groups = partition
            .groups
            .iter()
            .zip(folders)
            .map(|(group, folder)| GroupReport {
                index: group.index,
                folder,
                file_count: group.len(),
                total_size: group.total_size(),
                first_timestamp: group.files.first().map(|f| format_timestamp(&f.timestamp)),
                last_timestamp: group.files.last().map(|f| format_timestamp(&f.timestamp)),
                files: group.files.iter().map(|f| f.file_name()).collect(),
            })
            .collect();

        Self {
            key: key.to_string(),
            policy: policy_name(&partition.policy).to_string(),
            group_count: partition.groups.len(),
            dry_run,
            total_size: partition.total_size,
            target_size: partition.target_size,
            groups,
            skipped: scan
                .skipped
                .iter()
                .map(|(path, reason)| FileIssue {
                    path: path.clone(),
                    reason: reason.to_string(),
                })
                .collect(),
            failed: scan
                .failed
                .iter()
                .map(|(path, error)| FileIssue {
                    path: path.clone(),
                    reason: error.to_string(),
                })
                .collect(),
            move_failures: Vec::new(),
        }
    }

    /// 이동 실패 목록 추가
    pub fn with_distribution(mut self, distribution: &DistributionReport) -> Self {
        self.move_failures = distribution
            .failures
            .iter()
            .map(|f| FileIssue {
                path: f.path.clone(),
                reason: f.error.to_string(),
            })
            .collect();
        self
    }

    /// JSON 파일로 저장
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let report_error = |reason: String| JSplitError::ReportError {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::create(path).map_err(|e| report_error(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| report_error(e.to_string()))?;
        writer.flush().map_err(|e| report_error(e.to_string()))
    }
}

fn policy_name(policy: &PartitionPolicy) -> &'static str {
    match policy {
        PartitionPolicy::EqualCount(_) => "count",
        PartitionPolicy::EqualByteSize(_) => "size",
    }
}
