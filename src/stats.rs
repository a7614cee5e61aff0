//! 통계 및 유틸리티 모듈
//!
//! 실행 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

use crate::distributor::DistributionReport;
use crate::scanner::ScanReport;

/// 실행 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 발견된 파일 수
    pub total_files: usize,
    /// 정렬 대상이 된 파일 수
    pub sortable: usize,
    /// 경고 후 제외된 파일 수
    pub skipped: usize,
    /// 에러 후 제외된 파일 수
    pub failed: usize,
    /// 이동된 파일 수
    pub moved: usize,
    /// 이동 실패 수
    pub move_failed: usize,
    /// 이동된 총 바이트
    pub bytes_moved: u64,
    /// 생성/확인한 그룹 폴더 수
    pub groups: usize,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 스캔 결과 반영
    pub fn record_scan(&mut self, report: &ScanReport) {
        self.sortable = report.files.len();
        self.skipped = report.skipped.len();
        self.failed = report.failed.len();
    }

    /// 배치 결과 반영
    pub fn record_distribution(&mut self, report: &DistributionReport) {
        self.groups = report.placements.len();
        self.moved = report.moved();
        self.move_failed = report.failures.len();
        self.bytes_moved = report.moved_bytes();
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 실행 통계 요약 출력
    pub fn print_summary(&self) {
        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 처리 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!("  {} 전체 파일:    {}", "📁".bright_cyan(), self.total_files);
        println!(
            "  {} 정렬 대상:    {}",
            "✅".bright_green(),
            self.sortable.to_string().green()
        );

        let excluded = self.skipped + self.failed;
        if excluded > 0 {
            println!(
                "  {} 제외:         {} (경고 {}, 에러 {})",
                "⚠️".bright_yellow(),
                excluded.to_string().yellow(),
                self.skipped,
                self.failed
            );
        } else {
            println!("  {} 제외:         {}", "✅".bright_green(), "0".green());
        }

        println!("  {} 그룹 폴더:    {}", "🗂️".bright_magenta(), self.groups);
        println!(
            "  {} 이동 완료:    {}",
            "📦".bright_white(),
            self.moved.to_string().green()
        );

        if self.move_failed > 0 {
            println!(
                "  {} 이동 실패:    {}",
                "❌".bright_red(),
                self.move_failed.to_string().red()
            );
        }

        println!(
            "  {} 이동 용량:    {}",
            "📤".bright_yellow(),
            format_bytes(self.bytes_moved)
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use jsplit::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 바이트를 MB 단위 문자열로 변환 (목표 크기 표시용)
pub fn format_megabytes(bytes: f64) -> String {
    format!("{:.2} MB", bytes / (1024.0 * 1024.0))
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}시간 {}분", hours, mins)
    } else if secs >= 60 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}분 {}초", mins, remaining_secs)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::SkipReason;
    use std::path::PathBuf;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
    }

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(1048576.0), "1.00 MB");
        assert_eq!(format_megabytes(100_000.0), "0.10 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.000초");
        assert_eq!(format_duration(Duration::from_secs(65)), "1분 5초");
        assert_eq!(format_duration(Duration::from_secs(3665)), "1시간 1분");
    }

    #[test]
    fn test_record_scan() {
        let mut report = ScanReport::default();
        report
            .skipped
            .push((PathBuf::from("a.json"), SkipReason::EmptyArray));
        report
            .skipped
            .push((PathBuf::from("b.json"), SkipReason::NotARecordArray));

        let mut stats = Statistics::new(2);
        stats.record_scan(&report);

        assert_eq!(stats.sortable, 0);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.failed, 0);
    }
}
