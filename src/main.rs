//! jsplit - JSON TIMESTAMP SPLITTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error as StdError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use jsplit::{
    cli::Args,
    distributor::{distribute, plan_folders, DistributionReport},
    error::JSplitError,
    key::KeyPath,
    partition::{partition, Partition, PartitionPolicy},
    pattern::PatternMatcher,
    report::RunReport,
    scanner::{collect_json_files, scan, ScanOptions, ScanReport},
    sorter::sort_by_timestamp,
    stats::{format_bytes, format_megabytes, Statistics},
    timestamp::format_timestamp,
};

fn main() -> Result<()> {
    let args = Args::parse();

    let key = args.key_path().context("키 경로 확인 실패")?;
    let policy = args.partition_policy();

    // 헤더 출력
    print_header(&args, &policy);

    // 패턴 매처 초기화
    let pattern_matcher =
        PatternMatcher::new(&args.pattern).map_err(|e| anyhow::anyhow!("{}", e))?;

    // JSON 파일 수집
    let json_files = collect_json_files(&args.input, &pattern_matcher, args.max_depth)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if json_files.is_empty() {
        println!("{}", "⚠️ 처리할 JSON 파일이 없습니다.".yellow());
        return Ok(());
    }

    println!(
        "  {} 발견된 파일 수: {} (기준 키: '{}')",
        "📋".bright_white(),
        json_files.len().to_string().bright_green(),
        key
    );

    let mut stats = Statistics::new(json_files.len());

    // 타임스탬프 스캔
    let mut scan_report = run_scan(json_files, &key);
    stats.record_scan(&scan_report);
    print_scan_issues(&scan_report, args.verbose);

    // 정렬 및 분할
    let mut sorted = std::mem::take(&mut scan_report.files);
    sort_by_timestamp(&mut sorted);

    let partition = match partition(sorted, policy) {
        Ok(partition) => partition,
        Err(e @ JSplitError::InsufficientFiles { .. }) => {
            println!(
                "\n{} {} 처리를 중단합니다.",
                "❌".bright_red(),
                e.to_string().red()
            );
            if let Some(ref log_path) = args.log {
                write_error_log(log_path, &collect_errors(&scan_report, None))?;
            }
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("{}", e)),
    };

    print_partition_sizes(&partition);

    let output_root = args.output_root();
    let run_report = RunReport::new(&key, &scan_report, &partition, output_root, args.dry_run);

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&partition, output_root, &key);
        if let Some(ref log_path) = args.log {
            write_error_log(log_path, &collect_errors(&scan_report, None))?;
        }
        if let Some(ref report_path) = args.report {
            write_report(&run_report, report_path)?;
        }
        return Ok(());
    }

    // 파일 이동
    let distribution = run_distribution(&partition, output_root, &key);
    stats.record_distribution(&distribution);
    print_placements(&partition, &distribution);

    // 에러 출력
    print_move_failures(&distribution, args.verbose);

    // 로그 파일 작성
    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &collect_errors(&scan_report, Some(&distribution)))?;
    }

    if let Some(ref report_path) = args.report {
        write_report(&run_report.with_distribution(&distribution), report_path)?;
    }

    // 통계 출력
    stats.print_summary();

    println!("\n{} 처리가 완료되었습니다.\n", "✅".bright_green());

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args, policy: &PartitionPolicy) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🗂️ JSON TIMESTAMP SPLITTER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), args.input);
    println!("  {} 출력 위치: {:?}", "📄".bright_green(), args.output_root());
    println!("  {} 기준 키: {}", "🔑".bright_yellow(), args.key);
    println!("  {} 분할 기준: {}", "⚙️".bright_yellow(), policy);
    println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), args.pattern);

    if args.max_depth != 1 {
        println!("  {} 최대 깊이: {}", "📏".bright_white(), args.max_depth);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 이동 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
}

/// 타임스탬프 스캔 실행
fn run_scan(json_files: Vec<PathBuf>, key: &KeyPath) -> ScanReport {
    println!("\n{}", "🔍 타임스탬프 추출 중...".bright_cyan());

    let pb = create_progress_bar(json_files.len());
    let report = scan(json_files, key, &ScanOptions::new(), |_| pb.inc(1));
    pb.finish_with_message("완료!");

    report
}

/// 스캔 경고/에러 출력
fn print_scan_issues(report: &ScanReport, verbose: bool) {
    for (path, reason) in &report.skipped {
        println!(
            "  {} {:?}: {} 건너뜁니다.",
            "⚠️".bright_yellow(),
            path.file_name().unwrap_or_default(),
            reason.to_string().yellow()
        );
    }

    if report.failed.is_empty() {
        return;
    }

    println!("\n{}", "❌ 처리 중 오류 발생 파일:".bright_red());
    for (path, error) in &report.failed {
        println!(
            "  {} {:?}: {}",
            "•".red(),
            path.file_name().unwrap_or_default(),
            error.to_string().red()
        );
        if verbose {
            print_error_sources(error);
        }
    }
}

/// 전체/목표 크기 출력
fn print_partition_sizes(partition: &Partition) {
    println!(
        "\n  {} 정렬된 파일: {}개, 합계 {}",
        "🔃".bright_white(),
        partition.file_count(),
        format_megabytes(partition.total_size as f64)
    );

    if let Some(target) = partition.target_size {
        println!(
            "  {} 그룹당 목표 크기: {}",
            "🎯".bright_cyan(),
            format_megabytes(target)
        );
    }
}

/// 드라이런 출력
fn print_dry_run(partition: &Partition, output_root: &Path, key: &KeyPath) {
    println!("\n{}", "📋 분할 계획:".bright_cyan());

    let folders = plan_folders(partition, output_root, key);
    for (group, folder) in partition.groups.iter().zip(&folders) {
        println!(
            "  {} {:?}: {}개 파일 ({})",
            group.index,
            folder.file_name().unwrap_or_default(),
            group.len().to_string().bright_green(),
            format_bytes(group.total_size())
        );
        if let (Some(first), Some(last)) = (group.files.first(), group.files.last()) {
            println!(
                "     {} ~ {}",
                format_timestamp(&first.timestamp).dimmed(),
                format_timestamp(&last.timestamp).dimmed()
            );
        }
    }

    println!(
        "\n{} 총 {} 개의 파일이 {}개 폴더로 이동될 예정입니다.",
        "ℹ️".bright_blue(),
        partition.file_count().to_string().bright_green(),
        partition.groups.len()
    );
}

/// 파일 이동 실행
fn run_distribution(
    partition: &Partition,
    output_root: &Path,
    key: &KeyPath,
) -> DistributionReport {
    println!("\n{}", "📦 파일 분할을 시작합니다...".bright_cyan());

    let pb = create_progress_bar(partition.file_count());
    let report = distribute(partition, output_root, key, |_| pb.inc(1));
    pb.finish_with_message("완료!");

    report
}

/// 그룹별 결과 출력
fn print_placements(partition: &Partition, report: &DistributionReport) {
    for (group, placement) in partition.groups.iter().zip(&report.placements) {
        println!(
            "  {} 폴더 {:?}: {}/{}개 파일 이동 (합계 {})",
            "🗂️".bright_magenta(),
            placement.folder.file_name().unwrap_or_default(),
            placement.moved.to_string().bright_green(),
            placement.assigned,
            format_megabytes(group.total_size() as f64)
        );
    }
}

/// 이동 실패 출력
fn print_move_failures(report: &DistributionReport, verbose: bool) {
    if report.failures.is_empty() {
        return;
    }

    println!("\n{}", "❌ 이동 실패 파일:".bright_red());
    for failure in &report.failures {
        println!(
            "  {} {:?}: {}",
            "•".red(),
            failure.path.file_name().unwrap_or_default(),
            failure.error.to_string().red()
        );
        if verbose {
            print_error_sources(&failure.error);
        }
    }
}

/// 에러 원인 체인 출력
fn print_error_sources(error: &dyn StdError) {
    let mut source = error.source();
    while let Some(cause) = source {
        println!("    ↳ {}", cause.to_string().dimmed());
        source = cause.source();
    }
}

/// 로그용 에러 목록
fn collect_errors(
    scan: &ScanReport,
    distribution: Option<&DistributionReport>,
) -> Vec<(PathBuf, String)> {
    let skipped = scan
        .skipped
        .iter()
        .map(|(path, reason)| (path.clone(), format!("건너뜀: {}", reason)));
    let failed = scan
        .failed
        .iter()
        .map(|(path, error)| (path.clone(), error.to_string()));
    let moves = distribution
        .into_iter()
        .flat_map(|report| &report.failures)
        .map(|f| (f.path.clone(), f.error.to_string()));

    skipped.chain(failed).chain(moves).collect()
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// 에러 로그 파일 작성
fn write_error_log(log_path: &Path, errors: &[(PathBuf, String)]) -> Result<()> {
    let mut log_file = File::create(log_path)
        .with_context(|| format!("로그 파일 생성 실패: {:?}", log_path))?;

    writeln!(log_file, "jsplit 에러 로그")?;
    writeln!(
        log_file,
        "생성 시간: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(log_file, "총 에러 수: {}", errors.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for (path, error) in errors {
        writeln!(log_file, "\n파일: {:?}", path)?;
        writeln!(log_file, "에러: {}", error)?;
    }

    println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}

/// JSON 리포트 작성
fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    report.write_to(path).map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("{} 리포트 저장: {:?}", "📝".bright_cyan(), path);
    Ok(())
}
