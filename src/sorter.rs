//! 타임스탬프 정렬 모듈

use crate::scanner::SourceFile;

/// 타임스탬프 오름차순 안정 정렬
///
/// 같은 타임스탬프를 가진 파일은 스캔 순서를 유지합니다.
pub fn sort_by_timestamp(files: &mut [SourceFile]) {
    files.sort_by_key(|file| file.timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn file(name: &str, day: u32) -> SourceFile {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        SourceFile::new(PathBuf::from(name), 1, timestamp)
    }

    #[test]
    fn test_sort_ascending() {
        let mut files = vec![file("c", 3), file("a", 1), file("b", 2)];
        sort_by_timestamp(&mut files);

        let names: Vec<_> = files.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut files = vec![
            file("late", 5),
            file("tie_1", 2),
            file("early", 1),
            file("tie_2", 2),
        ];
        sort_by_timestamp(&mut files);

        let names: Vec<_> = files.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["early", "tie_1", "tie_2", "late"]);
    }
}
