//! 에러 타입 정의 모듈
//!
//! jsplit에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

use crate::timestamp::TimestampError;

/// jsplit에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum JSplitError {
    /// 입력 폴더가 존재하지 않음
    #[error("입력 폴더를 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 입력이 폴더가 아님
    #[error("입력 경로가 폴더가 아닙니다: {path}")]
    NotADirectory { path: PathBuf },

    /// 파일 열기 또는 메타데이터 조회 실패
    #[error("파일을 열 수 없습니다 ({file}): {reason}")]
    FileOpenError { file: PathBuf, reason: String },

    /// JSON 파싱 실패
    #[error("JSON 파싱 실패 ({file}): {reason}")]
    ParseError { file: PathBuf, reason: String },

    /// 타임스탬프 파싱 실패
    #[error("타임스탬프 파싱 실패 ({file}): {source}")]
    InvalidTimestamp {
        file: PathBuf,
        #[source]
        source: TimestampError,
    },

    /// 빈 키 경로
    #[error("유효하지 않은 키 경로: '{key}'")]
    InvalidKeyPath { key: String },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 그룹 수가 0
    #[error("그룹 수는 1 이상이어야 합니다 (입력값: {groups})")]
    InvalidGroupCount { groups: usize },

    /// 분할에 필요한 파일 수 부족
    #[error("정렬 대상 파일이 {found}개뿐입니다. {required}개로 분할하기에 부족합니다")]
    InsufficientFiles { found: usize, required: usize },

    /// 그룹 폴더 생성 실패
    #[error("폴더 생성 실패 ({folder}): {reason}")]
    CreateDirError { folder: PathBuf, reason: String },

    /// 이동 대상 경로에 이미 파일이 있음
    #[error("대상 파일이 이미 존재합니다: {path}")]
    DestinationExists { path: PathBuf },

    /// 파일 이동 실패
    #[error("파일 이동 실패 ({file}): {reason}")]
    MoveError { file: PathBuf, reason: String },

    /// 리포트 작성 실패
    #[error("리포트 작성 실패 ({path}): {reason}")]
    ReportError { path: PathBuf, reason: String },
}

/// jsplit 결과 타입 별칭
pub type Result<T> = std::result::Result<T, JSplitError>;
