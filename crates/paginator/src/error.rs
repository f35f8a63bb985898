//! 페이지네이터 에러 타입
//!
//! 페이지 조회 실패는 에러로 전파되지 않고 목록 상태의 `error` 메시지로
//! 바뀝니다. 여기의 에러는 상태 관리자를 만들 때의 실패(옵션 검증, 런타임
//! 부재)만 다룹니다.

use shelf_core::error::{ConfigError, ShelfError};

/// 페이지네이터 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum PaginatorError {
    /// 유효하지 않은 옵션
    #[error("invalid option '{field}': {reason}")]
    InvalidOption {
        /// 옵션 이름
        field: String,
        /// 사유
        reason: String,
    },

    /// 조회 태스크를 띄울 tokio 런타임이 없음
    #[error("no tokio runtime available: {0}")]
    RuntimeUnavailable(String),
}

impl From<PaginatorError> for ShelfError {
    fn from(err: PaginatorError) -> Self {
        match err {
            PaginatorError::InvalidOption { field, reason } => {
                ShelfError::Config(ConfigError::InvalidValue { field, reason })
            }
            PaginatorError::RuntimeUnavailable(reason) => ShelfError::Runtime(reason),
        }
    }
}
