//! 조회 실패 분류
//!
//! 조회기가 돌려준 [`FetchError`]의 상태 코드와 요청 URL을 보고
//! 사용자에게 보여줄 메시지를 고릅니다. 분류는 모든 입력에 대해 정의되어
//! 있으며, 알 수 없는 형태는 [`FailureKind::Generic`]으로 떨어집니다.

use std::fmt;

use shelf_core::error::FetchError;

/// 백엔드 도달 불가 메시지
pub const UNREACHABLE_MESSAGE: &str = "Backend is not reachable. Start the backend and retry.";

/// 버전 API 경로의 서버 에러 메시지
pub const SERVER_ERROR_MESSAGE: &str = "Server error while loading data. Is the backend running?";

/// 그 밖의 실패 메시지
pub const GENERIC_MESSAGE: &str = "Failed to load items. Please try again.";

/// 조회 실패 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 네트워크 도달 불가 (상태 코드 0)
    Unreachable,
    /// 버전 API 경로(`/api/v1/...`)의 5xx 응답
    ServerError,
    /// 그 밖의 모든 실패
    Generic,
}

impl FailureKind {
    /// 조회 실패를 분류합니다.
    pub fn classify(err: &FetchError) -> Self {
        match err.status() {
            Some(0) => Self::Unreachable,
            Some(status) if (500..600).contains(&status) => {
                if err.url().is_some_and(is_versioned_api_path) {
                    Self::ServerError
                } else {
                    Self::Generic
                }
            }
            _ => Self::Generic,
        }
    }

    /// 사용자에게 보여줄 메시지
    pub fn message(self) -> &'static str {
        match self {
            Self::Unreachable => UNREACHABLE_MESSAGE,
            Self::ServerError => SERVER_ERROR_MESSAGE,
            Self::Generic => GENERIC_MESSAGE,
        }
    }

    /// 메트릭/로그 레이블
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unreachable => "unreachable",
            Self::ServerError => "server_error",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL에 `/api/v<숫자>` 세그먼트가 있는지 확인합니다.
fn is_versioned_api_path(url: &str) -> bool {
    const MARKER: &str = "/api/v";
    url.match_indices(MARKER).any(|(idx, _)| {
        url[idx + MARKER.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    })
}
