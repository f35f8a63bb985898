//! 에러 타입: 도메인별 에러 정의

/// Shelf 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum ShelfError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 페이지 조회 에러
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// 비동기 런타임 에러
    #[error("runtime error: {0}")]
    Runtime(String),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 페이지 조회 실패
///
/// 페이지 조회기가 반환하는 실패 유형입니다. HTTP 기반 조회기는
/// 상태 코드와 요청 URL을 채워서 상위 레이어가 실패를 분류할 수 있게 합니다.
/// 상태 코드 `0`은 백엔드에 도달하지 못했음을 뜻합니다.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// HTTP 응답 에러
    #[error("http status {status} from {}", .url.as_deref().unwrap_or("<unknown url>"))]
    Http {
        /// 응답 상태 코드 (도달 불가 시 0)
        status: u16,
        /// 요청 URL
        url: Option<String>,
    },

    /// 응답 본문 디코딩 실패
    #[error("failed to decode page: {0}")]
    Decode(String),

    /// 그 밖의 조회 실패
    #[error("fetch failed: {0}")]
    Other(String),
}

impl FetchError {
    /// 백엔드에 도달하지 못한 경우의 에러를 생성합니다.
    pub fn unreachable(url: impl Into<String>) -> Self {
        Self::Http {
            status: 0,
            url: Some(url.into()),
        }
    }

    /// HTTP 상태 코드 (있는 경우)
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Decode(_) | Self::Other(_) => None,
        }
    }

    /// 요청 URL (있는 경우)
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Http { url, .. } => url.as_deref(),
            Self::Decode(_) | Self::Other(_) => None,
        }
    }
}
