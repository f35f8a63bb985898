//! 설정 관리: shelf.toml 파싱 및 런타임 설정
//!
//! [`ShelfConfig`]는 모든 컴포넌트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`SHELF_PAGINATION_PAGE_SIZE=50` 형식)
//! 3. 설정 파일 (`shelf.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), shelf_core::error::ShelfError> {
//! use shelf_core::config::ShelfConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = ShelfConfig::load("shelf.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = ShelfConfig::parse("[pagination]\npage_size = 50")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ShelfError};

/// 기본 페이지 크기
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Shelf 통합 설정
///
/// `shelf.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShelfConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 목록 페이지네이션 설정
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// 백엔드 API 설정
    #[serde(default)]
    pub backend: BackendConfig,
}

impl ShelfConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ShelfError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ShelfError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ShelfError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                ShelfError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, ShelfError> {
        toml::from_str(toml_str).map_err(|e| {
            ShelfError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SHELF_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "SHELF_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SHELF_GENERAL_LOG_FORMAT");

        // Pagination
        override_usize(
            &mut self.pagination.page_size,
            "SHELF_PAGINATION_PAGE_SIZE",
        );
        override_bool(
            &mut self.pagination.enable_group_separators,
            "SHELF_PAGINATION_ENABLE_GROUP_SEPARATORS",
        );
        override_opt_string(
            &mut self.pagination.group_key_field,
            "SHELF_PAGINATION_GROUP_KEY_FIELD",
        );

        // Backend
        override_string(&mut self.backend.base_url, "SHELF_BACKEND_BASE_URL");
        override_string(&mut self.backend.books_path, "SHELF_BACKEND_BOOKS_PATH");
        override_string(&mut self.backend.series_path, "SHELF_BACKEND_SERIES_PATH");
        override_string(
            &mut self.backend.authors_path,
            "SHELF_BACKEND_AUTHORS_PATH",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ShelfError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        self.pagination.validate()?;

        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".to_owned(),
                reason: "must start with http:// or https://".to_owned(),
            }
            .into());
        }

        for (field, path) in [
            ("backend.books_path", &self.backend.books_path),
            ("backend.series_path", &self.backend.series_path),
            ("backend.authors_path", &self.backend.authors_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: field.to_owned(),
                    reason: "must be an absolute path starting with '/'".to_owned(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 목록 페이지네이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// 한 번에 요청할 항목 수
    pub page_size: usize,
    /// 알파벳 그룹 구분자 삽입 여부
    pub enable_group_separators: bool,
    /// 그룹 키를 제공하는 항목 필드 (구분자 사용 시 필수)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_key_field: Option<String>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            enable_group_separators: false,
            group_key_field: None,
        }
    }
}

impl PaginationConfig {
    /// 페이지네이션 설정만 검증합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_size".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        if self.enable_group_separators {
            let missing = self
                .group_key_field
                .as_deref()
                .is_none_or(|field| field.trim().is_empty());
            if missing {
                return Err(ConfigError::InvalidValue {
                    field: "pagination.group_key_field".to_owned(),
                    reason: "required when enable_group_separators is true".to_owned(),
                });
            }
        }

        Ok(())
    }
}

/// 백엔드 API 설정
///
/// 조회기 구현이 요청 URL을 조립할 때 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// 백엔드 기본 URL
    pub base_url: String,
    /// 도서 목록 경로
    pub books_path: String,
    /// 시리즈 목록 경로
    pub series_path: String,
    /// 저자 목록 경로
    pub authors_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            books_path: "/api/v1/books".to_owned(),
            series_path: "/api/v1/series".to_owned(),
            authors_path: "/api/v1/authors".to_owned(),
        }
    }
}

impl BackendConfig {
    /// 기본 URL과 경로를 이어 요청 URL을 만듭니다.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_opt_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = if val.trim().is_empty() { None } else { Some(val) };
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
