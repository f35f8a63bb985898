//! 목록 상태 관리자 옵션
//!
//! [`ScrollOptions`]는 core의 [`PaginationConfig`]를 기반으로
//! 런타임에만 존재하는 옵션(동적 페이지 크기 제공자)을 더합니다.
//!
//! # 사용 예시
//! ```ignore
//! use shelf_paginator::options::ScrollOptionsBuilder;
//!
//! let options = ScrollOptionsBuilder::new()
//!     .page_size(50)
//!     .group_by("name")
//!     .build()?;
//! ```

use std::fmt;
use std::sync::Arc;

use shelf_core::config::{DEFAULT_PAGE_SIZE, PaginationConfig};

use crate::error::PaginatorError;

/// 조회할 때마다 호출되는 페이지 크기 제공자
pub type PageSizeProvider = Arc<dyn Fn() -> usize + Send + Sync>;

/// 목록 상태 관리자 옵션
#[derive(Clone)]
pub struct ScrollOptions {
    /// 한 번에 요청할 항목 수
    pub page_size: usize,
    /// 그룹 구분자 삽입 여부
    pub enable_group_separators: bool,
    /// 그룹 키 필드 (구분자 사용 시 필수)
    pub group_key_field: Option<String>,
    /// 동적 페이지 크기 제공자 (`page_size`보다 우선)
    pub page_size_provider: Option<PageSizeProvider>,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            enable_group_separators: false,
            group_key_field: None,
            page_size_provider: None,
        }
    }
}

impl fmt::Debug for ScrollOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollOptions")
            .field("page_size", &self.page_size)
            .field("enable_group_separators", &self.enable_group_separators)
            .field("group_key_field", &self.group_key_field)
            .field("page_size_provider", &self.page_size_provider.is_some())
            .finish()
    }
}

impl ScrollOptions {
    /// core 설정에서 옵션을 생성합니다.
    pub fn from_core(core: &PaginationConfig) -> Self {
        Self {
            page_size: core.page_size,
            enable_group_separators: core.enable_group_separators,
            group_key_field: core.group_key_field.clone(),
            page_size_provider: None,
        }
    }

    /// 옵션의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PaginatorError> {
        if self.page_size == 0 {
            return Err(PaginatorError::InvalidOption {
                field: "page_size".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        if self.enable_group_separators && self.grouping_field().is_none() {
            return Err(PaginatorError::InvalidOption {
                field: "group_key_field".to_owned(),
                reason: "required when enable_group_separators is true".to_owned(),
            });
        }

        Ok(())
    }

    /// 이번 조회에 쓸 페이지 크기
    ///
    /// 제공자가 있으면 매번 호출해 그 값을 그대로 씁니다. 0만은 요청할 수
    /// 없는 크기라 `page_size`로 대신합니다.
    pub fn effective_page_size(&self) -> usize {
        match &self.page_size_provider {
            Some(provider) => match provider() {
                0 => self.page_size,
                size => size,
            },
            None => self.page_size,
        }
    }

    /// 구분자가 켜져 있을 때의 그룹 키 필드
    pub fn grouping_field(&self) -> Option<&str> {
        if !self.enable_group_separators {
            return None;
        }
        self.group_key_field
            .as_deref()
            .map(str::trim)
            .filter(|field| !field.is_empty())
    }
}

/// [`ScrollOptions`] 빌더
#[derive(Default)]
pub struct ScrollOptionsBuilder {
    options: ScrollOptions,
}

impl ScrollOptionsBuilder {
    /// 기본값으로 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// core 설정에서 시작합니다.
    pub fn from_core(core: &PaginationConfig) -> Self {
        Self {
            options: ScrollOptions::from_core(core),
        }
    }

    /// 페이지 크기를 설정합니다.
    pub fn page_size(mut self, size: usize) -> Self {
        self.options.page_size = size;
        self
    }

    /// 그룹 구분자를 켜고 그룹 키 필드를 지정합니다.
    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.options.enable_group_separators = true;
        self.options.group_key_field = Some(field.into());
        self
    }

    /// 그룹 구분자를 끕니다.
    pub fn without_separators(mut self) -> Self {
        self.options.enable_group_separators = false;
        self
    }

    /// 동적 페이지 크기 제공자를 설정합니다.
    pub fn page_size_provider<P>(mut self, provider: P) -> Self
    where
        P: Fn() -> usize + Send + Sync + 'static,
    {
        self.options.page_size_provider = Some(Arc::new(provider));
        self
    }

    /// 옵션을 검증하고 생성합니다.
    pub fn build(self) -> Result<ScrollOptions, PaginatorError> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn default_options_are_valid() {
        let options = ScrollOptions::default();
        options.validate().unwrap();
        assert_eq!(options.page_size, 20);
        assert!(options.grouping_field().is_none());
    }

    #[test]
    fn from_core_preserves_values() {
        let core = PaginationConfig {
            page_size: 35,
            enable_group_separators: true,
            group_key_field: Some("title".to_owned()),
        };
        let options = ScrollOptions::from_core(&core);
        assert_eq!(options.page_size, 35);
        assert_eq!(options.grouping_field(), Some("title"));
        assert!(options.page_size_provider.is_none());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let err = ScrollOptionsBuilder::new().page_size(0).build().unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn validate_requires_group_field() {
        let options = ScrollOptions {
            enable_group_separators: true,
            ..ScrollOptions::default()
        };
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("group_key_field"));
    }

    #[test]
    fn blank_group_field_is_rejected() {
        let err = ScrollOptionsBuilder::new().group_by("  ").build().unwrap_err();
        assert!(err.to_string().contains("group_key_field"));
    }

    #[test]
    fn grouping_field_is_none_when_disabled() {
        let options = ScrollOptionsBuilder::new()
            .group_by("name")
            .without_separators()
            .build()
            .unwrap();
        assert_eq!(options.group_key_field.as_deref(), Some("name"));
        assert!(options.grouping_field().is_none());
    }

    #[test]
    fn provider_overrides_page_size_on_every_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let options = ScrollOptionsBuilder::new()
            .page_size(10)
            .page_size_provider(move || 5 + counter.fetch_add(1, Ordering::SeqCst))
            .build()
            .unwrap();

        assert_eq!(options.effective_page_size(), 5);
        assert_eq!(options.effective_page_size(), 6);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn provider_zero_falls_back_to_page_size() {
        let options = ScrollOptionsBuilder::new()
            .page_size(12)
            .page_size_provider(|| 0)
            .build()
            .unwrap();
        assert_eq!(options.effective_page_size(), 12);
    }

    #[test]
    fn large_provider_value_is_used_as_is() {
        let options = ScrollOptionsBuilder::new()
            .page_size_provider(|| 5_000)
            .build()
            .unwrap();
        assert_eq!(options.effective_page_size(), 5_000);
    }

    #[test]
    fn large_static_page_size_is_accepted() {
        let options = ScrollOptionsBuilder::new().page_size(1_500).build().unwrap();
        assert_eq!(options.page_size, 1_500);
        assert_eq!(options.effective_page_size(), 1_500);
    }

    #[test]
    fn debug_hides_provider_closure() {
        let options = ScrollOptionsBuilder::new()
            .page_size_provider(|| 3)
            .build()
            .unwrap();
        let debug = format!("{options:?}");
        assert!(debug.contains("page_size_provider: true"));
    }
}
