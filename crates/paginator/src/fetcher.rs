//! 페이지 조회 추상화
//!
//! [`PageFetcher`] trait은 커서와 페이지 크기를 받아 한 페이지를 돌려주는
//! 외부 협력자(백엔드 REST 클라이언트 등)를 추상화합니다.
//!
//! # 구현
//!
//! - [`FnFetcher`]: 비동기 클로저를 감싸는 어댑터 ([`fetcher_fn`])
//! - [`MemoryFetcher`]: 메모리 상의 정렬된 목록을 오프셋 커서로 나눠 주는 소스
//!
//! # 조회기 책임
//!
//! - 그룹 구분자를 쓸 때 그룹 필드 기준의 안정된 정렬 순서
//! - 같은 커서를 다시 주면 같은 페이지를 돌려주는 멱등성
//! - 실패 시 가능하면 HTTP 상태 코드와 요청 URL을 [`FetchError::Http`]로 전달

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use shelf_core::error::FetchError;
use shelf_core::types::{Cursor, Page};

/// 페이지 조회 trait
///
/// `Send + Sync + 'static`이라 목록 상태 관리자가 백그라운드 태스크에서
/// 호출할 수 있습니다.
pub trait PageFetcher<T>: Send + Sync + 'static {
    /// `cursor` 위치부터 최대 `page_size`개의 항목을 조회합니다.
    ///
    /// `cursor`가 `None`이면 첫 페이지입니다.
    fn fetch_page(
        &self,
        cursor: Option<Cursor>,
        page_size: usize,
    ) -> impl Future<Output = Result<Page<T>, FetchError>> + Send;
}

/// 공유 조회기
///
/// 상태 관리자에 넘긴 뒤에도 호출 측이 조회기 핸들을 유지할 수 있습니다.
impl<T, F: PageFetcher<T>> PageFetcher<T> for Arc<F> {
    fn fetch_page(
        &self,
        cursor: Option<Cursor>,
        page_size: usize,
    ) -> impl Future<Output = Result<Page<T>, FetchError>> + Send {
        (**self).fetch_page(cursor, page_size)
    }
}

/// 비동기 클로저 조회기
pub struct FnFetcher<F> {
    fetch: F,
}

/// 비동기 클로저를 [`PageFetcher`]로 감쌉니다.
///
/// ```ignore
/// let fetcher = fetcher_fn(|cursor, size| async move {
///     client.books(cursor, size).await
/// });
/// ```
pub fn fetcher_fn<F>(fetch: F) -> FnFetcher<F> {
    FnFetcher { fetch }
}

impl<T, F, Fut> PageFetcher<T> for FnFetcher<F>
where
    F: Fn(Option<Cursor>, usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Page<T>, FetchError>> + Send,
{
    fn fetch_page(
        &self,
        cursor: Option<Cursor>,
        page_size: usize,
    ) -> impl Future<Output = Result<Page<T>, FetchError>> + Send {
        (self.fetch)(cursor, page_size)
    }
}

/// 메모리 기반 조회기
///
/// 커서는 다음 페이지의 시작 오프셋(10진수 문자열)입니다. 같은 커서는
/// 항상 같은 페이지를 돌려줍니다. [`fail_next`](Self::fail_next)로
/// 다음 한 번의 조회를 실패시킬 수 있습니다.
pub struct MemoryFetcher<T> {
    items: Vec<T>,
    source_url: String,
    injected_failure: Mutex<Option<FetchError>>,
}

impl<T: Clone + Send + Sync + 'static> MemoryFetcher<T> {
    /// 항목 목록으로 조회기를 생성합니다. 항목 순서가 곧 페이지 순서입니다.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            source_url: "memory://items".to_owned(),
            injected_failure: Mutex::new(None),
        }
    }

    /// 에러 메시지에 쓸 소스 URL을 지정합니다.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// 전체 항목 수
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 항목이 없는지
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 다음 조회 한 번을 주어진 에러로 실패시킵니다.
    pub fn fail_next(&self, err: FetchError) {
        *self
            .injected_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(err);
    }

    /// 커서 위치의 페이지를 계산합니다.
    pub fn page_at(&self, cursor: Option<&Cursor>, page_size: usize) -> Result<Page<T>, FetchError> {
        if let Some(err) = self
            .injected_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            return Err(err);
        }

        let offset = match cursor {
            None => 0,
            Some(cursor) => cursor.as_str().parse::<usize>().map_err(|_| FetchError::Http {
                status: 400,
                url: Some(format!("{}?cursor={}", self.source_url, cursor)),
            })?,
        };
        if offset > self.items.len() {
            return Err(FetchError::Http {
                status: 400,
                url: Some(format!("{}?cursor={offset}", self.source_url)),
            });
        }

        let end = offset.saturating_add(page_size.max(1)).min(self.items.len());
        let content = self.items[offset..end].to_vec();
        let total = u64::try_from(self.items.len()).unwrap_or(u64::MAX);

        let page = if end < self.items.len() {
            Page::with_next(content, end.to_string(), page_size)
        } else {
            Page::last(content, page_size)
        };
        Ok(page.total_count(total))
    }
}

impl<T: Clone + Send + Sync + 'static> PageFetcher<T> for MemoryFetcher<T> {
    fn fetch_page(
        &self,
        cursor: Option<Cursor>,
        page_size: usize,
    ) -> impl Future<Output = Result<Page<T>, FetchError>> + Send {
        std::future::ready(self.page_at(cursor.as_ref(), page_size))
    }
}
