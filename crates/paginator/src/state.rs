//! 목록 상태
//!
//! [`ListState`]는 한 목록 인스턴스의 전체 상태입니다. 상태 전이는
//! 이 모듈의 메서드로만 일어나며, [`InfiniteScroll`](crate::scroll::InfiniteScroll)이
//! `watch` 채널의 쓰기 잠금 안에서 호출합니다.
//!
//! # 상태 전이
//! ```text
//! idle ──begin_fetch──▶ loading ──apply_page────▶ idle (entries 추가)
//!                          │
//!                          └──────apply_failure─▶ idle (error 설정)
//! any ──reset──▶ idle (비움, epoch + 1)
//! ```

use shelf_core::types::{Cursor, Page};

use crate::item::{Entry, ListItem};
use crate::separator::with_separators;

/// 발행된 조회 요청의 식별 정보
#[derive(Debug, Clone)]
pub(crate) struct FetchTicket {
    /// 요청을 발행할 때의 epoch
    pub epoch: u64,
    /// 요청에 쓸 커서
    pub cursor: Option<Cursor>,
}

/// 목록 상태 스냅샷
#[derive(Debug, Clone)]
pub struct ListState<T> {
    entries: Vec<Entry<T>>,
    loading: bool,
    has_more: bool,
    error: Option<String>,
    cursor: Option<Cursor>,
    total_count: Option<u64>,
    epoch: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            loading: false,
            has_more: true,
            error: None,
            cursor: None,
            total_count: None,
            epoch: 0,
        }
    }
}

impl<T> ListState<T> {
    /// 렌더링 순서의 엔트리 (항목과 구분자)
    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// 구분자를 제외한 항목
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter_map(Entry::as_item)
    }

    /// 누적된 항목 수 (구분자 제외)
    pub fn item_count(&self) -> usize {
        self.items().count()
    }

    /// 조회 요청이 진행 중인지
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 다음 페이지가 있는지
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// 직전 조회 실패 메시지
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 다음 요청에 쓸 커서
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// 백엔드가 알려준 전체 항목 수
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// 엔트리가 없고, 로딩 중이 아니며, 에러도 없는 상태
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && !self.loading && self.error.is_none()
    }

    /// 현재 요청 epoch
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// 조회를 시작할 수 있으면 로딩 상태로 바꾸고 요청 정보를 돌려줍니다.
    pub(crate) fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(FetchTicket {
            epoch: self.epoch,
            cursor: self.cursor.clone(),
        })
    }

    /// 응답이 아직 유효한 요청에 대한 것인지
    pub(crate) fn accepts(&self, epoch: u64) -> bool {
        self.loading && self.epoch == epoch
    }

    /// 조회 실패를 반영합니다. 엔트리, 커서, `has_more`는 그대로 둡니다.
    pub(crate) fn apply_failure(&mut self, message: &str) {
        self.error = Some(message.to_owned());
        self.loading = false;
    }

    /// 목록을 비우고 epoch를 올려 진행 중인 요청을 무효화합니다.
    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.has_more = true;
        self.error = None;
        self.total_count = None;
        self.loading = false;
        self.epoch = self.epoch.wrapping_add(1);
    }
}

impl<T: ListItem> ListState<T> {
    /// 성공한 페이지를 덧붙이고 추가된 항목 수를 돌려줍니다.
    pub(crate) fn apply_page(&mut self, page: Page<T>, group_field: Option<&str>) -> usize {
        let item_count = page.content.len();
        let appended = with_separators(&self.entries, page.content, group_field);
        self.entries.extend(appended);
        self.has_more = page.next_cursor.is_some();
        self.cursor = page.next_cursor;
        if page.total_count.is_some() {
            self.total_count = page.total_count;
        }
        self.loading = false;
        item_count
    }
}
