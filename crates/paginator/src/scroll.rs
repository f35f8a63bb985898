//! 무한 스크롤 목록 상태 관리자
//!
//! [`InfiniteScroll`]은 페이지 조회기를 순차적으로 호출해 결과를 누적하고,
//! 그룹 구분자를 삽입하며, 상태와 에러 메시지를 노출합니다.
//!
//! # 내부 아키텍처
//! ```text
//! load_more() ──send_if_modified(begin_fetch)──▶ Handle::spawn 
//!                                                   │
//!                          PageFetcher::fetch_page ◀┘
//!                                   │
//!      watch::Sender<ListState> ◀───┘ (epoch가 같을 때만 반영)
//!                │
//!                ▼
//!       subscribe()로 받은 Receiver들
//! ```
//!
//! 상태는 `watch` 채널 안에만 있고, 모든 전이는 채널의 쓰기 잠금 안에서
//! 일어납니다. 그래서 `loading` 확인과 설정이 원자적이며 한 인스턴스에서
//! 동시에 진행되는 조회는 최대 하나입니다.
//!
//! `reset()`은 epoch를 올립니다. 그 전에 발행된 요청의 응답은 도착해도
//! epoch가 달라 버려집니다.

use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, warn};

use shelf_core::error::FetchError;
use shelf_core::metrics as m;
use shelf_core::types::Page;

use crate::error::PaginatorError;
use crate::failure::FailureKind;
use crate::fetcher::PageFetcher;
use crate::item::ListItem;
use crate::options::ScrollOptions;
use crate::state::{FetchTicket, ListState};

/// 무한 스크롤 목록 상태 관리자
///
/// 복제한 핸들은 같은 상태를 공유합니다. 서로 다른 `new()` 호출로 만든
/// 인스턴스끼리는 아무것도 공유하지 않습니다.
///
/// # 사용 예시
/// ```ignore
/// use shelf_paginator::{InfiniteScroll, MemoryFetcher, ScrollOptionsBuilder};
///
/// let options = ScrollOptionsBuilder::new().group_by("name").build()?;
/// let scroll = InfiniteScroll::new(MemoryFetcher::new(books), options)?;
///
/// let state = scroll.wait_idle().await;
/// if scroll.load_more() {
///     let state = scroll.wait_idle().await;
/// }
/// ```
pub struct InfiniteScroll<T, F> {
    shared: Arc<Shared<T, F>>,
}

impl<T, F> Clone for InfiniteScroll<T, F> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<T, F> {
    fetcher: F,
    options: ScrollOptions,
    state: watch::Sender<ListState<T>>,
    runtime: Handle,
}

/// 조회 응답을 상태에 반영한 결과 (로그/메트릭용)
enum Resolution {
    Applied { items: usize, has_more: bool },
    Failed { kind: FailureKind, error: FetchError },
    Stale { current_epoch: u64 },
}

impl<T, F> InfiniteScroll<T, F>
where
    T: ListItem,
    F: PageFetcher<T>,
{
    /// 상태 관리자를 만들고 첫 페이지 조회를 바로 시작합니다.
    ///
    /// 호출 시점의 tokio 런타임 핸들을 잡아 두고 이후 조회 태스크를 모두
    /// 그 런타임에 spawn합니다. 런타임 밖에서 호출하면
    /// [`PaginatorError::RuntimeUnavailable`]을 반환합니다.
    pub fn new(fetcher: F, options: ScrollOptions) -> Result<Self, PaginatorError> {
        options.validate()?;
        let runtime = Handle::try_current()
            .map_err(|e| PaginatorError::RuntimeUnavailable(e.to_string()))?;
        let (state, _) = watch::channel(ListState::default());
        let scroll = Self {
            shared: Arc::new(Shared {
                fetcher,
                options,
                state,
                runtime,
            }),
        };
        scroll.reset();
        Ok(scroll)
    }

    /// 다음 페이지 조회를 시작합니다.
    ///
    /// 이미 조회 중이거나 더 불러올 페이지가 없으면 아무것도 하지 않고
    /// `false`를 반환합니다. 조회를 발행했으면 응답을 기다리지 않고 `true`를
    /// 반환합니다. 실패는 반환되지 않고 상태의 `error`로 드러납니다.
    pub fn load_more(&self) -> bool {
        let mut ticket = None;
        self.shared.state.send_if_modified(|state| {
            ticket = state.begin_fetch();
            ticket.is_some()
        });

        match ticket {
            Some(ticket) => {
                self.spawn_fetch(ticket);
                true
            }
            None => {
                debug!("load_more ignored: fetch in flight or no more pages");
                false
            }
        }
    }

    /// 목록을 비우고 첫 페이지부터 다시 조회합니다.
    ///
    /// 진행 중인 요청은 취소하지 않지만 그 응답은 반영되지 않습니다.
    pub fn reset(&self) -> bool {
        let mut ticket = None;
        self.shared.state.send_modify(|state| {
            state.reset();
            ticket = state.begin_fetch();
        });

        match ticket {
            Some(ticket) => {
                debug!(epoch = ticket.epoch, "list reset");
                self.spawn_fetch(ticket);
                true
            }
            None => false,
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let page_size = self.shared.options.effective_page_size();
        let shared = Arc::clone(&self.shared);
        self.shared.runtime.spawn(async move {
            shared.run_fetch(ticket, page_size).await;
        });
    }

    /// 현재 상태의 복사본
    pub fn snapshot(&self) -> ListState<T> {
        self.shared.state.borrow().clone()
    }

    /// 상태 변경 알림을 받을 수신자를 만듭니다.
    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.shared.state.subscribe()
    }

    /// 진행 중인 조회가 끝날 때까지 기다린 뒤 상태를 반환합니다.
    pub async fn wait_idle(&self) -> ListState<T> {
        let mut rx = self.shared.state.subscribe();
        let idle = rx.wait_for(|state| !state.is_loading()).await;
        match idle {
            Ok(state) => state.clone(),
            // Sender는 self가 들고 있으므로 닫히지 않지만, 닫혀도 마지막 값을 돌려준다
            Err(_) => self.snapshot(),
        }
    }

    /// 조회 중인지
    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading()
    }

    /// 다음 페이지가 있는지
    pub fn has_more(&self) -> bool {
        self.shared.state.borrow().has_more()
    }

    /// 직전 조회 실패 메시지
    pub fn error(&self) -> Option<String> {
        self.shared.state.borrow().error().map(str::to_owned)
    }

    /// 엔트리 없음 + 로딩 아님 + 에러 없음
    pub fn is_empty(&self) -> bool {
        self.shared.state.borrow().is_empty()
    }

    /// 현재 엔트리 수 (구분자 포함)
    pub fn len(&self) -> usize {
        self.shared.state.borrow().entries().len()
    }

    /// 사용 중인 옵션
    pub fn options(&self) -> &ScrollOptions {
        &self.shared.options
    }
}

impl<T, F> Shared<T, F>
where
    T: ListItem,
    F: PageFetcher<T>,
{
    async fn run_fetch(&self, ticket: FetchTicket, page_size: usize) {
        let started = Instant::now();
        let result = self
            .fetcher
            .fetch_page(ticket.cursor.clone(), page_size)
            .await;
        metrics::histogram!(m::PAGINATOR_FETCH_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());

        let resolution = self.resolve(ticket.epoch, result);

        match resolution {
            Resolution::Applied { items, has_more } => {
                metrics::counter!(m::PAGINATOR_PAGES_LOADED_TOTAL).increment(1);
                metrics::counter!(m::PAGINATOR_ITEMS_LOADED_TOTAL)
                    .increment(u64::try_from(items).unwrap_or(u64::MAX));
                debug!(epoch = ticket.epoch, items, has_more, page_size, "page appended");
            }
            Resolution::Failed { kind, error } => {
                metrics::counter!(
                    m::PAGINATOR_FETCH_FAILURES_TOTAL,
                    m::LABEL_FAILURE_KIND => kind.as_str()
                )
                .increment(1);
                warn!(
                    error = %error,
                    kind = %kind,
                    status = ?error.status(),
                    url = error.url(),
                    "failed to load page"
                );
            }
            Resolution::Stale { current_epoch } => {
                metrics::counter!(m::PAGINATOR_STALE_RESPONSES_TOTAL).increment(1);
                debug!(
                    epoch = ticket.epoch,
                    current_epoch, "discarding response superseded by reset"
                );
            }
        }
    }

    /// 응답을 상태에 반영합니다. epoch가 다르면 상태를 건드리지 않습니다.
    fn resolve(&self, epoch: u64, result: Result<Page<T>, FetchError>) -> Resolution {
        let group_field = self.options.grouping_field();
        let mut resolution = None;

        self.state.send_if_modified(|state| {
            if !state.accepts(epoch) {
                resolution = Some(Resolution::Stale {
                    current_epoch: state.epoch(),
                });
                return false;
            }

            match result {
                Ok(page) => {
                    let items = state.apply_page(page, group_field);
                    resolution = Some(Resolution::Applied {
                        items,
                        has_more: state.has_more(),
                    });
                }
                Err(error) => {
                    let kind = FailureKind::classify(&error);
                    state.apply_failure(kind.message());
                    resolution = Some(Resolution::Failed { kind, error });
                }
            }
            true
        });

        resolution.unwrap_or_else(|| Resolution::Stale {
            current_epoch: self.state.borrow().epoch(),
        })
    }
}
