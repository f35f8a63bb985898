#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: 옵션 검증 에러 (`PaginatorError`)
//! - [`options`]: 상태 관리자 옵션 (`ScrollOptions`, 빌더)
//! - [`item`]: 항목 trait과 렌더링 엔트리 (`ListItem`, `Entry`, `Separator`)
//! - [`separator`]: 그룹 구분자 삽입
//! - [`failure`]: 조회 실패 분류 (`FailureKind`)
//! - [`fetcher`]: 페이지 조회 추상화 (`PageFetcher`, `MemoryFetcher`)
//! - [`state`]: 목록 상태 (`ListState`)
//! - [`scroll`]: 상태 관리자 (`InfiniteScroll`)

pub mod error;
pub mod failure;
pub mod fetcher;
pub mod item;
pub mod options;
pub mod scroll;
pub mod separator;
pub mod state;

// --- Public API Re-exports ---

pub use error::PaginatorError;
pub use failure::FailureKind;
pub use fetcher::{FnFetcher, MemoryFetcher, PageFetcher, fetcher_fn};
pub use item::{Entry, ListItem, Separator, group_key};
pub use options::{PageSizeProvider, ScrollOptions, ScrollOptionsBuilder};
pub use scroll::InfiniteScroll;
pub use state::ListState;

pub use shelf_core::types::{Cursor, Page};
