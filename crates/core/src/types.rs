//! 도메인 타입: 페이지네이션 계약에서 공유되는 타입
//!
//! 페이지 조회기(백엔드 클라이언트, 인메모리 소스 등)와
//! 목록 상태 관리자가 주고받는 데이터 구조를 정의합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 페이지네이션 커서
///
/// 다음 페이지의 시작 위치를 가리키는 불투명 토큰입니다.
/// 클라이언트는 값을 해석하지 않고 그대로 다음 요청에 전달합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// 새 커서를 생성합니다.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 커서 원문을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 한 번의 조회 결과
///
/// 백엔드 응답 본문(`{"content": [...], "nextCursor": "...", ...}`)과
/// 같은 형태로 직렬화됩니다. `next_cursor`가 없으면 마지막 페이지입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// 페이지 항목 (조회기가 정한 순서)
    pub content: Vec<T>,
    /// 다음 페이지 커서
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Cursor>,
    /// 다음 페이지 존재 여부 (참고용, `next_cursor`가 우선)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    /// 요청된 페이지 크기
    #[serde(default)]
    pub limit: usize,
    /// 전체 항목 수 (백엔드가 계산한 경우)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    /// 다음 페이지가 없는 마지막 페이지를 생성합니다.
    pub fn last(content: Vec<T>, limit: usize) -> Self {
        Self {
            content,
            next_cursor: None,
            has_next: Some(false),
            limit,
            total_count: None,
        }
    }

    /// 다음 커서를 가진 페이지를 생성합니다.
    pub fn with_next(content: Vec<T>, next_cursor: impl Into<Cursor>, limit: usize) -> Self {
        Self {
            content,
            next_cursor: Some(next_cursor.into()),
            has_next: Some(true),
            limit,
            total_count: None,
        }
    }

    /// 전체 항목 수를 설정합니다.
    pub fn total_count(mut self, total: u64) -> Self {
        self.total_count = Some(total);
        self
    }

    /// 다음 페이지가 있는지 확인합니다.
    ///
    /// `has_next`는 무시하고 커서 존재 여부만 봅니다.
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}
