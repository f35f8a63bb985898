//! 메트릭 상수 및 설명 등록
//!
//! 목록 페이지네이션 관련 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `shelf_`
//! - 컴포넌트명: `paginator_`
//! - 접미어: `_total` (counter), `_seconds` (histogram/latency)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(shelf_core::metrics::PAGINATOR_PAGES_LOADED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 실패 분류 레이블 키 (unreachable, server_error, generic)
pub const LABEL_FAILURE_KIND: &str = "kind";

// ─── Paginator 메트릭 ──────────────────────────────────────────────

/// Paginator: 성공적으로 적용된 페이지 수 (counter)
pub const PAGINATOR_PAGES_LOADED_TOTAL: &str = "shelf_paginator_pages_loaded_total";

/// Paginator: 누적된 항목 수 (counter, 구분자 제외)
pub const PAGINATOR_ITEMS_LOADED_TOTAL: &str = "shelf_paginator_items_loaded_total";

/// Paginator: 페이지 조회 실패 수 (counter, label: kind)
pub const PAGINATOR_FETCH_FAILURES_TOTAL: &str = "shelf_paginator_fetch_failures_total";

/// Paginator: reset 이후 도착해 버려진 응답 수 (counter)
pub const PAGINATOR_STALE_RESPONSES_TOTAL: &str = "shelf_paginator_stale_responses_total";

/// Paginator: 페이지 조회 소요 시간 (histogram, 초)
pub const PAGINATOR_FETCH_DURATION_SECONDS: &str = "shelf_paginator_fetch_duration_seconds";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 현재 설치된 레코더에 등록합니다. 레코더가 없으면 아무 일도 하지 않습니다.
pub fn describe_all() {
    use metrics::{Unit, describe_counter, describe_histogram};

    describe_counter!(
        PAGINATOR_PAGES_LOADED_TOTAL,
        "Total number of pages appended to list states"
    );
    describe_counter!(
        PAGINATOR_ITEMS_LOADED_TOTAL,
        "Total number of items appended to list states (separators excluded)"
    );
    describe_counter!(
        PAGINATOR_FETCH_FAILURES_TOTAL,
        "Total number of failed page fetches by failure kind"
    );
    describe_counter!(
        PAGINATOR_STALE_RESPONSES_TOTAL,
        "Total number of page responses discarded because a reset superseded them"
    );
    describe_histogram!(
        PAGINATOR_FETCH_DURATION_SECONDS,
        Unit::Seconds,
        "Time to fetch a single page in seconds"
    );
}
