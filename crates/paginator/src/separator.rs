//! 그룹 구분자 삽입
//!
//! 새 페이지의 항목마다 그룹 키를 계산해, 직전 항목과 키가 달라지는
//! 지점에 [`Separator`]를 끼워 넣습니다. 항목을 다시 정렬하지는 않으므로
//! 조회기가 그룹 필드 기준으로 정렬된 순서를 보장해야 합니다.

use crate::item::{Entry, ListItem, Separator, group_key};

/// 이미 누적된 엔트리 중 마지막 항목의 그룹 키
///
/// 구분자와 키가 없는 항목은 건너뜁니다. 페이지 안에서 키 없는 항목이
/// 직전 키를 바꾸지 않는 것과 같은 규칙입니다.
pub fn last_group_key<T: ListItem>(entries: &[Entry<T>], field: &str) -> Option<char> {
    entries
        .iter()
        .rev()
        .filter_map(Entry::as_item)
        .find_map(|item| group_key(item, field))
}

/// 새 페이지 항목을 렌더링 엔트리로 바꿉니다.
///
/// `field`가 `None`이면 구분자 없이 항목만 감쌉니다. 키가 없는 항목은
/// 구분자를 만들지 않고 직전 키도 바꾸지 않습니다.
pub fn with_separators<T: ListItem>(
    existing: &[Entry<T>],
    incoming: Vec<T>,
    field: Option<&str>,
) -> Vec<Entry<T>> {
    let Some(field) = field else {
        return incoming.into_iter().map(Entry::Item).collect();
    };

    let mut last = last_group_key(existing, field);
    let mut out = Vec::with_capacity(incoming.len() + incoming.len() / 4);

    for item in incoming {
        if let Some(key) = group_key(&item, field) {
            if last != Some(key) {
                out.push(Entry::Separator(Separator::new(key)));
                last = Some(key);
            }
        }
        out.push(Entry::Item(item));
    }

    out
}
