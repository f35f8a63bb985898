//! 목록 항목과 렌더링 엔트리
//!
//! [`ListItem`]은 상태 관리자가 항목에서 읽는 최소한의 정보(식별자,
//! 그룹 키 필드)를 정의합니다. [`Entry`]는 화면에 그려질 순서대로
//! 항목과 그룹 구분자를 담습니다.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// 페이지네이션 대상 항목
///
/// 상태 관리자는 식별자와 그룹 키 필드 외의 필드는 해석하지 않습니다.
pub trait ListItem: Clone + Send + Sync + 'static {
    /// 항목의 고유 식별자
    fn item_id(&self) -> String;

    /// 이름으로 필드 값을 조회합니다. 없거나 문자열로 표현할 수 없으면 `None`.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// JSON 객체 레코드 (`{"id": 1, "name": "Apple", ...}`)
impl ListItem for serde_json::Value {
    fn item_id(&self) -> String {
        match self.get("id") {
            Some(serde_json::Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.get(name)? {
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            serde_json::Value::Number(n) => Some(Cow::Owned(n.to_string())),
            serde_json::Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }
}

/// 항목의 그룹 키를 계산합니다.
///
/// 필드 값의 첫 글자(앞쪽 공백 제외)를 대문자로 바꾼 값입니다.
/// 필드가 없거나 비어 있으면 `None`.
pub fn group_key<T: ListItem>(item: &T, field: &str) -> Option<char> {
    let value = item.field(field)?;
    let first = value.trim_start().chars().next()?;
    first.to_uppercase().next()
}

/// 알파벳 그룹 구분자
///
/// 조회 결과에는 없고 렌더링 순서에만 존재하는 합성 엔트리입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Separator {
    /// 구분자 식별자 (항목 식별자와 겹치지 않음)
    pub id: String,
    /// 그룹 키 글자
    pub letter: char,
}

impl Separator {
    /// 새 구분자를 생성합니다.
    pub fn new(letter: char) -> Self {
        Self {
            id: format!("separator-{letter}-{}", Uuid::new_v4()),
            letter,
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)
    }
}

/// 렌더링 엔트리: 항목 또는 구분자
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Entry<T> {
    /// 조회된 항목
    Item(T),
    /// 그룹 구분자
    Separator(Separator),
}

impl<T> Entry<T> {
    /// 구분자인지 확인합니다.
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator(_))
    }

    /// 항목이면 참조를 반환합니다.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Separator(_) => None,
        }
    }

    /// 구분자이면 참조를 반환합니다.
    pub fn as_separator(&self) -> Option<&Separator> {
        match self {
            Self::Item(_) => None,
            Self::Separator(sep) => Some(sep),
        }
    }
}

impl<T: ListItem> Entry<T> {
    /// 렌더링 추적용 키 (항목 식별자 또는 구분자 식별자)
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            Self::Item(item) => Cow::Owned(item.item_id()),
            Self::Separator(sep) => Cow::Borrowed(sep.id.as_str()),
        }
    }
}
