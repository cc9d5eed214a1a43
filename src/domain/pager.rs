// src/domain/pager.rs
use serde::Serialize;

pub const DEFAULT_SORT_FIELD: &str = "timestamp";
pub const DOCID_SORT_FIELD: &str = "_docid";

/// Request-scoped pagination and sort descriptor.
///
/// `count` and `last_key` are filled in by the backend after each query;
/// `last_key` lets the next query continue after the last returned record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub page: u32,
    pub sortby: String,
    pub desc: bool,
    pub limit: u32,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_key: Option<String>,
}

impl Pager {
    pub fn new(limit: u32) -> Self {
        Self::for_page(1, limit)
    }

    pub fn for_page(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            sortby: DEFAULT_SORT_FIELD.to_string(),
            desc: true,
            limit: limit.max(1),
            count: 0,
            last_key: None,
        }
    }

    /// Ascending pager over the backend's internal document id. The ordering
    /// is stable under concurrent writes, so consecutive pages never overlap.
    pub fn by_docid(limit: u32) -> Self {
        Self {
            sortby: DOCID_SORT_FIELD.to_string(),
            desc: false,
            ..Self::new(limit)
        }
    }

    pub fn with_sortby(mut self, sortby: &str) -> Self {
        self.sortby = sanitize_sort_field(sortby);
        self
    }

    pub fn advance(&mut self) {
        self.page = self.page.saturating_add(1);
    }
}

/// Sort fields are forwarded to the backend verbatim, so only plain field
/// paths are accepted.
pub fn sanitize_sort_field(sortby: &str) -> String {
    let trimmed = sortby.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if valid {
        trimmed.to_string()
    } else {
        DEFAULT_SORT_FIELD.to_string()
    }
}
