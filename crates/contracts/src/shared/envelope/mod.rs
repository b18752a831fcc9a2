//! Response envelopes returned by the collection endpoints.
//!
//! Endpoints are not uniform: most list routes wrap records as
//! `{ data, pagination }`, some answer `{ data }` and a few return a bare JSON
//! array. Single-record routes answer either `{ data: T }` or `T`. Everything
//! is normalized here so callers only see [`Page`] and plain records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    #[serde(default)]
    pub total_pages: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Paged { data: Vec<T>, pagination: Pagination },
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

/// Normalized list response.
///
/// `pagination` is `None` when the server returned the whole collection
/// without a pagination wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    /// Authoritative total: the server's count when known, else the number of records.
    pub fn total(&self) -> usize {
        self.pagination
            .map(|p| p.total)
            .unwrap_or(self.records.len())
    }
}

impl<T> ListEnvelope<T> {
    pub fn into_page(self) -> Page<T> {
        match self {
            ListEnvelope::Paged { data, pagination } => Page {
                records: data,
                pagination: Some(pagination),
            },
            ListEnvelope::Wrapped { data } | ListEnvelope::Bare(data) => Page {
                records: data,
                pagination: None,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> RecordEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            RecordEnvelope::Wrapped { data } | RecordEnvelope::Bare(data) => data,
        }
    }
}

/// Error body shape used by the backend: `{ "message": "..." }` or `{ "error": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: i64,
        name: String,
    }

    #[test]
    fn test_paged_envelope() {
        let body = json!({
            "data": [{ "id": 1, "name": "a" }, { "id": 2, "name": "b" }],
            "pagination": { "total": 42, "page": 1, "pageSize": 2, "totalPages": 21 }
        });
        let page = serde_json::from_value::<ListEnvelope<Row>>(body)
            .unwrap()
            .into_page();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.total(), 42);
        assert_eq!(page.pagination.unwrap().total_pages, 21);
    }

    #[test]
    fn test_bare_array_has_no_pagination() {
        let body = json!([{ "id": 7, "name": "x" }]);
        let page = serde_json::from_value::<ListEnvelope<Row>>(body)
            .unwrap()
            .into_page();
        assert!(page.pagination.is_none());
        assert_eq!(page.total(), 1);
    }

    #[test]
    fn test_data_without_pagination() {
        let body = json!({ "data": [{ "id": 7, "name": "x" }, { "id": 8, "name": "y" }] });
        let page = serde_json::from_value::<ListEnvelope<Row>>(body)
            .unwrap()
            .into_page();
        assert!(page.pagination.is_none());
        assert_eq!(page.total(), 2);
    }

    #[test]
    fn test_record_envelope_both_shapes() {
        let wrapped: RecordEnvelope<Row> =
            serde_json::from_value(json!({ "data": { "id": 3, "name": "w" } })).unwrap();
        let bare: RecordEnvelope<Row> =
            serde_json::from_value(json!({ "id": 3, "name": "w" })).unwrap();
        assert_eq!(wrapped.into_inner(), bare.into_inner());
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_value(json!({ "error": " Weight must be positive " })).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Weight must be positive"));
        let empty: ErrorBody = serde_json::from_value(json!({ "message": "" })).unwrap();
        assert_eq!(empty.into_message(), None);
    }
}
