//! Filter and pagination state to query parameters.

use tracing::trace;

use crate::date_range::DateRange;
use crate::filter::TransactionFilter;
use crate::pagination::PageRequest;

/// Ordered, string-valued query parameters. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`.
    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `k1=v1&k2=v2` with percent-encoded values, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the parameters to `path`, leaving it untouched when empty.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }
}

/// Encodes a listing request: `page` and `size` always, then every set filter.
pub fn encode(filter: &TransactionFilter, page: PageRequest) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("page", page.index.to_string());
    params.insert("size", page.size.to_string());
    for (key, value) in filter.active() {
        params.insert(key.param_name(), value);
    }
    trace!(params = %params.to_query_string(), "Encoded listing query");
    params
}

/// Encodes the date range of an analytics request; no range means no parameters.
pub fn encode_range(range: Option<&DateRange>) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(range) = range {
        params.insert("startDate", range.start.format("%Y-%m-%d").to_string());
        params.insert("endDate", range.end.format("%Y-%m-%d").to_string());
    }
    params
}
