use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a client supplied direction. Anything other than `asc` is descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A validated ordering: `field` is always a member of the entity's allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBy {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortBy {
    /// Render as an ORDER BY clause, qualifying the column with `alias` when given.
    ///
    /// `id` is appended as a tie breaker so paging over equal sort keys is stable.
    pub fn to_sql(&self, alias: Option<&str>) -> String {
        let dir = self.direction.to_sql();
        match alias {
            Some(a) => format!("ORDER BY {a}.{} {dir}, {a}.id {dir}", self.field),
            None => format!("ORDER BY {} {dir}, id {dir}", self.field),
        }
    }
}

/// Limit/offset pair derived from a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimit {
    pub limit: i64,
    pub offset: i64,
}

/// Pagination metadata returned with every listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Rows in the current page.
    pub request_total: i64,
    /// Rows matching the filter across all pages.
    pub total: i64,
    pub pages: i64,
}

/// A page of entities plus its metadata.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub rows: Vec<T>,
    pub meta: PageMeta,
}
