// handlers/protected/query.rs - listing query string parameters
//
// Everything arrives as an optional string and is parsed leniently: a
// malformed page falls back to page 1, an unknown sort falls back to the
// default, and unparseable ids are dropped.

use serde::Deserialize;

use crate::filter::{build_page, build_sort, QueryLimit, SortBy, DEFAULT_SORT_FIELD};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub sort_field: Option<String>,
    pub sort_dir: Option<String>,
    /// Containers only: comma separated location ids.
    pub location_id: Option<String>,
    /// Locations only: `T` or `F`.
    pub is_attached_to_container: Option<String>,
    /// Item search only.
    pub term: Option<String>,
}

impl ListQuery {
    pub fn sort(&self, allowed: &[&'static str]) -> SortBy {
        build_sort(
            self.sort_field.as_deref(),
            self.sort_dir.as_deref(),
            allowed,
            DEFAULT_SORT_FIELD,
        )
    }

    pub fn limit(&self, page_size: i64) -> QueryLimit {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);
        build_page(page, page_size)
    }

    pub fn location_ids(&self) -> Vec<i64> {
        self.location_id
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(|id| id.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .collect()
    }

    pub fn attached_to_container(&self) -> Option<bool> {
        match self.is_attached_to_container.as_deref().map(str::trim) {
            Some("T") | Some("t") | Some("true") | Some("1") => Some(true),
            Some("F") | Some("f") | Some("false") | Some("0") => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{SortDirection, CONTAINER_SORT_FIELDS};

    fn query() -> ListQuery {
        ListQuery::default()
    }

    #[test]
    fn defaults_to_first_page_newest_first() {
        let q = query();
        assert_eq!(q.limit(20), QueryLimit { limit: 20, offset: 0 });
        let sort = q.sort(CONTAINER_SORT_FIELDS);
        assert_eq!(sort.field, "modified");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn malformed_page_is_page_one() {
        let q = ListQuery { page: Some("two".into()), ..query() };
        assert_eq!(q.limit(20).offset, 0);
        let q = ListQuery { page: Some("3".into()), ..query() };
        assert_eq!(q.limit(20).offset, 40);
    }

    #[test]
    fn huge_page_is_past_the_end() {
        let q = ListQuery { page: Some(i64::MAX.to_string()), ..query() };
        assert_eq!(q.limit(20), QueryLimit { limit: 20, offset: i64::MAX });
        let q = ListQuery { page: Some("99999999999999999999999".into()), ..query() };
        assert_eq!(q.limit(20).offset, 0);
    }

    #[test]
    fn location_ids_skip_garbage() {
        let q = ListQuery { location_id: Some("1, 2,x,,-4,9".into()), ..query() };
        assert_eq!(q.location_ids(), vec![1, 2, 9]);
        assert!(query().location_ids().is_empty());
    }

    #[test]
    fn attached_flag() {
        let flag = |v: &str| ListQuery { is_attached_to_container: Some(v.into()), ..query() }.attached_to_container();
        assert_eq!(flag("T"), Some(true));
        assert_eq!(flag("F"), Some(false));
        assert_eq!(flag("maybe"), None);
        assert_eq!(query().attached_to_container(), None);
    }
}
