use super::types::{SortBy, SortDirection};

/// Field used whenever the requested one is not sortable.
pub const DEFAULT_SORT_FIELD: &str = "modified";

pub const CONTAINER_SORT_FIELDS: &[&str] = &["modified", "name"];
pub const ITEM_SORT_FIELDS: &[&str] = &["modified", "body", "quantity"];
pub const LOCATION_SORT_FIELDS: &[&str] = &["id", "modified", "name", "container_count"];

/// Build a sort spec from untrusted input.
///
/// Never fails: an unknown field degrades to `default` and an unknown
/// direction degrades to descending. The returned field is always one of the
/// `&'static str` entries of `allowed` (or `default`), so it is safe to
/// interpolate into SQL.
pub fn build_sort(
    requested_field: Option<&str>,
    requested_direction: Option<&str>,
    allowed: &[&'static str],
    default: &'static str,
) -> SortBy {
    let field = requested_field
        .map(str::trim)
        .and_then(|f| allowed.iter().copied().find(|a| *a == f))
        .unwrap_or(default);

    SortBy {
        field,
        direction: SortDirection::parse(requested_direction),
    }
}
