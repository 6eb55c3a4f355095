pub mod types;
pub mod filter_order;
pub mod filter_page;

pub use types::*;
pub use filter_order::{
    build_sort, CONTAINER_SORT_FIELDS, DEFAULT_SORT_FIELD, ITEM_SORT_FIELDS, LOCATION_SORT_FIELDS,
};
pub use filter_page::{build_page, compute_page_count};
