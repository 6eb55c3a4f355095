use std::sync::Arc;

use crate::auth::ensure_owner;
use crate::database::models::{Container, ContainerItem};
use crate::database::{StoreError, Stores};
use crate::filter::{Paged, QueryLimit, SortBy};
use crate::middleware::AuthUser;

/// Fields an item update may carry. Absent fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub body: Option<String>,
    pub quantity: Option<i32>,
}

impl ItemChanges {
    fn apply(self, item: &mut ContainerItem) {
        if let Some(body) = self.body.filter(|b| !b.is_empty()) {
            item.body = body;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
    }
}

async fn owned_container(
    stores: &Stores,
    principal: &AuthUser,
    container_id: i64,
    action: &str,
) -> Result<Arc<Container>, StoreError> {
    let container = stores.containers.by_id(container_id).await?;
    ensure_owner(principal, &container, action)?;
    Ok(Arc::new(container))
}

/// Load an item through the container it is addressed under.
///
/// An item that exists but lives in a different container is `NotFound`.
async fn owned_item(
    stores: &Stores,
    principal: &AuthUser,
    container_id: i64,
    item_id: i64,
    action: &str,
) -> Result<ContainerItem, StoreError> {
    let item = stores.items.by_id(item_id).await?;
    if item.container_id != container_id {
        return Err(StoreError::not_found("Item not found"));
    }
    ensure_owner(principal, &item, action)?;
    Ok(item)
}

pub async fn create_item(
    stores: &Stores,
    principal: &AuthUser,
    container_id: i64,
    body: &str,
    quantity: i32,
) -> Result<i64, StoreError> {
    let container = owned_container(stores, principal, container_id, "add items to this container").await?;
    let mut item = ContainerItem::new(container, body, quantity);
    stores.items.create(&mut item).await?;
    Ok(item.id)
}

pub async fn update_item(
    stores: &Stores,
    principal: &AuthUser,
    container_id: i64,
    item_id: i64,
    changes: ItemChanges,
) -> Result<i64, StoreError> {
    let mut item = owned_item(stores, principal, container_id, item_id, "modify this item").await?;
    changes.apply(&mut item);
    stores.items.update(&mut item).await?;
    Ok(item.id)
}

pub async fn delete_item(
    stores: &Stores,
    principal: &AuthUser,
    container_id: i64,
    item_id: i64,
) -> Result<(), StoreError> {
    let item = owned_item(stores, principal, container_id, item_id, "delete this item").await?;
    stores.items.delete(&item).await
}

pub async fn list_items(
    stores: &Stores,
    principal: &AuthUser,
    container_id: i64,
    sort: &SortBy,
    limit: QueryLimit,
) -> Result<Paged<ContainerItem>, StoreError> {
    let container = owned_container(stores, principal, container_id, "view this container").await?;
    stores.items.get_container_items(&container, sort, limit).await
}

/// Search the bodies of every item the principal owns.
pub async fn search_items(
    stores: &Stores,
    principal: &AuthUser,
    term: &str,
    sort: &SortBy,
    limit: QueryLimit,
) -> Result<Paged<ContainerItem>, StoreError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(StoreError::invalid("Search term is required"));
    }
    stores.items.search_items(principal.user_id, term, sort, limit).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ContainerItem {
        ContainerItem {
            body: "Milk".into(),
            quantity: 2,
            ..Default::default()
        }
    }

    #[test]
    fn absent_fields_are_untouched() {
        let mut it = item();
        ItemChanges::default().apply(&mut it);
        assert_eq!((it.body.as_str(), it.quantity), ("Milk", 2));
    }

    #[test]
    fn empty_body_is_ignored_but_zero_quantity_applies() {
        let mut it = item();
        ItemChanges {
            body: Some(String::new()),
            quantity: Some(0),
        }
        .apply(&mut it);
        assert_eq!((it.body.as_str(), it.quantity), ("Milk", 0));
    }

    #[test]
    fn supplied_fields_replace() {
        let mut it = item();
        ItemChanges {
            body: Some("Oat milk".into()),
            quantity: Some(5),
        }
        .apply(&mut it);
        assert_eq!((it.body.as_str(), it.quantity), ("Oat milk", 5));
    }
}
