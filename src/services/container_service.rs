use tracing::info;

use crate::auth::ensure_owner;
use crate::database::models::{Container, ContainerFilter, ContainerRecord, Location};
use crate::database::{StoreError, Stores};
use crate::filter::{Paged, QueryLimit, SortBy};
use crate::middleware::AuthUser;

/// Resolve an optional location reference for attaching a container.
///
/// No id (or a non-positive one) means "not attached". A location that does
/// not exist is `NotFound`; one owned by someone else is `Forbidden`.
async fn resolve_location(
    stores: &Stores,
    principal: &AuthUser,
    location_id: Option<i64>,
) -> Result<Option<Location>, StoreError> {
    let Some(location_id) = location_id.filter(|id| *id > 0) else {
        return Ok(None);
    };
    let location = stores.locations.by_id(location_id).await?;
    ensure_owner(principal, &location, "attach a container to this location")?;
    Ok(Some(location))
}

pub async fn create_container(
    stores: &Stores,
    principal: &AuthUser,
    name: &str,
    location_id: Option<i64>,
) -> Result<i64, StoreError> {
    let location = resolve_location(stores, principal, location_id).await?;

    let mut record = ContainerRecord::new(principal.user_id, name);
    record.set_location(location.as_ref());
    stores.containers.create(&mut record).await?;
    Ok(record.id)
}

/// Load a container the principal owns, with its location.
pub async fn get_container(
    stores: &Stores,
    principal: &AuthUser,
    id: i64,
) -> Result<Container, StoreError> {
    let container = stores.containers.by_id(id).await?;
    ensure_owner(principal, &container, "view this container")?;
    Ok(container)
}

/// Rename a container and move it. `location_id: None` detaches it.
pub async fn update_container(
    stores: &Stores,
    principal: &AuthUser,
    id: i64,
    name: &str,
    location_id: Option<i64>,
) -> Result<(), StoreError> {
    let container = stores.containers.by_id(id).await?;
    ensure_owner(principal, &container, "modify this container")?;
    let location = resolve_location(stores, principal, location_id).await?;

    let mut record = container.to_record();
    record.name = name.to_string();
    record.set_location(location.as_ref());
    stores.containers.update(&record).await
}

pub async fn delete_container(
    stores: &Stores,
    principal: &AuthUser,
    id: i64,
) -> Result<(), StoreError> {
    let container = stores.containers.by_id(id).await?;
    ensure_owner(principal, &container, "delete this container")?;
    stores.containers.delete(container.id).await?;
    info!("User {} deleted container {}", principal.user_id, id);
    Ok(())
}

pub async fn list_containers(
    stores: &Stores,
    principal: &AuthUser,
    location_ids: Vec<i64>,
    sort: &SortBy,
    limit: QueryLimit,
) -> Result<Paged<Container>, StoreError> {
    let filter = ContainerFilter {
        user_id: principal.user_id,
        location_ids,
    };
    stores.containers.filtered_containers(&filter, sort, limit).await
}
