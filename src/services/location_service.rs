use tracing::info;

use crate::auth::ensure_owner;
use crate::database::models::{Location, LocationFilter};
use crate::database::{StoreError, Stores};
use crate::filter::{Paged, QueryLimit, SortBy};
use crate::middleware::AuthUser;

pub async fn create_location(
    stores: &Stores,
    principal: &AuthUser,
    name: &str,
    address: Option<String>,
) -> Result<i64, StoreError> {
    let mut location = Location::new(principal.user_id, name, address);
    stores.locations.create(&mut location).await?;
    Ok(location.id)
}

/// Load a location the principal owns.
pub async fn get_location(
    stores: &Stores,
    principal: &AuthUser,
    id: i64,
) -> Result<Location, StoreError> {
    let location = stores.locations.by_id(id).await?;
    ensure_owner(principal, &location, "view this location")?;
    Ok(location)
}

pub async fn update_location(
    stores: &Stores,
    principal: &AuthUser,
    id: i64,
    name: &str,
    address: Option<String>,
) -> Result<(), StoreError> {
    let mut location = stores.locations.by_id(id).await?;
    ensure_owner(principal, &location, "modify this location")?;

    location.name = name.to_string();
    location.address = address.filter(|a| !a.trim().is_empty());
    stores.locations.update(&mut location).await
}

/// Delete a location. Containers stored there are detached, not removed.
pub async fn delete_location(
    stores: &Stores,
    principal: &AuthUser,
    id: i64,
) -> Result<(), StoreError> {
    let location = stores.locations.by_id(id).await?;
    ensure_owner(principal, &location, "delete this location")?;
    stores.locations.delete(location.id).await?;
    info!("User {} deleted location {}", principal.user_id, id);
    Ok(())
}

pub async fn list_locations(
    stores: &Stores,
    principal: &AuthUser,
    attached_to_container: Option<bool>,
    sort: &SortBy,
    limit: QueryLimit,
) -> Result<Paged<Location>, StoreError> {
    let filter = LocationFilter {
        user_id: principal.user_id,
        attached_to_container,
    };
    stores.locations.filtered_locations(&filter, sort, limit).await
}
