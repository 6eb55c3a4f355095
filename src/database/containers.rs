use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::error::StoreError;
use crate::database::hydrate::fan_out;
use crate::database::locations::{recompute_container_count, LocationStore};
use crate::database::models::{Container, ContainerFilter, ContainerRecord};
use crate::database::read_snapshot;
use crate::database::users::UserStore;
use crate::filter::{PageMeta, Paged, QueryLimit, SortBy};

const CONTAINER_COLUMNS: &str =
    "id, user_id, location_id, name, uuid, container_item_count, created, modified";

#[derive(Clone)]
pub struct ContainerStore {
    pool: PgPool,
    users: UserStore,
    locations: LocationStore,
}

impl ContainerStore {
    pub fn new(pool: PgPool, users: UserStore, locations: LocationStore) -> Self {
        Self { pool, users, locations }
    }

    /// Persist a new container and recount its location, atomically.
    pub async fn create(&self, record: &mut ContainerRecord) -> Result<(), StoreError> {
        if record.name.trim().is_empty() {
            return Err(StoreError::invalid("Container must have a name"));
        }

        let mut tx = self.pool.begin().await?;
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO containers (user_id, location_id, name, uuid, created, modified)
             VALUES ($1, $2, $3, $4, now(), now())
             RETURNING id",
        )
        .bind(record.user_id())
        .bind(record.location_id())
        .bind(&record.name)
        .bind(Uuid::new_v4())
        .fetch_one(&mut *tx)
        .await?;

        if let Some(location_id) = record.location_id() {
            recompute_container_count(&mut tx, location_id).await?;
        }
        tx.commit().await?;

        record.id = id;
        info!("Created container {} for user {}", id, record.user_id());
        Ok(())
    }

    /// Rename and/or move a container.
    ///
    /// The row is locked before it is read, so the previous location is the
    /// one actually being left even when another move of the same container
    /// committed in between. Both sides are recounted in the same
    /// transaction. Ownership never changes.
    pub async fn update(&self, record: &ContainerRecord) -> Result<(), StoreError> {
        if record.id == 0 {
            return Err(StoreError::invalid(
                "Can not update a container without it first being persisted",
            ));
        }
        if record.name.trim().is_empty() {
            return Err(StoreError::invalid("Containers must have a name"));
        }

        let mut tx = self.pool.begin().await?;
        let previous: Option<i64> =
            sqlx::query_scalar("SELECT location_id FROM containers WHERE id = $1 FOR UPDATE")
                .bind(record.id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| StoreError::not_found("Container not found"))?;

        sqlx::query(
            "UPDATE containers SET name = $1, location_id = $2, modified = now()
             WHERE id = $3",
        )
        .bind(&record.name)
        .bind(record.location_id())
        .bind(record.id)
        .execute(&mut *tx)
        .await?;

        for location_id in record.affected_locations(previous) {
            recompute_container_count(&mut tx, location_id).await?;
        }
        tx.commit().await?;
        debug!("Updated container {} (location {:?} -> {:?})", record.id, previous, record.location_id());
        Ok(())
    }

    /// Remove a container. Its items go with it (foreign key cascade) and
    /// its location is recounted in the same transaction.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let location_id: Option<i64> =
            sqlx::query_scalar("DELETE FROM containers WHERE id = $1 RETURNING location_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| StoreError::not_found("Container not found"))?;

        if let Some(location_id) = location_id {
            recompute_container_count(&mut tx, location_id).await?;
        }
        tx.commit().await?;
        info!("Deleted container {}", id);
        Ok(())
    }

    /// Fetch a container with its owner and location.
    ///
    /// The two lookups run concurrently. A missing owner fails the call; a
    /// missing location just leaves `location` empty.
    pub async fn by_id(&self, id: i64) -> Result<Container, StoreError> {
        let mut container = sqlx::query_as::<_, Container>(&format!(
            "SELECT {} FROM containers WHERE id = $1",
            CONTAINER_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::or_not_found(e, "Container"))?;

        let location_lookup = async {
            match container.location_id {
                Some(location_id) => self.locations.by_id(location_id).await.ok(),
                None => None,
            }
        };
        let (user, location) = tokio::join!(self.users.by_id(container.user_id), location_lookup);

        container.user = Some(user?);
        container.location = location;
        Ok(container)
    }

    /// Page through a user's containers, optionally restricted to a set of
    /// locations. Each distinct location on the page is hydrated once.
    pub async fn filtered_containers(
        &self,
        filter: &ContainerFilter,
        sort: &SortBy,
        limit: QueryLimit,
    ) -> Result<Paged<Container>, StoreError> {
        let mut clause = String::from("WHERE user_id = $1");
        if !filter.location_ids.is_empty() {
            clause.push_str(" AND location_id = ANY($2)");
        }

        let count_sql = format!("SELECT COUNT(*) FROM containers {}", clause);
        let page_sql = format!(
            "SELECT {} FROM containers {} {} LIMIT {} OFFSET {}",
            CONTAINER_COLUMNS,
            clause,
            sort.to_sql(None),
            limit.limit,
            limit.offset
        );
        debug!("Container listing: {}", page_sql);

        let mut tx = read_snapshot(&self.pool).await?;
        let mut count = sqlx::query_scalar::<_, i64>(&count_sql).bind(filter.user_id);
        let mut page = sqlx::query_as::<_, Container>(&page_sql).bind(filter.user_id);
        if !filter.location_ids.is_empty() {
            count = count.bind(&filter.location_ids);
            page = page.bind(&filter.location_ids);
        }
        let total = count.fetch_one(&mut *tx).await?;
        let mut rows = page.fetch_all(&mut *tx).await?;
        tx.commit().await?;

        let locations = fan_out(
            rows.iter().filter_map(|c| c.location_id),
            "location",
            |location_id| self.locations.by_id(location_id),
        )
        .await;
        for container in rows.iter_mut() {
            if let Some(location_id) = container.location_id {
                container.location = locations.get(&location_id).cloned();
            }
        }

        Ok(Paged {
            meta: PageMeta::new(rows.len(), total, limit),
            rows,
        })
    }
}

/// Re-derive `container_item_count` for a container from its live items.
pub async fn recompute_item_count(
    conn: &mut PgConnection,
    container_id: i64,
) -> Result<(), StoreError> {
    sqlx::query(
        "UPDATE containers
         SET container_item_count = (SELECT COUNT(*) FROM container_items WHERE container_id = $1),
             modified = now()
         WHERE id = $1",
    )
    .bind(container_id)
    .execute(conn)
    .await?;
    Ok(())
}
