use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::error::StoreError;
use crate::database::models::{Location, LocationFilter};
use crate::database::users::UserStore;
use crate::database::read_snapshot;
use crate::filter::{PageMeta, Paged, QueryLimit, SortBy};

const LOCATION_COLUMNS: &str =
    "id, user_id, uuid, name, address, container_count, created, modified";

#[derive(Clone)]
pub struct LocationStore {
    pool: PgPool,
    users: UserStore,
}

impl LocationStore {
    pub fn new(pool: PgPool, users: UserStore) -> Self {
        Self { pool, users }
    }

    /// Persist a new location, filling in its id, uuid and timestamps.
    pub async fn create(&self, location: &mut Location) -> Result<(), StoreError> {
        if location.name.trim().is_empty() {
            return Err(StoreError::invalid("Location must have a name"));
        }

        let row: (i64, Uuid, chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) =
            sqlx::query_as(
                "INSERT INTO locations (user_id, uuid, name, address, created, modified)
                 VALUES ($1, $2, $3, $4, now(), now())
                 RETURNING id, uuid, created, modified",
            )
            .bind(location.user_id)
            .bind(Uuid::new_v4())
            .bind(&location.name)
            .bind(&location.address)
            .fetch_one(&self.pool)
            .await?;

        (location.id, location.uuid, location.created, location.modified) = row;
        location.container_count = 0;
        info!("Created location {} for user {}", location.id, location.user_id);
        Ok(())
    }

    /// Update name and address of a stored location.
    pub async fn update(&self, location: &mut Location) -> Result<(), StoreError> {
        if location.id == 0 {
            return Err(StoreError::invalid("Location must already be stored"));
        }
        if location.name.trim().is_empty() {
            return Err(StoreError::invalid("Location must have a name"));
        }

        let modified: Option<chrono::DateTime<chrono::Utc>> = sqlx::query_scalar(
            "UPDATE locations SET name = $1, address = $2, modified = now()
             WHERE id = $3
             RETURNING modified",
        )
        .bind(&location.name)
        .bind(&location.address)
        .bind(location.id)
        .fetch_optional(&self.pool)
        .await?;

        location.modified = modified.ok_or_else(|| StoreError::not_found("Location not found"))?;
        Ok(())
    }

    /// Remove a location, detaching every container that sits there first.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query(
            "UPDATE containers SET location_id = NULL, modified = now() WHERE location_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let deleted = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            // Dropping the transaction rolls the detach back.
            return Err(StoreError::not_found("Location not found"));
        }

        tx.commit().await?;
        info!("Deleted location {} ({} containers detached)", id, detached);
        Ok(())
    }

    /// Fetch a location together with its owner.
    pub async fn by_id(&self, id: i64) -> Result<Location, StoreError> {
        let mut location = sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE id = $1",
            LOCATION_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::or_not_found(e, "Location"))?;

        location.user = Some(self.users.by_id(location.user_id).await?);
        Ok(location)
    }

    /// Page through a user's locations. Owners are not hydrated per row.
    pub async fn filtered_locations(
        &self,
        filter: &LocationFilter,
        sort: &SortBy,
        limit: QueryLimit,
    ) -> Result<Paged<Location>, StoreError> {
        let mut clause = String::from("WHERE user_id = $1");
        match filter.attached_to_container {
            Some(true) => clause.push_str(
                " AND EXISTS (SELECT 1 FROM containers c WHERE c.location_id = locations.id)",
            ),
            Some(false) => clause.push_str(
                " AND NOT EXISTS (SELECT 1 FROM containers c WHERE c.location_id = locations.id)",
            ),
            None => {}
        }

        let count_sql = format!("SELECT COUNT(*) FROM locations {}", clause);
        let page_sql = format!(
            "SELECT {} FROM locations {} {} LIMIT {} OFFSET {}",
            LOCATION_COLUMNS,
            clause,
            sort.to_sql(None),
            limit.limit,
            limit.offset
        );
        debug!("Location listing: {}", page_sql);

        let mut tx = read_snapshot(&self.pool).await?;
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.user_id)
            .fetch_one(&mut *tx)
            .await?;
        let rows = sqlx::query_as::<_, Location>(&page_sql)
            .bind(filter.user_id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Paged {
            meta: PageMeta::new(rows.len(), total, limit),
            rows,
        })
    }
}

/// Re-derive `container_count` for a location from the live container rows.
///
/// Always runs on the caller's transaction connection. Idempotent: it
/// counts, it never increments.
pub async fn recompute_container_count(
    conn: &mut PgConnection,
    location_id: i64,
) -> Result<(), StoreError> {
    sqlx::query(
        "UPDATE locations
         SET container_count = (SELECT COUNT(*) FROM containers WHERE location_id = $1),
             modified = now()
         WHERE id = $1",
    )
    .bind(location_id)
    .execute(conn)
    .await?;
    Ok(())
}
