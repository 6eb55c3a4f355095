use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::containers::{recompute_item_count, ContainerStore};
use crate::database::error::{is_foreign_key_violation, StoreError};
use crate::database::hydrate::fan_out;
use crate::database::models::{Container, ContainerItem};
use crate::database::read_snapshot;
use crate::filter::{PageMeta, Paged, QueryLimit, SortBy};

const ITEM_COLUMNS: &str = "id, container_id, uuid, body, quantity, created, modified";
const ITEM_COLUMNS_CI: &str =
    "ci.id, ci.container_id, ci.uuid, ci.body, ci.quantity, ci.created, ci.modified";

#[derive(Clone)]
pub struct ItemStore {
    pool: PgPool,
    containers: ContainerStore,
}

impl ItemStore {
    pub fn new(pool: PgPool, containers: ContainerStore) -> Self {
        Self { pool, containers }
    }

    /// Persist a new item and recount its container, atomically.
    pub async fn create(&self, item: &mut ContainerItem) -> Result<(), StoreError> {
        if item.container_id <= 0 {
            return Err(StoreError::invalid("Item must belong to a container"));
        }
        if item.quantity < 0 {
            return Err(StoreError::invalid("Quantity can not be negative"));
        }

        let mut tx = self.pool.begin().await?;
        let row: (i64, Uuid, chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) =
            sqlx::query_as(
                "INSERT INTO container_items (container_id, uuid, body, quantity, created, modified)
                 VALUES ($1, $2, $3, $4, now(), now())
                 RETURNING id, uuid, created, modified",
            )
            .bind(item.container_id)
            .bind(Uuid::new_v4())
            .bind(&item.body)
            .bind(item.quantity)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    StoreError::not_found("Container not found")
                } else {
                    StoreError::Sqlx(e)
                }
            })?;

        recompute_item_count(&mut tx, item.container_id).await?;
        tx.commit().await?;

        (item.id, item.uuid, item.created, item.modified) = row;
        info!("Created item {} in container {}", item.id, item.container_id);
        Ok(())
    }

    /// Write body and quantity. The item never changes container.
    pub async fn update(&self, item: &mut ContainerItem) -> Result<(), StoreError> {
        if item.id == 0 {
            return Err(StoreError::invalid("Item must already be stored"));
        }
        if item.quantity < 0 {
            return Err(StoreError::invalid("Quantity can not be negative"));
        }

        let modified: Option<chrono::DateTime<chrono::Utc>> = sqlx::query_scalar(
            "UPDATE container_items SET body = $1, quantity = $2, modified = now()
             WHERE id = $3
             RETURNING modified",
        )
        .bind(&item.body)
        .bind(item.quantity)
        .bind(item.id)
        .fetch_optional(&self.pool)
        .await?;

        item.modified = modified.ok_or_else(|| StoreError::not_found("Item not found"))?;
        Ok(())
    }

    /// Remove an item and recount its container in the same transaction.
    pub async fn delete(&self, item: &ContainerItem) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM container_items WHERE id = $1")
            .bind(item.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(StoreError::not_found("Item not found"));
        }

        recompute_item_count(&mut tx, item.container_id).await?;
        tx.commit().await?;
        debug!("Deleted item {} from container {}", item.id, item.container_id);
        Ok(())
    }

    /// Fetch an item with its parent container attached.
    pub async fn by_id(&self, id: i64) -> Result<ContainerItem, StoreError> {
        let mut item = sqlx::query_as::<_, ContainerItem>(&format!(
            "SELECT {} FROM container_items WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::or_not_found(e, "Item"))?;

        item.container = Some(Arc::new(self.containers.by_id(item.container_id).await?));
        Ok(item)
    }

    /// Page through the items of one container. Every row shares `container`.
    pub async fn get_container_items(
        &self,
        container: &Arc<Container>,
        sort: &SortBy,
        limit: QueryLimit,
    ) -> Result<Paged<ContainerItem>, StoreError> {
        let page_sql = format!(
            "SELECT {} FROM container_items WHERE container_id = $1 {} LIMIT {} OFFSET {}",
            ITEM_COLUMNS,
            sort.to_sql(None),
            limit.limit,
            limit.offset
        );

        let mut tx = read_snapshot(&self.pool).await?;
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM container_items WHERE container_id = $1")
                .bind(container.id)
                .fetch_one(&mut *tx)
                .await?;
        let mut rows = sqlx::query_as::<_, ContainerItem>(&page_sql)
            .bind(container.id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        for item in rows.iter_mut() {
            item.container = Some(Arc::clone(container));
        }

        Ok(Paged {
            meta: PageMeta::new(rows.len(), total, limit),
            rows,
        })
    }

    /// Case-insensitive substring search over the bodies of a user's items.
    ///
    /// `term` is matched literally; `%` and `_` carry no wildcard meaning.
    pub async fn search_items(
        &self,
        user_id: i64,
        term: &str,
        sort: &SortBy,
        limit: QueryLimit,
    ) -> Result<Paged<ContainerItem>, StoreError> {
        let pattern = format!("%{}%", escape_like(term));
        let clause = "FROM container_items ci
             JOIN containers c ON c.id = ci.container_id
             WHERE c.user_id = $1 AND ci.body ILIKE $2";

        let page_sql = format!(
            "SELECT {} {} {} LIMIT {} OFFSET {}",
            ITEM_COLUMNS_CI,
            clause,
            sort.to_sql(Some("ci")),
            limit.limit,
            limit.offset
        );
        debug!("Item search: {}", page_sql);

        let mut tx = read_snapshot(&self.pool).await?;
        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {}", clause))
            .bind(user_id)
            .bind(&pattern)
            .fetch_one(&mut *tx)
            .await?;
        let mut rows = sqlx::query_as::<_, ContainerItem>(&page_sql)
            .bind(user_id)
            .bind(&pattern)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        let containers = fan_out(
            rows.iter().map(|item| item.container_id),
            "container",
            |container_id| async move { self.containers.by_id(container_id).await.map(Arc::new) },
        )
        .await;
        for item in rows.iter_mut() {
            item.container = containers.get(&item.container_id).cloned();
        }

        Ok(Paged {
            meta: PageMeta::new(rows.len(), total, limit),
            rows,
        })
    }
}

/// Escape the `LIKE` metacharacters in user input.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
