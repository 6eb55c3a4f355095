pub mod containers;
pub mod error;
pub mod hydrate;
pub mod items;
pub mod locations;
pub mod manager;
pub mod models;
pub mod users;

pub use containers::ContainerStore;
pub use error::StoreError;
pub use items::ItemStore;
pub use locations::LocationStore;
pub use manager::DatabaseManager;
pub use users::UserStore;

use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::auth::{LegacySaltHasher, TokenSigner};
use crate::config::{ConfigError, SecurityConfig};

/// Open a read-only transaction on a single snapshot.
///
/// Listings run their `COUNT(*)` and page query inside one of these so the
/// reported total and the returned rows always agree.
pub async fn read_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, StoreError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

/// Every store, wired together over one pool.
#[derive(Clone)]
pub struct Stores {
    pub users: UserStore,
    pub locations: LocationStore,
    pub containers: ContainerStore,
    pub items: ItemStore,
}

impl Stores {
    pub fn new(pool: PgPool, security: &SecurityConfig) -> Result<Self, ConfigError> {
        let hasher = Arc::new(LegacySaltHasher::new(
            security.jwt_secret.clone(),
            security.legacy_salt.clone(),
        )?);
        let users = UserStore::new(pool.clone(), hasher, TokenSigner::from_config(security)?);
        let locations = LocationStore::new(pool.clone(), users.clone());
        let containers = ContainerStore::new(pool.clone(), users.clone(), locations.clone());
        let items = ItemStore::new(pool, containers.clone());
        Ok(Self {
            users,
            locations,
            containers,
            items,
        })
    }
}
