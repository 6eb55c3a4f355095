use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::user::User;
use crate::auth::Owned;

#[derive(Debug, Clone, Default, PartialEq, Serialize, FromRow)]
pub struct Location {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    /// Hydrated by `LocationStore::by_id`; listings leave it empty.
    #[serde(skip)]
    #[sqlx(skip)]
    pub user: Option<User>,
    pub uuid: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub container_count: i32,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Location {
    /// An unpersisted location for `user_id`.
    pub fn new(user_id: i64, name: impl Into<String>, address: Option<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            address: address.filter(|a| !a.trim().is_empty()),
            ..Default::default()
        }
    }
}

impl Owned for Location {
    fn owner_id(&self) -> Option<i64> {
        Some(self.user_id)
    }
}

/// Restricts a location listing.
#[derive(Debug, Clone, Default)]
pub struct LocationFilter {
    pub user_id: i64,
    /// `Some(true)`: only locations holding at least one container;
    /// `Some(false)`: only empty ones.
    pub attached_to_container: Option<bool>,
}
