use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::location::Location;
use super::user::User;
use crate::auth::Owned;

/// A box that holds items and may sit at a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromRow)]
pub struct Container {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    #[serde(skip)]
    #[sqlx(skip)]
    pub user: Option<User>,
    pub name: String,
    pub uuid: Uuid,
    pub location_id: Option<i64>,
    #[sqlx(skip)]
    pub location: Option<Location>,
    pub container_item_count: i32,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Container {
    /// The writable view of this container.
    pub fn to_record(&self) -> ContainerRecord {
        ContainerRecord {
            id: self.id,
            user_id: self.user_id,
            location_id: self.location_id,
            name: self.name.clone(),
        }
    }
}

impl Owned for Container {
    fn owner_id(&self) -> Option<i64> {
        Some(self.user_id)
    }
}

/// Writable container fields.
///
/// The location a container is moving away from is not kept here: the store
/// reads it from the locked row when saving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: i64,
    user_id: i64,
    location_id: Option<i64>,
    pub name: String,
}

impl ContainerRecord {
    pub fn new(user_id: i64, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attach to `location`, or detach entirely with `None`.
    pub fn set_location(&mut self, location: Option<&Location>) -> &mut Self {
        self.location_id = location.map(|l| l.id).filter(|id| *id > 0);
        self
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn location_id(&self) -> Option<i64> {
        self.location_id
    }

    /// Locations to recount when this record replaces a row that sat at
    /// `previous`. Ascending, so concurrent saves lock locations in one order.
    pub fn affected_locations(&self, previous: Option<i64>) -> Vec<i64> {
        let mut ids: Vec<i64> = self.location_id.into_iter().chain(previous).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Restricts a container listing.
#[derive(Debug, Clone, Default)]
pub struct ContainerFilter {
    pub user_id: i64,
    /// When non-empty, only containers at one of these locations.
    pub location_ids: Vec<i64>,
}
