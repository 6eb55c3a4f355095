use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::sync::Arc;
use uuid::Uuid;

use super::container::Container;
use crate::auth::Owned;

/// A single line of a container's inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromRow)]
pub struct ContainerItem {
    pub id: i64,
    pub container_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(skip)]
    pub container: Option<Arc<Container>>,
    pub uuid: Uuid,
    pub body: String,
    pub quantity: i32,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ContainerItem {
    /// An unpersisted item inside `container`.
    pub fn new(container: Arc<Container>, body: impl Into<String>, quantity: i32) -> Self {
        Self {
            container_id: container.id,
            container: Some(container),
            body: body.into(),
            quantity,
            ..Default::default()
        }
    }
}

/// Items are owned through their container.
impl Owned for ContainerItem {
    fn owner_id(&self) -> Option<i64> {
        self.container.as_ref().map(|c| c.user_id)
    }
}
