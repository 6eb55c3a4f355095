use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub uuid: Uuid,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub reset_password: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}
