//! Ownership-checked use cases. Each call loads, checks the principal owns
//! what it touches, then mutates through the stores.

pub mod container_service;
pub mod item_service;
pub mod location_service;
