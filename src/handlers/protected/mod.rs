// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind `jwt_auth_middleware`; handlers receive the
// verified principal as an `AuthUser` argument and pass it to the services,
// which check ownership before touching anything.

pub mod containers;
pub mod items;
pub mod locations;
pub mod query;
