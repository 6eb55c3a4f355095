// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, account registration and the service banner/health
// probe. Nothing here sees an `AuthUser`.

pub mod system;
pub mod user;

pub use system::{health, root};
pub use user::{user_login, user_register};
