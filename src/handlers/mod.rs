// handlers/mod.rs - two-tier handler layout
//
// Public (no auth) -> Protected (bearer token, ownership checked per call)

pub mod protected;
pub mod public;
