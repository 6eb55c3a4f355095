pub mod container;
pub mod item;
pub mod location;
pub mod user;

pub use container::{Container, ContainerFilter, ContainerRecord};
pub use item::ContainerItem;
pub use location::{Location, LocationFilter};
pub use user::User;
