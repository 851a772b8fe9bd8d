pub mod entity;
pub mod gateway;
pub mod value_objects;

pub use entity::{AuthUser, UserProfile};
pub use gateway::{AuthError, AuthGateway};
