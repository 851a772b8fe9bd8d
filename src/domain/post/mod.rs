pub mod entity;
pub mod errors;
pub mod value_objects;

pub use entity::Post;
pub use errors::DomainError;
