pub mod post;
pub mod social;
pub mod store;
pub mod user;
