//! Application layer for a mobile community-board product.
//!
//! Users register and log in, write posts with an optional image, browse a
//! live feed, open a post detail with comments and likes, and edit their
//! profile. Persistence and identity are delegated to a managed backend,
//! consumed here through two abstract gateways: a document store
//! ([`domain::store::DocumentStore`]) and an auth service
//! ([`domain::user::AuthGateway`]).
//!
//! The crate exposes typed async use-case services rather than any wire
//! surface; a mobile client binds its screens directly to the services in
//! [`application`]. The one piece of real domain logic is the like/comment
//! counter synchronization in [`application::social`], which keeps each
//! post's denormalized counters consistent with the underlying like and
//! comment records.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
