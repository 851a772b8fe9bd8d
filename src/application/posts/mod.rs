//! Post authoring, detail reads, and the live feed.

pub mod dto;
pub mod use_case;

pub use dto::CreatePostRequest;
pub use use_case::PostUseCase;
