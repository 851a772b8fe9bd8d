//! Like/comment consistency management for post detail screens.

pub mod dto;
pub mod use_case;

pub use dto::LikeToggle;
pub use use_case::SocialUseCase;
