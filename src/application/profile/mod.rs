//! Profile reads and edits for the my-page screen.

pub mod dto;
pub mod use_case;

pub use dto::UpdateProfileRequest;
pub use use_case::ProfileUseCase;
