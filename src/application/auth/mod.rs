//! Registration, login, and logout against the external identity service.

pub mod dto;
pub mod use_case;

pub use dto::{LoginRequest, RegisterRequest};
pub use use_case::AuthUseCase;
