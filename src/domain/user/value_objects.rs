use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    /// One line, no control characters.
    static ref NICKNAME_REGEX: regex::Regex = regex::Regex::new(r"^[^\r\n\t]+$").unwrap();
}

/// Nickname shown on posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Nickname {
    #[validate(length(min = 1, max = 30), regex(path = *NICKNAME_REGEX))]
    pub value: String,
}

impl Nickname {
    pub fn new(value: &str) -> Result<Self, validator::ValidationErrors> {
        let nickname = Self {
            value: value.trim().to_string(),
        };
        nickname.validate()?;
        Ok(nickname)
    }
}
