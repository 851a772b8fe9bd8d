use serde::{Deserialize, Serialize};
use validator::Validate;

/// Post title, trimmed and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostTitle {
    #[validate(length(min = 1, max = 120))]
    pub value: String,
}

impl PostTitle {
    pub fn new(value: &str) -> Result<Self, validator::ValidationErrors> {
        let title = Self {
            value: value.trim().to_string(),
        };
        title.validate()?;
        Ok(title)
    }
}

/// Post body, trimmed and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostBody {
    #[validate(length(min = 1, max = 10_000))]
    pub value: String,
}

impl PostBody {
    pub fn new(value: &str) -> Result<Self, validator::ValidationErrors> {
        let body = Self {
            value: value.trim().to_string(),
        };
        body.validate()?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_rejects_whitespace_only() {
        assert!(PostTitle::new("   ").is_err());
        assert!(PostTitle::new(" hi ").is_ok());
        assert_eq!(PostTitle::new(" hi ").unwrap().value, "hi");
    }

    #[test]
    fn body_enforces_length_bounds() {
        assert!(PostBody::new("").is_err());
        assert!(PostBody::new(&"a".repeat(10_001)).is_err());
        assert!(PostBody::new("fine").is_ok());
    }
}
