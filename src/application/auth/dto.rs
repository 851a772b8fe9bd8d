use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// Registration form fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 30))]
    pub nickname: String,

    pub password: String,

    pub confirm_password: String,
}

/// Login form fields.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
