use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Profile edit form: a new nickname and, optionally, a new password.
///
/// An empty password field means "leave the password alone", matching the
/// original form's behavior.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateProfileRequest {
    pub nickname: String,
    pub new_password: Option<String>,
}
