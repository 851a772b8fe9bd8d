use crate::domain::store::{Document, FieldValue, join_path};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The authenticated identity, as reported by the identity service.
///
/// Always passed explicitly into operations that need it; there is no
/// ambient current-user global, so the unauthenticated path is visible in
/// every signature that can hit it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthUser {
    /// Identity-service user id
    pub id: String,

    /// Chosen display name, if the user has set one
    pub display_name: Option<String>,

    /// Avatar URL, if the user has set one
    pub photo_url: Option<String>,
}

impl AuthUser {
    /// Display name with the original app's anonymous fallback.
    pub fn display_name_or_anonymous(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Anonymous")
    }
}

/// The editable profile document at `users/{uid}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserProfile {
    pub user_id: String,
    pub nickname: String,
    pub email: Option<String>,
}

impl UserProfile {
    pub const COLLECTION: &'static str = "users";
    pub const FIELD_NICKNAME: &'static str = "nickname";
    pub const FIELD_EMAIL: &'static str = "email";

    /// Document path of a profile, `users/{uid}`.
    pub fn doc_path(user_id: &str) -> String {
        join_path(&[Self::COLLECTION, user_id])
    }

    pub fn from_fields(user_id: impl Into<String>, fields: &Document) -> Self {
        Self {
            user_id: user_id.into(),
            nickname: fields
                .get(Self::FIELD_NICKNAME)
                .and_then(FieldValue::as_str)
                .unwrap_or_default()
                .to_string(),
            email: fields
                .get(Self::FIELD_EMAIL)
                .and_then(FieldValue::as_str)
                .map(str::to_string),
        }
    }
}
