use super::dto::UpdateProfileRequest;
use crate::domain::post::DomainError;
use crate::domain::store::{Document, DocumentStore, FieldValue};
use crate::domain::user::value_objects::Nickname;
use crate::domain::user::{AuthError, AuthGateway, AuthUser, UserProfile};
use std::sync::Arc;
use tracing::info;

/// Fetch and edit the signed-in user's profile.
pub struct ProfileUseCase {
    auth: Arc<dyn AuthGateway>,
    store: Arc<dyn DocumentStore>,
}

impl ProfileUseCase {
    pub fn new(auth: Arc<dyn AuthGateway>, store: Arc<dyn DocumentStore>) -> Self {
        Self { auth, store }
    }

    /// Read the profile document; `None` when it was never written.
    pub async fn fetch(&self, user: Option<&AuthUser>) -> Result<Option<UserProfile>, DomainError> {
        let user = user.ok_or(DomainError::Unauthenticated)?;
        let fields = self.store.read(&UserProfile::doc_path(&user.id)).await?;
        Ok(fields.map(|f| UserProfile::from_fields(user.id.as_str(), &f)))
    }

    /// Apply a profile edit: nickname always, password only when provided.
    ///
    /// The nickname lands in both places the original kept it: the profile
    /// document and the identity service display name. The document is
    /// merge-written so a missing profile is created rather than rejected.
    pub async fn update(
        &self,
        request: UpdateProfileRequest,
        user: Option<&AuthUser>,
    ) -> Result<(), DomainError> {
        let user = user.ok_or(DomainError::Unauthenticated)?;
        let nickname = Nickname::new(&request.nickname)
            .map_err(|_| DomainError::Validation("nickname is required".to_string()))?;

        let mut fields = Document::new();
        fields.insert(
            UserProfile::FIELD_NICKNAME.to_string(),
            FieldValue::Str(nickname.value.clone()),
        );
        self.store
            .write(&UserProfile::doc_path(&user.id), fields, true)
            .await?;
        self.auth
            .update_display_name(&user.id, &nickname.value)
            .await
            .map_err(auth_to_domain)?;

        if let Some(password) = request.new_password.filter(|p| !p.is_empty()) {
            self.auth
                .update_password(&user.id, &password)
                .await
                .map_err(auth_to_domain)?;
        }

        info!(user_id = %user.id, "profile updated");
        Ok(())
    }
}

fn auth_to_domain(err: AuthError) -> DomainError {
    match err {
        AuthError::Unauthenticated => DomainError::Unauthenticated,
        AuthError::WeakPassword => DomainError::Validation(err.to_string()),
        other => DomainError::Backend(other.to_string()),
    }
}
