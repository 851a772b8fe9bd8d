use super::dto::{LoginRequest, RegisterRequest};
use crate::domain::store::{Document, DocumentStore, FieldValue};
use crate::domain::user::gateway::MIN_PASSWORD_LEN;
use crate::domain::user::value_objects::Nickname;
use crate::domain::user::{AuthError, AuthGateway, AuthUser, UserProfile};
use std::sync::Arc;
use tracing::{info, warn};
use validator::ValidateEmail;

/// Account lifecycle: register, log in, log out.
///
/// Form validation runs before any network call; the identity service only
/// sees requests that already pass the client-side rules.
pub struct AuthUseCase {
    auth: Arc<dyn AuthGateway>,
    store: Arc<dyn DocumentStore>,
}

impl AuthUseCase {
    pub fn new(auth: Arc<dyn AuthGateway>, store: Arc<dyn DocumentStore>) -> Self {
        Self { auth, store }
    }

    /// Create an account, sign it in, and seed the `users/{uid}` profile
    /// document with the chosen nickname.
    ///
    /// The profile write is best-effort: the account already exists at that
    /// point, so a failed write is logged and the profile screen recreates
    /// the document on first save.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthUser, AuthError> {
        let nickname = Nickname::new(&request.nickname)
            .map_err(|_| AuthError::MissingField("nickname".to_string()))?;
        if !request.email.trim().validate_email() {
            return Err(AuthError::InvalidEmail);
        }
        if request.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let user = self
            .auth
            .sign_up(request.email.trim(), &request.password, &nickname.value)
            .await?;

        let mut fields = Document::new();
        fields.insert(
            UserProfile::FIELD_NICKNAME.to_string(),
            FieldValue::Str(nickname.value),
        );
        fields.insert(
            UserProfile::FIELD_EMAIL.to_string(),
            FieldValue::Str(request.email.trim().to_string()),
        );
        if let Err(err) = self
            .store
            .write(&UserProfile::doc_path(&user.id), fields, false)
            .await
        {
            warn!(user_id = %user.id, error = %err, "account created but profile document write failed");
        }

        info!(user_id = %user.id, "registered");
        Ok(user)
    }

    /// Sign in with email and password. Empty fields are rejected before the
    /// identity service is called.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthUser, AuthError> {
        if request.email.trim().is_empty() {
            return Err(AuthError::MissingField("email".to_string()));
        }
        if request.password.is_empty() {
            return Err(AuthError::MissingField("password".to_string()));
        }
        self.auth
            .sign_in(request.email.trim(), &request.password)
            .await
    }

    /// End the current session.
    pub async fn logout(&self) {
        self.auth.sign_out().await;
    }

    /// The current identity, if signed in.
    pub async fn current_user(&self) -> Option<AuthUser> {
        self.auth.current_user().await
    }
}
