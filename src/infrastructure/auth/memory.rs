//! In-process identity service used by tests and local development.
//!
//! Mirrors the managed service's observable behavior: email/password
//! accounts, a minimum password length, duplicate-email rejection, and a
//! single current session. Passwords are bcrypt-hashed even here so no test
//! fixture ever holds one in the clear.

use crate::domain::user::gateway::MIN_PASSWORD_LEN;
use crate::domain::user::{AuthError, AuthGateway, AuthUser};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

struct Account {
    id: String,
    email: String,
    password_hash: String,
    display_name: Option<String>,
    photo_url: Option<String>,
}

impl Account {
    fn to_user(&self) -> AuthUser {
        AuthUser {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

pub struct MemoryAuth {
    // keyed by account id
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<String>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
        }
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthGateway for MemoryAuth {
    async fn current_user(&self) -> Option<AuthUser> {
        let current = self.current.read().await.clone()?;
        let accounts = self.accounts.read().await;
        accounts.get(&current).map(Account::to_user)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthUser, AuthError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == email) {
            return Err(AuthError::EmailAlreadyInUse);
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        let account = Account {
            id: Uuid::now_v7().to_string(),
            email: email.to_string(),
            password_hash,
            display_name: Some(display_name.to_string()),
            photo_url: None,
        };
        let user = account.to_user();
        accounts.insert(account.id.clone(), account);
        *self.current.write().await = Some(user.id.clone());
        debug!(user_id = %user.id, "account created and signed in");
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .values()
            .find(|a| a.email == email)
            .ok_or(AuthError::WrongCredentials)?;
        let verified = bcrypt::verify(password, &account.password_hash)
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        if !verified {
            return Err(AuthError::WrongCredentials);
        }
        let user = account.to_user();
        drop(accounts);
        *self.current.write().await = Some(user.id.clone());
        debug!(user_id = %user.id, "signed in");
        Ok(user)
    }

    async fn sign_out(&self) {
        *self.current.write().await = None;
    }

    async fn update_display_name(
        &self,
        user_id: &str,
        display_name: &str,
    ) -> Result<(), AuthError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(user_id)
            .ok_or(AuthError::Unauthenticated)?;
        account.display_name = Some(display_name.to_string());
        Ok(())
    }

    async fn update_password(&self, user_id: &str, new_password: &str) -> Result<(), AuthError> {
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(user_id)
            .ok_or(AuthError::Unauthenticated)?;
        account.password_hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        Ok(())
    }
}
