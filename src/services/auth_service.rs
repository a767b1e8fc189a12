use std::sync::Arc;

use crate::{
    database::UserStore,
    models::{IdentityClaim, NewUser, UserView},
    services::{CredentialMatcher, TokenCodec},
    utils::AppError,
};

/// A signed-in identity: the sanitized user and its bearer token.
#[derive(Debug)]
pub struct Session {
    pub user: UserView,
    pub token: String,
}

/// Registers accounts and checks credentials.
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    codec: Arc<TokenCodec>,
    matcher: Arc<dyn CredentialMatcher>,
}

/// `Some(value)` only when the field was sent and is not empty.
fn required(field: Option<&str>) -> Option<&str> {
    field.filter(|value| !value.is_empty())
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserStore>,
        codec: Arc<TokenCodec>,
        matcher: Arc<dyn CredentialMatcher>,
    ) -> Self {
        Self { users, codec, matcher }
    }

    pub async fn register(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Session, AppError> {
        let (Some(name), Some(email), Some(password)) =
            (required(name), required(email), required(password))
        else {
            return Err(AppError::validation("All fields are required"));
        };

        // The store also rejects a racing duplicate on insert.
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = self.matcher.hash(password)?;

        let user = self
            .users
            .insert(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        let view = UserView::from(user);
        let token = self.codec.issue(IdentityClaim::for_user(view.clone()))?;

        log::info!("✅ User registered: {} ({})", view.email, view.id);

        Ok(Session { user: view, token })
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: Option<&str>, password: Option<&str>) -> Result<Session, AppError> {
        let (Some(email), Some(password)) = (required(email), required(password)) else {
            return Err(AppError::validation("Email and password are required"));
        };

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::AuthenticationFailed)?;

        if !self.matcher.matches_credential(password, &user.password_hash)? {
            return Err(AppError::AuthenticationFailed);
        }

        let view = UserView::from(user);
        let token = self.codec.issue(IdentityClaim::for_user(view.clone()))?;

        Ok(Session { user: view, token })
    }
}
