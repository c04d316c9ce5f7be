use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::services::report_validator::is_valid_email;
use crate::services::{PasswordValidator, SessionHub, TokenService};
use crate::stores::CredentialStore;
use crate::types::internal::auth::UserRecord;
use crate::types::internal::session::{Session, SessionEndReason};

/// Tokens handed out on register and login
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Authentication coordinator that orchestrates register, login, refresh and logout
///
/// Handles workflow orchestration by composing store and service operations
/// for authentication-related API endpoints.
pub struct AuthCoordinator {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
    session_hub: SessionHub,
    password_validator: PasswordValidator,
}

impl AuthCoordinator {
    /// Create AuthCoordinator from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: app_data.credential_store.clone(),
            token_service: app_data.token_service.clone(),
            session_hub: app_data.session_hub.clone(),
            password_validator: PasswordValidator::new(),
        }
    }

    /// Create an account and sign it in
    ///
    /// Coordinates the sequence of operations:
    /// 1. Check email syntax and password policy
    /// 2. Create the user via credential store
    /// 3. Issue access and refresh tokens
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> Result<IssuedTokens, InternalError> {
        if !is_valid_email(email) {
            return Err(CredentialError::InvalidEmail(email.trim().to_string()).into());
        }
        self.password_validator.validate(password)?;

        let user = self
            .credential_store
            .add_user(email, password, full_name)
            .await?;

        self.issue_tokens(&user).await
    }

    /// Verify credentials and issue tokens
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedTokens, InternalError> {
        let user = self
            .credential_store
            .verify_credentials(email, password)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");
        self.issue_tokens(&user).await
    }

    async fn issue_tokens(&self, user: &UserRecord) -> Result<IssuedTokens, InternalError> {
        let access_token = self.token_service.generate_jwt(user)?;

        let refresh_token = self.token_service.generate_refresh_token();
        let token_hash = self.token_service.hash_refresh_token(&refresh_token)?;
        let expires_at = self.token_service.get_refresh_expiration();

        self.credential_store
            .store_refresh_token(token_hash, user.id.clone(), expires_at)
            .await?;

        self.session_hub.started(&user.id);

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            expires_in: self.token_service.jwt_expiration_seconds(),
        })
    }

    /// Exchange a refresh token for a new access token
    ///
    /// The access token reflects the user's current role.
    ///
    /// # Returns
    /// * `Ok((access_token, expires_in))`
    pub async fn refresh(&self, refresh_token: &str) -> Result<(String, i64), InternalError> {
        let token_hash = self.token_service.hash_refresh_token(refresh_token)?;
        let user_id = self
            .credential_store
            .validate_refresh_token(&token_hash)
            .await?;

        let user = self.credential_store.get_user_by_id(&user_id).await?;
        let access_token = self.token_service.generate_jwt(&user)?;

        Ok((access_token, self.token_service.jwt_expiration_seconds()))
    }

    /// Revoke the caller's refresh token and end the session
    ///
    /// A token that is unknown or belongs to someone else is left alone;
    /// the call still succeeds for the caller.
    pub async fn logout(&self, session: &Session, refresh_token: &str) -> Result<(), InternalError> {
        let token_hash = self.token_service.hash_refresh_token(refresh_token)?;
        let revoked = self
            .credential_store
            .revoke_refresh_token(&token_hash, &session.user_id)
            .await?;

        if !revoked {
            tracing::warn!(user_id = %session.user_id, "Logout with a refresh token the caller does not own");
        }

        self.session_hub.ended(&session.user_id, SessionEndReason::Logout);
        Ok(())
    }

    /// Validate a bearer token and build the caller's session
    pub fn authenticate(&self, access_token: &str) -> Result<Session, InternalError> {
        let claims = self.token_service.validate_jwt(access_token)?;
        Ok(Session::from_claims(claims))
    }

    /// Current account details for a session
    ///
    /// Publishes an `Expired` event when the session has run out. Sessions
    /// built by `authenticate` are never expired on arrival, so over HTTP
    /// this only fires for a token that lapses mid-request; in-process
    /// callers holding an older `Session` hit it directly.
    pub async fn session_info(&self, session: &Session) -> Result<UserRecord, InternalError> {
        if !session.is_active() {
            self.session_hub.ended(&session.user_id, SessionEndReason::Expired);
        }
        self.credential_store.get_user_by_id(&session.user_id).await
    }
}
