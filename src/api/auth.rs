use std::sync::Arc;

use poem_openapi::{OpenApi, SecurityScheme, Tags, auth::Bearer, payload::Json};

use crate::coordinators::AuthCoordinator;
use crate::errors::AuthError;
use crate::types::dto::auth::{
    LoginRequest, LogoutRequest, LogoutResponse, RefreshRequest, RefreshResponse,
    RegisterRequest, SessionResponse, TokenResponse,
};
use crate::types::internal::auth::Role;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

/// Authentication API endpoints
pub struct AuthApi {
    coordinator: Arc<AuthCoordinator>,
}

impl AuthApi {
    pub fn new(coordinator: Arc<AuthCoordinator>) -> Self {
        Self { coordinator }
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Create an account and receive authentication tokens
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(&self, body: Json<RegisterRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let body = body.0;
        let tokens = self
            .coordinator
            .register(&body.email, &body.password, body.full_name)
            .await?;

        Ok(Json(TokenResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expires_in,
        }))
    }

    /// Login with email and password to receive authentication tokens
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let tokens = self.coordinator.login(&body.email, &body.password).await?;

        Ok(Json(TokenResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expires_in,
        }))
    }

    /// Refresh access token using a refresh token
    #[oai(path = "/refresh", method = "post", tag = "AuthTags::Authentication")]
    async fn refresh(&self, body: Json<RefreshRequest>) -> Result<Json<RefreshResponse>, AuthError> {
        let (access_token, expires_in) = self.coordinator.refresh(&body.refresh_token).await?;

        Ok(Json(RefreshResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }))
    }

    /// Logout and revoke refresh token
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(
        &self,
        auth: BearerAuth,
        body: Json<LogoutRequest>,
    ) -> Result<Json<LogoutResponse>, AuthError> {
        let session = self.coordinator.authenticate(&auth.0.token)?;
        self.coordinator.logout(&session, &body.refresh_token).await?;

        Ok(Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }))
    }

    /// Describe the current session
    #[oai(path = "/session", method = "get", tag = "AuthTags::Authentication")]
    async fn session(&self, auth: BearerAuth) -> Result<Json<SessionResponse>, AuthError> {
        let session = self.coordinator.authenticate(&auth.0.token)?;
        let user = self.coordinator.session_info(&session).await?;

        // authenticate already rejected expired tokens, so this is true unless
        // the token ran out between the two calls
        Ok(Json(SessionResponse {
            active: session.is_active(),
            display_name: user.display_name(),
            is_admin: user.role == Role::Admin,
            user_id: user.id,
            email: user.email,
            expires_at: session.expires_at,
        }))
    }
}
