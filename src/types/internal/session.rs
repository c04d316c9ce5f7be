use chrono::Utc;

use crate::types::internal::auth::{Claims, Role};

/// An authenticated session, built from validated access-token claims.
///
/// Sessions are plain values handed to whichever coordinator needs the
/// caller's identity. Lifecycle notifications go through `SessionHub`.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub expires_at: i64,
}

impl Session {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            expires_at: claims.exp,
        }
    }

    /// False once the access token behind this session has expired
    pub fn is_active(&self) -> bool {
        self.expires_at > Utc::now().timestamp()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Lifecycle notifications published by `SessionHub`
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { user_id: String },
    Ended { user_id: String, reason: SessionEndReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEndReason {
    Logout,
    Expired,
}
