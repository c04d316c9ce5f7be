use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::{CredentialError, DatabaseError};
use crate::types::db::refresh_token::{
    self, ActiveModel as RefreshTokenActiveModel, Entity as RefreshToken,
};
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::internal::auth::{Role, UserRecord};

/// CredentialStore manages user credentials and refresh tokens in the database
pub struct CredentialStore {
    db: DatabaseConnection,
    password_pepper: String,
}

/// Emails are compared case-insensitively
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl CredentialStore {
    /// Create a new CredentialStore with the given database connection and password pepper
    ///
    /// # Arguments
    /// * `db` - The database connection
    /// * `password_pepper` - The secret key used for password hashing (from SecretManager)
    pub fn new(db: DatabaseConnection, password_pepper: String) -> Self {
        Self { db, password_pepper }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Add a new user to the database
    ///
    /// # Returns
    /// * `Ok(UserRecord)` - The created user, with role `user`
    /// * `Err(InternalError)` - DuplicateEmail if the email is taken, or a database error
    pub async fn add_user(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> Result<UserRecord, InternalError> {
        let email = normalize_email(email);

        let existing_user = User::find()
            .filter(user::Column::Email.eq(&email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))?;

        if existing_user.is_some() {
            return Err(CredentialError::DuplicateEmail(email).into());
        }

        let salt = SaltString::generate(&mut rand_core::OsRng);
        let password_hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::PasswordHashingFailed(e.to_string()))?
            .to_string();

        let now = Utc::now().timestamp();
        let full_name = full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let new_user = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email.clone()),
            full_name: Set(full_name),
            password_hash: Set(password_hash),
            role: Set(Role::User.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                InternalError::from(CredentialError::DuplicateEmail(email.clone()))
            } else {
                InternalError::database("insert_user", e)
            }
        })?;

        tracing::info!(user_id = %model.id, "User registered");
        UserRecord::try_from(model)
    }

    /// Verify user credentials and return the user on success
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, InternalError> {
        let user = User::find()
            .filter(user::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))?
            .ok_or(CredentialError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| CredentialError::InvalidCredentials)?;

        self.argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| CredentialError::InvalidCredentials)?;

        UserRecord::try_from(user)
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<UserRecord, InternalError> {
        let user = User::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))?
            .ok_or_else(|| CredentialError::UserNotFound(user_id.to_string()))?;

        UserRecord::try_from(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserRecord, InternalError> {
        let email = normalize_email(email);
        let user = User::find()
            .filter(user::Column::Email.eq(&email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))?
            .ok_or(CredentialError::UserNotFound(email))?;

        UserRecord::try_from(user)
    }

    /// Change a user's role
    pub async fn set_role(&self, user_id: &str, role: Role) -> Result<UserRecord, InternalError> {
        let user = User::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))?
            .ok_or_else(|| CredentialError::UserNotFound(user_id.to_string()))?;

        let mut active: ActiveModel = user.into();
        active.role = Set(role.as_str().to_string());
        active.updated_at = Set(Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_user_role", e))?;

        UserRecord::try_from(updated)
    }

    pub async fn count_users(&self) -> Result<u64, InternalError> {
        User::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users", e))
    }

    /// Store a refresh token in the database
    ///
    /// # Arguments
    /// * `token_hash` - The HMAC-SHA256 hash of the refresh token
    /// * `user_id` - The user_id (UUID string) this token belongs to
    /// * `expires_at` - Unix timestamp when the token expires
    pub async fn store_refresh_token(
        &self,
        token_hash: String,
        user_id: String,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source })?;

        let new_token = RefreshTokenActiveModel {
            token_hash: Set(token_hash),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now().timestamp()),
        };

        new_token
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("insert_refresh_token", e))?;

        txn.commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source })?;

        Ok(())
    }

    /// Validate a refresh token and return the associated user_id
    ///
    /// # Returns
    /// * `Ok(String)` - The user_id if the token exists and has not expired
    /// * `Err(InternalError)` - InvalidToken if unknown, ExpiredToken if expired
    pub async fn validate_refresh_token(&self, token_hash: &str) -> Result<String, InternalError> {
        let token = RefreshToken::find_by_id(token_hash.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_refresh_token", e))?
            .ok_or_else(|| CredentialError::invalid_token("refresh_token", "not_found"))?;

        if token.expires_at < Utc::now().timestamp() {
            return Err(CredentialError::ExpiredToken("refresh_token".to_string()).into());
        }

        Ok(token.user_id)
    }

    /// Revoke a refresh token owned by `user_id`
    ///
    /// # Returns
    /// * `Ok(true)` - The token belonged to the user and was deleted
    /// * `Ok(false)` - No such token for this user; nothing changed
    pub async fn revoke_refresh_token(
        &self,
        token_hash: &str,
        user_id: &str,
    ) -> Result<bool, InternalError> {
        let result = RefreshToken::delete_many()
            .filter(refresh_token::Column::TokenHash.eq(token_hash))
            .filter(refresh_token::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("revoke_refresh_token", e))?;

        Ok(result.rows_affected > 0)
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("db", &"<connection>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Display for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CredentialStore {{ db: <connection>, password_pepper: <redacted> }}")
    }
}
