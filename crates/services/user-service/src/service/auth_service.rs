//! Authentication service - registration, login and token verification.
//!
//! Passwords are hashed through the domain `Password` value object.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use common::{AppError, AppResult, JwtConfig};
use domain::{NewUser, Password, User, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use storage::UserRepository;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(
        &self,
        username: String,
        password: String,
        email: Option<String>,
        name: Option<String>,
    ) -> AppResult<User>;

    /// Login and return a JWT
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify a JWT and return the user it was issued to
    async fn authenticate(&self, token: &str) -> AppResult<User>;
}

/// Concrete implementation of AuthService backed by the user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    fn generate_token(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt.expiration_hours);

        let claims = Claims {
            sub: user.username.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt.expiration_hours * SECONDS_PER_HOUR,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        username: String,
        password: String,
        email: Option<String>,
        name: Option<String>,
    ) -> AppResult<User> {
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();

        let user = self
            .users
            .create(NewUser {
                username,
                password_hash,
                email,
                name,
            })
            .await?;

        tracing::info!(username = %user.username, "User registered");
        Ok(user)
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let user = self.users.find_by_username(username).await?;

        // Verify against a dummy hash when the user is unknown so both
        // paths take the same time.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.as_str()),
            None => Password::from_hash(dummy_hash),
        };
        let password_valid = stored.verify(password);

        match user {
            Some(user) if password_valid => self.generate_token(&user),
            _ => {
                tracing::debug!(username, "Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.verify_token(token)?;

        // The account may have been deleted after the token was issued
        self.users
            .find_by_username(&claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
