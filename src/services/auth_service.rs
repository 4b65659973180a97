//! Authentication service - credentials check and JWT handling.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, ROLE_ADMIN, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    /// Role name, e.g. `admin`
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a token and return its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Sign a token for a user holding `role`
    fn issue_token(&self, user: &User, role: &str) -> AppResult<TokenResponse>;
}

pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let Some(user) = self.uow.users().find_by_email(&email).await? else {
            Password::verify_dummy(&password);
            tracing::debug!("Login for unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !Password::from_hash(user.password_hash.as_str()).verify(&password) {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let role = self
            .uow
            .roles()
            .find_by_id(user.role_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Role {} of user {} missing", user.role_id, user.id)))?;

        self.issue_token(&user, &role.name)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    fn issue_token(&self, user: &User, role: &str) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::infra::{
        MockRoleRepository, MockUnitOfWork, MockUserRepository, RoleRepository, UserRepository,
    };

    const SECRET: &str = "test-secret-key-that-is-long-enough";

    fn user_with_password(password: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "buyer@example.com".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            name: "Buyer".to_string(),
            role_id: Uuid::new_v4(),
            department_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_invalid_credentials() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let users: Arc<dyn UserRepository> = Arc::new(users);

        let mut uow = MockUnitOfWork::new();
        uow.expect_users().returning(move || users.clone());

        let auth = Authenticator::new(Arc::new(uow), Config::with_jwt_secret(SECRET));
        let result = auth
            .login("ghost@example.com".to_string(), "whatever1".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_invalid_credentials() {
        let user = user_with_password("right-password");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        let users: Arc<dyn UserRepository> = Arc::new(users);

        let mut uow = MockUnitOfWork::new();
        uow.expect_users().returning(move || users.clone());

        let auth = Authenticator::new(Arc::new(uow), Config::with_jwt_secret(SECRET));
        let result = auth
            .login("buyer@example.com".to_string(), "wrong-password".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_issues_token_with_role_name() {
        let user = user_with_password("right-password");
        let role_id = user.role_id;
        let user_id = user.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        let users: Arc<dyn UserRepository> = Arc::new(users);

        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_id().returning(move |id| {
            let now = Utc::now();
            Ok(Some(Role {
                id,
                name: ROLE_ADMIN.to_string(),
                description: None,
                created_at: now,
                updated_at: now,
            }))
        });
        let roles: Arc<dyn RoleRepository> = Arc::new(roles);

        let mut uow = MockUnitOfWork::new();
        uow.expect_users().returning(move || users.clone());
        uow.expect_roles().returning(move || roles.clone());

        let auth = Authenticator::new(Arc::new(uow), Config::with_jwt_secret(SECRET));
        let token = auth
            .login("buyer@example.com".to_string(), "right-password".to_string())
            .await
            .unwrap();
        let claims = auth.verify_token(&token.access_token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.is_admin());
        assert_ne!(role_id, Uuid::nil());
        assert_eq!(token.token_type, "Bearer");
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let user = user_with_password("right-password");
        let issuer = Authenticator::new(
            Arc::new(MockUnitOfWork::new()),
            Config::with_jwt_secret("another-secret-key-that-is-long-enough"),
        );
        let verifier = Authenticator::new(Arc::new(MockUnitOfWork::new()), Config::with_jwt_secret(SECRET));

        let token = issuer.issue_token(&user, "buyer").unwrap();
        let result = verifier.verify_token(&token.access_token);

        assert!(matches!(result, Err(AppError::Jwt(_))));
    }
}
