//! User service - account management.
//!
//! Plain-text passwords never leave this module: they are hashed with
//! Argon2 before reaching the repository.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateUser, NewUser, Password, UpdateUser, User, UserChanges};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait UserService: Send + Sync {
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<User>>;

    /// Update details; a new password is re-hashed
    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User>;

    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let password_hash = Password::new(&input.password)?.into_string();

        self.uow
            .users()
            .create(NewUser {
                email: input.email,
                password_hash,
                name: input.name,
                role_id: input.role_id,
                department_id: input.department_id,
            })
            .await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<User>> {
        let (data, total) = self.uow.users().list(&params).await?;
        Ok(Paginated::new(data, &params, total))
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User> {
        let password_hash = match input.password {
            Some(plain) => Some(Password::new(&plain)?.into_string()),
            None => None,
        };

        self.uow
            .users()
            .update(
                id,
                UserChanges {
                    name: input.name,
                    password_hash,
                    role_id: input.role_id,
                    department_id: input.department_id,
                },
            )
            .await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.uow.users().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::{MockUnitOfWork, MockUserRepository, UserRepository};
    use chrono::Utc;

    fn stored(user: NewUser) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            role_id: user.role_id,
            department_id: user.department_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn service_with(users: MockUserRepository) -> UserManager<MockUnitOfWork> {
        let users: Arc<dyn UserRepository> = Arc::new(users);
        let mut uow = MockUnitOfWork::new();
        uow.expect_users().returning(move || users.clone());
        UserManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn test_create_user_stores_argon2_hash() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .withf(|user| user.password_hash.starts_with("$argon2") && user.password_hash != "Secret123!")
            .times(1)
            .returning(|user| Ok(stored(user)));

        let created = service_with(users)
            .create_user(CreateUser {
                email: "new@example.com".to_string(),
                password: "Secret123!".to_string(),
                name: "New".to_string(),
                role_id: Uuid::new_v4(),
                department_id: None,
            })
            .await
            .unwrap();

        assert!(Password::from_hash(created.password_hash).verify("Secret123!"));
    }

    #[tokio::test]
    async fn test_update_without_password_leaves_hash_alone() {
        let mut users = MockUserRepository::new();
        users
            .expect_update()
            .withf(|_, changes| changes.password_hash.is_none() && changes.name.as_deref() == Some("Renamed"))
            .returning(|id, changes| {
                let mut user = stored(NewUser {
                    email: "a@example.com".to_string(),
                    password_hash: "hash".to_string(),
                    name: changes.name.unwrap_or_default(),
                    role_id: Uuid::new_v4(),
                    department_id: None,
                });
                user.id = id;
                Ok(user)
            });

        let updated = service_with(users)
            .update_user(
                Uuid::new_v4(),
                UpdateUser {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let result = service_with(users).get_user(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
