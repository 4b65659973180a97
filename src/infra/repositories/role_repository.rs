//! Role repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository};
use super::entities::role::{self, ActiveModel, Entity as RoleEntity};
use crate::domain::{CreateRole, Role, UpdateRole};
use crate::errors::{AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn create(&self, input: CreateRole) -> AppResult<Role>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>>;

    /// Look a role up by its unique name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Role>, u64)>;

    async fn update(&self, id: Uuid, input: UpdateRole) -> AppResult<Role>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<RoleEntity, role::Model> for RoleStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn listing(&self) -> Select<RoleEntity> {
        RoleEntity::find().order_by_asc(role::Column::Name)
    }
}

impl DeleteRepository<RoleEntity> for RoleStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn create(&self, input: CreateRole) -> AppResult<Role> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(Role::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        Ok(self.find_model(id).await?.map(Role::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let model = RoleEntity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(model.map(Role::from))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Role>, u64)> {
        let (models, total) = self.find_paginated(params).await?;
        Ok((models.into_iter().map(Role::from).collect(), total))
    }

    async fn update(&self, id: Uuid, input: UpdateRole) -> AppResult<Role> {
        let mut active: ActiveModel = self.find_model(id).await?.ok_or_not_found()?.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(chrono::Utc::now());

        Ok(Role::from(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.delete_by_id(id).await
    }
}
