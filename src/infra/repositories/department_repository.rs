//! Department repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Select, Set};
use uuid::Uuid;

use super::base::{DeleteRepository, ReadRepository};
use super::entities::department::{self, ActiveModel, Entity as DepartmentEntity};
use crate::domain::{CreateDepartment, Department, UpdateDepartment};
use crate::errors::{AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn create(&self, input: CreateDepartment) -> AppResult<Department>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>>;

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Department>, u64)>;

    async fn update(&self, id: Uuid, input: UpdateDepartment) -> AppResult<Department>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ReadRepository<DepartmentEntity, department::Model> for DepartmentStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn listing(&self) -> Select<DepartmentEntity> {
        DepartmentEntity::find().order_by_asc(department::Column::Name)
    }
}

impl DeleteRepository<DepartmentEntity> for DepartmentStore {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl DepartmentRepository for DepartmentStore {
    async fn create(&self, input: CreateDepartment) -> AppResult<Department> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(Department::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        Ok(self.find_model(id).await?.map(Department::from))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Department>, u64)> {
        let (models, total) = self.find_paginated(params).await?;
        Ok((models.into_iter().map(Department::from).collect(), total))
    }

    async fn update(&self, id: Uuid, input: UpdateDepartment) -> AppResult<Department> {
        let mut active: ActiveModel = self.find_model(id).await?.ok_or_not_found()?.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        active.updated_at = Set(chrono::Utc::now());

        Ok(Department::from(active.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.delete_by_id(id).await
    }
}
