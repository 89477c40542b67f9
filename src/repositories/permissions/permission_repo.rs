//! # 권한 리포지토리 구현
//!
//! `permissions` 컬렉션에 대한 MongoDB 접근을 담당합니다.
//! 엔드포인트 하나에는 권한 하나만 존재하도록 `endpoint` 유니크 인덱스를 둡니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, AppResult};
use crate::db::{self, Database, PERMISSIONS_COLLECTION};
use crate::domain::entities::{ApiEndpoint, Permission, PermissionChanges};
use crate::repositories::PermissionRepository;

#[derive(Clone)]
pub struct MongoPermissionRepository {
    collection: Collection<Permission>,
}

impl MongoPermissionRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database
                .get_database()
                .collection::<Permission>(PERMISSIONS_COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let endpoint_index = IndexModel::builder()
            .keys(doc! { "endpoint": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("endpoint_unique".to_string())
                .build())
            .build();

        self.collection.create_index(endpoint_index).await?;
        Ok(())
    }

    fn endpoint_conflict(endpoint: ApiEndpoint) -> AppError {
        AppError::ConflictError(format!("Endpoint {} already exists in a permission", endpoint))
    }
}

#[async_trait]
impl PermissionRepository for MongoPermissionRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Permission>> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn find_by_endpoint(&self, endpoint: ApiEndpoint) -> AppResult<Option<Permission>> {
        Ok(self
            .collection
            .find_one(doc! { "endpoint": endpoint.path() })
            .await?)
    }

    async fn find_all(&self) -> AppResult<Vec<Permission>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, mut permission: Permission) -> AppResult<Permission> {
        let endpoint = permission.endpoint;
        let result = self.collection.insert_one(&permission).await.map_err(|e| {
            if db::is_duplicate_key(&e) {
                Self::endpoint_conflict(endpoint)
            } else {
                AppError::from(e)
            }
        })?;

        permission.id = result.inserted_id.as_object_id();
        Ok(permission)
    }

    async fn update(&self, id: &ObjectId, changes: &PermissionChanges) -> AppResult<Option<Permission>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": changes.to_set_document() })
            .with_options(options)
            .await
            .map_err(|e| match changes.endpoint {
                Some(endpoint) if db::is_duplicate_key(&e) => Self::endpoint_conflict(endpoint),
                _ => AppError::from(e),
            })
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }
}
