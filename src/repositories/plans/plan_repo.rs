//! # 플랜 리포지토리 구현
//!
//! `plans` 컬렉션에 대한 MongoDB 접근을 담당합니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

use crate::core::errors::AppResult;
use crate::db::{Database, PLANS_COLLECTION};
use crate::domain::entities::{Plan, PlanChanges};
use crate::repositories::PlanRepository;

#[derive(Clone)]
pub struct MongoPlanRepository {
    collection: Collection<Plan>,
}

impl MongoPlanRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<Plan>(PLANS_COLLECTION),
        }
    }
}

#[async_trait]
impl PlanRepository for MongoPlanRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Plan>> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn find_all(&self) -> AppResult<Vec<Plan>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, mut plan: Plan) -> AppResult<Plan> {
        let result = self.collection.insert_one(&plan).await?;
        plan.id = result.inserted_id.as_object_id();
        Ok(plan)
    }

    async fn update(&self, id: &ObjectId, changes: &PlanChanges) -> AppResult<Option<Plan>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": changes.to_set_document() })
            .with_options(options)
            .await?)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count_using_permission(&self, permission_id: &str) -> AppResult<u64> {
        let mut filter = mongodb::bson::Document::new();
        filter.insert(format!("apilimit.{}", permission_id), doc! { "$exists": true });

        Ok(self.collection.count_documents(filter).await?)
    }
}
