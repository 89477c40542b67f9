//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션에 대한 MongoDB 접근을 담당합니다.
//!
//! ## 특징
//!
//! - **유니크 제약**: `username` 유니크 인덱스
//! - **원자적 사용량 증가**: 한도 조건을 필터에 넣은 `$inc` 한 번으로 처리
//! - **레거시 비밀번호 정리**: 해시로 교체할 때 평문 `password` 필드를 제거

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, AppResult};
use crate::db::{self, Database, USERS_COLLECTION};
use crate::domain::entities::plans::plan::usage_document;
use crate::domain::entities::{UsageMap, User};
use crate::repositories::UserRepository;

/// MongoDB `users` 컬렉션 리포지토리
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<User>(USERS_COLLECTION),
        }
    }

    /// 사용자 컬렉션 인덱스 생성
    ///
    /// - `username_unique`: 로그인 이름 중복 방지
    /// - `subscribed_plan_id`: 플랜 삭제/수정 시 구독자 수 확인
    pub async fn create_indexes(&self) -> AppResult<()> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let plan_index = IndexModel::builder()
            .keys(doc! { "subscribed_plan_id": 1 })
            .options(IndexOptions::builder()
                .name("subscribed_plan_id".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([username_index, plan_index])
            .await?;

        Ok(())
    }

    fn after_update() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": *id }).await?)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "username": username }).await?)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError(format!(
                "Username {} is already taken",
                user.username
            )));
        }

        let result = self.collection.insert_one(&user).await.map_err(|e| {
            if db::is_duplicate_key(&e) {
                AppError::ConflictError(format!("Username {} is already taken", user.username))
            } else {
                AppError::from(e)
            }
        })?;

        if user.id.is_none() {
            user.id = result.inserted_id.as_object_id();
        }

        Ok(user)
    }

    async fn update_password_hash(&self, id: &ObjectId, password_hash: &str) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "_id": *id },
                doc! {
                    "$set": { "password_hash": password_hash },
                    "$unset": { "password": "" },
                },
            )
            .await?;

        Ok(())
    }

    async fn set_plan(&self, id: &ObjectId, plan_id: &str, usage: &UsageMap) -> AppResult<Option<User>> {
        let update = doc! {
            "$set": {
                "subscribed_plan_id": plan_id,
                "current_api_usage": usage_document(usage),
            }
        };

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": *id }, update)
            .with_options(Self::after_update())
            .await?)
    }

    async fn count_subscribers(&self, plan_id: &str) -> AppResult<u64> {
        Ok(self
            .collection
            .count_documents(doc! { "subscribed_plan_id": plan_id })
            .await?)
    }

    async fn try_increment_usage(
        &self,
        id: &ObjectId,
        plan_id: &str,
        permission_id: &str,
        limit: i64,
    ) -> AppResult<Option<i64>> {
        let field = format!("current_api_usage.{}", permission_id);

        let mut filter = doc! { "_id": *id, "subscribed_plan_id": plan_id };
        filter.insert(field.clone(), doc! { "$lt": limit });

        let mut increment = Document::new();
        increment.insert(field, 1_i64);

        let updated = self
            .collection
            .find_one_and_update(filter, doc! { "$inc": increment })
            .with_options(Self::after_update())
            .await?;

        Ok(updated.and_then(|user| user.current_api_usage.get(permission_id).copied()))
    }
}
