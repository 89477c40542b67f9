//! # 사용자 관리 서비스 구현
//!
//! 사용자 조회와 시드 데이터 가져오기를 담당합니다.
//! 계정 생성 API는 없으며, 계정은 시드 파일(`sample/ACAMS.user.json`)로만 들어옵니다.
//!
//! ## 비밀번호 보안
//!
//! - **bcrypt 해싱**: 시드 파일의 평문 비밀번호는 저장 전에 해싱합니다.
//! - **환경별 Cost**: 개발/테스트 4, 스테이징 10, 운영 12 ([`PasswordConfig`](crate::config::PasswordConfig))
//! - **민감 정보 제거**: 응답 DTO에는 비밀번호 해시가 없습니다.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::dto::users::{SeedReport, SeedUserRecord, UserResponse};
use crate::domain::entities::plans::plan::UsageMap;
use crate::domain::entities::users::user::{Role, User, is_bcrypt_hash};
use crate::repositories::{PlanRepository, UserRepository};
use crate::services::subscriptions::validate_usage;
use crate::utils::string_utils::{parse_object_id, validate_required_string};

/// 비밀번호를 bcrypt로 해싱합니다.
///
/// 해싱 시간은 cost에 따라 크게 달라지므로 info 레벨로 기록합니다.
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let hash_start = Instant::now();

    let password_hash = bcrypt::hash(password, cost)
        .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

    log::info!("Password hashing took: {:?} (cost {})", hash_start.elapsed(), cost);
    Ok(password_hash)
}

/// JSON 시드 파일을 읽습니다.
///
/// 파일은 사용자 레코드의 배열입니다. MongoDB extended JSON의 `{"$oid": ...}`
/// 형식 id도 받아들입니다.
pub fn read_seed_file(path: &Path) -> AppResult<Vec<SeedUserRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;

    serde_json::from_str(&content)
        .map_err(|e| AppError::ValidationError(format!("Invalid seed file {}: {}", path.display(), e)))
}

/// 사용자 관리 비즈니스 로직 서비스
#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    plan_repo: Arc<dyn PlanRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        plan_repo: Arc<dyn PlanRepository>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            user_repo,
            plan_repo,
            bcrypt_cost,
        }
    }

    /// ID로 사용자 조회
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 잘못된 ObjectId 형식
    /// * `NotFound` - 사용자 없음
    pub async fn get_user_by_id(&self, id: &str) -> AppResult<UserResponse> {
        let oid = parse_object_id(id)?;

        let user = self
            .user_repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No user with object id {} exist", id)))?;

        Ok(UserResponse::from(user))
    }

    pub async fn get_user_by_username(&self, username: &str) -> AppResult<UserResponse> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

        Ok(UserResponse::from(user))
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 시드 레코드를 가져옵니다.
    ///
    /// 이미 존재하는 username은 건너뜁니다. 평문 `password`는 bcrypt로 해싱하고,
    /// 이미 bcrypt 형식인 `password_hash`는 그대로 저장합니다.
    /// 구독 플랜이 있는 레코드는 사용량 키가 그 플랜의 권한 id와 같아야 하며,
    /// 사용량이 비어 있으면 0으로 채웁니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 빈 username, 비밀번호 누락, 잘못된 ObjectId,
    ///   존재하지 않는 플랜, 플랜과 맞지 않는 사용량
    pub async fn seed(&self, records: Vec<SeedUserRecord>) -> AppResult<SeedReport> {
        let start_time = Instant::now();
        let mut report = SeedReport::default();

        for record in records {
            let username = validate_required_string(&record.username, "username")?;

            if self.user_repo.find_by_username(&username).await?.is_some() {
                log::info!("시드 건너뜀 - 이미 존재하는 사용자: {}", username);
                report.skipped += 1;
                continue;
            }

            let user = self.user_from_record(username, record).await?;
            let username = user.username.clone();

            match self.user_repo.insert(user).await {
                Ok(_) => {
                    log::info!("✅ 시드 사용자 추가: {}", username);
                    report.inserted += 1;
                }
                Err(AppError::ConflictError(msg)) => {
                    log::warn!("시드 건너뜀 - {}", msg);
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "시드 완료: {}명 추가, {}명 건너뜀 ({:?})",
            report.inserted,
            report.skipped,
            start_time.elapsed()
        );

        Ok(report)
    }

    async fn user_from_record(&self, username: String, record: SeedUserRecord) -> AppResult<User> {
        let id = record.id_hex().map(|hex| parse_object_id(&hex)).transpose()?;
        let plan_id = record.subscribed_plan_hex();
        if plan_id.is_some() && record.role == Role::Admin {
            return Err(AppError::ValidationError(format!(
                "Seed user {} is an Admin and cannot subscribe to plans",
                username
            )));
        }
        let subscription = self
            .seed_usage(&username, plan_id.as_deref(), record.current_api_usage)
            .await?;

        let password_hash = match (record.password_hash, record.password) {
            (Some(hash), _) if is_bcrypt_hash(&hash) => hash,
            (_, Some(password)) if !password.is_empty() => hash_password(&password, self.bcrypt_cost)?,
            (Some(plain), None) if !plain.is_empty() => hash_password(&plain, self.bcrypt_cost)?,
            _ => {
                return Err(AppError::ValidationError(format!(
                    "Seed user {} has no password",
                    username
                )));
            }
        };

        let mut user = User::new(username, password_hash, record.role);
        user.id = id;
        if let Some((plan_id, usage)) = subscription {
            user.subscribed_plan_id = Some(plan_id);
            user.current_api_usage = usage;
        }

        Ok(user)
    }

    /// 시드 레코드의 구독 정보를 검증하고 (정규화된 플랜 id, 사용량)을 돌려줍니다.
    async fn seed_usage(
        &self,
        username: &str,
        plan_id: Option<&str>,
        usage: UsageMap,
    ) -> AppResult<Option<(String, UsageMap)>> {
        let Some(plan_id) = plan_id else {
            if !usage.is_empty() {
                return Err(AppError::ValidationError(format!(
                    "Seed user {} has API usage but no subscribed plan",
                    username
                )));
            }
            return Ok(None);
        };

        let oid = parse_object_id(plan_id)?;
        let plan = self.plan_repo.find_by_id(&oid).await?.ok_or_else(|| {
            AppError::ValidationError(format!(
                "Seed user {} is subscribed to plan {} which doesn't exist",
                username, plan_id
            ))
        })?;

        let usage = if usage.is_empty() {
            plan.fresh_usage()
        } else {
            validate_usage(&usage, &plan.apilimit)?;
            usage
        };

        Ok(Some((oid.to_hex(), usage)))
    }
}
