use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::dto::plans::PlanResponse;
use crate::domain::dto::users::UserResponse;
use crate::domain::entities::endpoint::ApiEndpoint;

/// 플랜에 포함된 권한과 한도
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanPermissionLimit {
    pub id: String,
    pub name: String,
    pub endpoint: ApiEndpoint,
    pub description: Option<String>,
    pub limit: i64,
}

/// 구독 중인 플랜 상세
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanDetailsResponse {
    pub user: UserResponse,
    pub plan: PlanResponse,
    pub permissions: Vec<PlanPermissionLimit>,
}

/// 권한별 사용량
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionUsage {
    pub id: String,
    pub name: String,
    pub endpoint: ApiEndpoint,
    pub description: Option<String>,
    pub used: i64,
    pub limit: i64,
    pub remaining: i64,
}

/// 사용량 통계
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsageStatisticsResponse {
    pub user: UserResponse,
    pub plan_id: String,
    pub plan_name: String,
    pub usage: Vec<PermissionUsage>,
}

/// 구독/플랜 변경 결과
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionResponse {
    pub message: String,
    pub user: UserResponse,
}

/// 클라우드 엔드포인트 호출 결과
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceCallResponse {
    pub endpoint: ApiEndpoint,
    pub result: String,
    /// 이번 호출을 포함한 사용량
    pub used: i64,
    pub limit: i64,
}
