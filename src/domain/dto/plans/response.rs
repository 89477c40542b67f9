use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::plans::plan::{Plan, UsageMap};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = std::collections::HashMap<String, i64>)]
    pub apilimit: UsageMap,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: plan.name,
            description: plan.description,
            apilimit: plan.apilimit,
        }
    }
}
