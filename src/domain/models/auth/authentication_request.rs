use crate::domain::entities::users::user::Role;

/// 라우트 접근에 필요한 역할
#[derive(Debug, Clone, PartialEq)]
pub enum RequiredRole {
    Single(Role),
    Any(Vec<Role>),
}

impl RequiredRole {
    pub fn is_satisfied(&self, role: Role) -> bool {
        match self {
            RequiredRole::Single(required_role) => *required_role == role,
            RequiredRole::Any(required_roles) => required_roles.contains(&role),
        }
    }
}
