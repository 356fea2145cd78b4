use super::entities::{User, UserRole};
use serde::Serialize;
use ts_rs::TS;

// 用户响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
}

// 用户资料响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserInfoResponse {
    pub has_userinfo: bool,
    pub role: UserRole,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub student_number: Option<String>,
}

impl From<&User> for UserInfoResponse {
    fn from(user: &User) -> Self {
        Self {
            has_userinfo: user.has_userinfo(),
            role: user.role.clone(),
            first_name: user.profile.first_name.clone(),
            last_name: user.profile.last_name.clone(),
            student_number: user.profile.student_number.clone(),
        }
    }
}
