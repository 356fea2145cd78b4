use crate::models::users::entities::{User, UserRole};
use serde::Serialize;
use ts_rs::TS;

// 登录响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub access_token: String,
    /// 使用会话 cookie 时，修改类请求需在 X-CSRF-Token 头中带上该值
    pub csrf_token: String,
    pub expires_in: i64,
    pub user: User,
}

// 当前会话状态
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct SessionStatusResponse {
    pub logged_in: bool,
    pub user: Option<User>,
}

// 注册表单信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterFormResponse {
    pub roles: Vec<UserRole>,
}
