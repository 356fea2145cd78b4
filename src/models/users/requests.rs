use super::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

// 注册请求（来自HTTP请求，角色在服务层校验）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

// 用户创建请求（用于存储层，密码已哈希）
#[derive(Debug)]
pub struct CreateUserRequest {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
}

// 用户资料保存请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct SaveUserInfoRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub student_number: Option<String>,
}
