pub mod auth;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod exercises;
pub mod materials;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery, ValidationErrors,
};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
