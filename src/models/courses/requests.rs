use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 课程表单（新增与修改共用）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseFormRequest {
    pub course_name: String,
    pub description: String,
}

// 创建课程请求（用于存储层）
#[derive(Debug)]
pub struct CreateCourseRequest {
    pub teacher_id: i64,
    pub name: String,
    pub description: String,
}

// 更新课程请求（用于存储层）
#[derive(Debug)]
pub struct UpdateCourseRequest {
    pub name: String,
    pub description: String,
}

// 课程列表查询参数（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl From<CourseQueryParams> for CourseListQuery {
    fn from(params: CourseQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
        }
    }
}
