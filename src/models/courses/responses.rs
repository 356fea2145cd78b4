use super::entities::{Course, CourseSummary};
use crate::models::common::PaginatedResponse;
use crate::models::exercises::entities::{AnswerView, ExerciseView};
use crate::models::materials::entities::Material;
use serde::Serialize;
use ts_rs::TS;

// 课程列表响应
pub type CourseListResponse = PaginatedResponse<CourseSummary>;

// 用户主页：教师看到自己的课程，学生看到已选课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct HomepageResponse {
    pub items: Vec<CourseSummary>,
}

// 选课确认页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct EnrollFormResponse {
    pub course_id: i64,
    pub course_name: String,
}

// 课程修改表单
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseFormResponse {
    pub course_id: i64,
    pub course_name: String,
    pub description: String,
}

impl From<Course> for CourseFormResponse {
    fn from(course: Course) -> Self {
        Self {
            course_id: course.id,
            course_name: course.name,
            description: course.description,
        }
    }
}

// 课程主页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CoursePageResponse {
    pub id: i64,
    pub course_name: String,
    pub description: String,
    pub teacher: String,
    pub enrolled: bool,
    pub owner: bool,
    pub exercise_list: Vec<ExerciseView>,
    pub answers: Vec<AnswerView>,
    pub points: i64,
    pub materials: Vec<Material>,
}
