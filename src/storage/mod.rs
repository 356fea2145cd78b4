use std::sync::Arc;

use crate::models::{
    courses::{
        entities::{Course, CourseDetail, CourseSummary},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::entities::Enrollment,
    exercises::{
        entities::{Answer, AnswerView, Exercise},
        requests::CreateExerciseRequest,
    },
    materials::{entities::Material, requests::CreateMaterialRequest},
    users::{
        entities::{User, UserProfile},
        requests::CreateUserRequest,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 保存用户资料（姓名、学号）
    async fn save_user_info(&self, id: i64, profile: UserProfile) -> Result<Option<User>>;
    // 使该用户已签发的会话全部失效
    async fn bump_token_version(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 删除用户（级联删除其课程、选课与答案）
    async fn delete_user(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course(&self, course_id: i64) -> Result<Option<Course>>;
    // 获取课程及教师姓名
    async fn get_course_detail(&self, course_id: i64) -> Result<Option<CourseDetail>>;
    // 分页列出全部课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 列出教师负责的课程
    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<CourseSummary>>;
    // 列出学生已选的课程
    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<CourseSummary>>;
    // 更新课程（仅限所有者）
    async fn update_course(
        &self,
        teacher_id: i64,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程（仅限所有者）
    async fn delete_course(&self, teacher_id: i64, course_id: i64) -> Result<bool>;
    // 判断用户是否为课程所有者
    async fn is_course_owner(&self, user_id: i64, course_id: i64) -> Result<bool>;

    /// 选课方法
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment>;
    async fn is_student_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool>;

    /// 练习题方法
    async fn create_exercise(
        &self,
        course_id: i64,
        exercise: CreateExerciseRequest,
    ) -> Result<Exercise>;
    async fn get_exercise(&self, exercise_id: i64) -> Result<Option<Exercise>>;
    async fn list_course_exercises(&self, course_id: i64) -> Result<Vec<Exercise>>;
    async fn delete_exercise(&self, exercise_id: i64) -> Result<bool>;
    async fn create_answer(
        &self,
        exercise_id: i64,
        student_id: i64,
        answer: String,
        is_correct: bool,
    ) -> Result<Answer>;
    async fn get_answer(&self, exercise_id: i64, student_id: i64) -> Result<Option<Answer>>;
    // 课程全部答案（教师查看）
    async fn list_course_answers(&self, course_id: i64) -> Result<Vec<AnswerView>>;
    // 学生在课程中的答案
    async fn list_student_course_answers(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<AnswerView>>;
    // 学生在课程中的得分（正确答案数）
    async fn count_correct_answers(&self, student_id: i64, course_id: i64) -> Result<i64>;

    /// 课程材料方法
    async fn create_material(
        &self,
        course_id: i64,
        material: CreateMaterialRequest,
    ) -> Result<Material>;
    async fn get_material(&self, material_id: i64) -> Result<Option<Material>>;
    async fn list_course_materials(&self, course_id: i64) -> Result<Vec<Material>>;
    async fn delete_material(&self, material_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
