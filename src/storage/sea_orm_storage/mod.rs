//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod enrollments;
mod exercises;
mod materials;
mod users;

use crate::config::AppConfig;
use crate::errors::{CourseSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 按给定 URL 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", redact_database_url(&db_url));

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存数据库每个连接都是独立的库，只能保留一个常驻连接
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .connect_with(opt)
            .await
            .map_err(|e| CourseSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 日志中隐藏连接串里的密码
fn redact_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn save_user_info(&self, id: i64, profile: UserProfile) -> Result<Option<User>> {
        self.save_user_info_impl(id, profile).await
    }

    async fn bump_token_version(&self, id: i64) -> Result<bool> {
        self.bump_token_version_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_impl(course_id).await
    }

    async fn get_course_detail(&self, course_id: i64) -> Result<Option<CourseDetail>> {
        self.get_course_detail_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<CourseSummary>> {
        self.list_teacher_courses_impl(teacher_id).await
    }

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<CourseSummary>> {
        self.list_student_courses_impl(student_id).await
    }

    async fn update_course(
        &self,
        teacher_id: i64,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(teacher_id, course_id, update).await
    }

    async fn delete_course(&self, teacher_id: i64, course_id: i64) -> Result<bool> {
        self.delete_course_impl(teacher_id, course_id).await
    }

    async fn is_course_owner(&self, user_id: i64, course_id: i64) -> Result<bool> {
        self.is_course_owner_impl(user_id, course_id).await
    }

    // 选课模块
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(course_id, student_id).await
    }

    async fn is_student_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(course_id, student_id).await
    }

    // 练习题模块
    async fn create_exercise(
        &self,
        course_id: i64,
        exercise: CreateExerciseRequest,
    ) -> Result<Exercise> {
        self.create_exercise_impl(course_id, exercise).await
    }

    async fn get_exercise(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        self.get_exercise_impl(exercise_id).await
    }

    async fn list_course_exercises(&self, course_id: i64) -> Result<Vec<Exercise>> {
        self.list_course_exercises_impl(course_id).await
    }

    async fn delete_exercise(&self, exercise_id: i64) -> Result<bool> {
        self.delete_exercise_impl(exercise_id).await
    }

    async fn create_answer(
        &self,
        exercise_id: i64,
        student_id: i64,
        answer: String,
        is_correct: bool,
    ) -> Result<Answer> {
        self.create_answer_impl(exercise_id, student_id, answer, is_correct)
            .await
    }

    async fn get_answer(&self, exercise_id: i64, student_id: i64) -> Result<Option<Answer>> {
        self.get_answer_impl(exercise_id, student_id).await
    }

    async fn list_course_answers(&self, course_id: i64) -> Result<Vec<AnswerView>> {
        self.list_course_answers_impl(course_id).await
    }

    async fn list_student_course_answers(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<AnswerView>> {
        self.list_student_course_answers_impl(student_id, course_id)
            .await
    }

    async fn count_correct_answers(&self, student_id: i64, course_id: i64) -> Result<i64> {
        self.count_correct_answers_impl(student_id, course_id).await
    }

    // 课程材料模块
    async fn create_material(
        &self,
        course_id: i64,
        material: CreateMaterialRequest,
    ) -> Result<Material> {
        self.create_material_impl(course_id, material).await
    }

    async fn get_material(&self, material_id: i64) -> Result<Option<Material>> {
        self.get_material_impl(material_id).await
    }

    async fn list_course_materials(&self, course_id: i64) -> Result<Vec<Material>> {
        self.list_course_materials_impl(course_id).await
    }

    async fn delete_material(&self, material_id: i64) -> Result<bool> {
        self.delete_material_impl(material_id).await
    }
}
