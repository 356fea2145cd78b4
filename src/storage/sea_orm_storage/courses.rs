use super::SeaOrmStorage;
use crate::entity::courses::Column;
use crate::entity::enrollments::Column as EnrollmentColumn;
use crate::entity::prelude::{CourseActiveModel, CourseModel, Courses, Enrollments, UserModel, Users};
use crate::errors::{CourseSystemError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, CourseDetail, CourseSummary},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    users::entities::full_name,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

// 课程与其教师拼成列表项
fn into_summary((course, teacher): (CourseModel, Option<UserModel>)) -> CourseSummary {
    let teacher_name = teacher
        .map(|t| full_name(t.first_name.as_deref(), t.last_name.as_deref()))
        .unwrap_or_default();

    CourseSummary {
        id: course.id,
        name: course.name,
        teacher_name,
    }
}

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = CourseActiveModel {
            teacher_id: Set(req.teacher_id),
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 获取课程及教师姓名
    pub async fn get_course_detail_impl(&self, course_id: i64) -> Result<Option<CourseDetail>> {
        let result = Courses::find_by_id(course_id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询课程详情失败: {e}")))?;

        Ok(result.map(|(course, teacher)| CourseDetail {
            teacher_name: teacher
                .map(|t| full_name(t.first_name.as_deref(), t.last_name.as_deref()))
                .unwrap_or_default(),
            course: course.into_course(),
        }))
    }

    /// 分页列出全部课程（最新的在前）
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let select = Courses::find()
            .find_also_related(Users)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询课程页数失败: {e}")))?;

        // 超出范围的页码直接返回空列表，偏移量 page_size * page 可能溢出
        let courses = if page > pages {
            Vec::new()
        } else {
            paginator
                .fetch_page(page - 1)
                .await
                .map_err(|e| {
                    CourseSystemError::database_operation(format!("查询课程列表失败: {e}"))
                })?
        };

        Ok(CourseListResponse {
            items: courses.into_iter().map(into_summary).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出教师自己的课程
    pub async fn list_teacher_courses_impl(&self, teacher_id: i64) -> Result<Vec<CourseSummary>> {
        let courses = Courses::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .find_also_related(Users)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询教师课程失败: {e}")))?;

        Ok(courses.into_iter().map(into_summary).collect())
    }

    /// 列出学生已选的课程
    pub async fn list_student_courses_impl(&self, student_id: i64) -> Result<Vec<CourseSummary>> {
        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        if enrollments.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<i64> = enrollments.iter().map(|e| e.course_id).collect();

        let courses = Courses::find()
            .filter(Column::Id.is_in(course_ids))
            .find_also_related(Users)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询学生课程失败: {e}")))?;

        Ok(courses.into_iter().map(into_summary).collect())
    }

    /// 更新课程（仅限课程所有者）
    pub async fn update_course_impl(
        &self,
        teacher_id: i64,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let result = Courses::update_many()
            .col_expr(Column::Name, sea_orm::sea_query::Expr::value(update.name))
            .col_expr(
                Column::Description,
                sea_orm::sea_query::Expr::value(update.description),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(course_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("更新课程失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_course_impl(course_id).await
    }

    /// 删除课程（仅限课程所有者，级联删除选课、练习与材料）
    pub async fn delete_course_impl(&self, teacher_id: i64, course_id: i64) -> Result<bool> {
        let result = Courses::delete_many()
            .filter(Column::Id.eq(course_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 判断用户是否为课程所有者
    pub async fn is_course_owner_impl(&self, user_id: i64, course_id: i64) -> Result<bool> {
        let count = Courses::find()
            .filter(Column::Id.eq(course_id))
            .filter(Column::TeacherId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询课程所有者失败: {e}")))?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{course, memory_storage, student, teacher, with_userinfo};
    use crate::models::courses::requests::{CourseListQuery, UpdateCourseRequest};

    #[actix_web::test]
    async fn test_course_detail_includes_teacher_name() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "opettaja").await;
        with_userinfo(&storage, &owner).await;
        let created = course(&storage, owner.id, "Ohjelmointi").await;

        let detail = storage
            .get_course_detail_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.course.name, "Ohjelmointi");
        assert_eq!(detail.teacher_name, "Etu opettaja");

        assert!(storage.get_course_detail_impl(9999).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_list_courses_newest_first_with_pagination() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "opettaja").await;
        for name in ["Eka", "Toka", "Kolmas"] {
            course(&storage, owner.id, name).await;
        }

        let page = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                page: Some(1),
                size: Some(2),
            })
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
        let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Kolmas", "Toka"]);

        let clamped = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                page: Some(0),
                size: Some(1000),
            })
            .await
            .unwrap();
        assert_eq!(clamped.pagination.page, 1);
        assert_eq!(clamped.pagination.page_size, 100);
        assert_eq!(clamped.items.len(), 3);
    }

    #[actix_web::test]
    async fn test_homepage_lists() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "opettaja").await;
        let other = teacher(&storage, "toinen").await;
        let learner = student(&storage, "oppilas").await;

        let mine = course(&storage, owner.id, "Oma").await;
        let theirs = course(&storage, other.id, "Vieras").await;

        let owned = storage.list_teacher_courses_impl(owner.id).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, mine.id);

        assert!(storage.list_student_courses_impl(learner.id).await.unwrap().is_empty());
        storage.enroll_student_impl(theirs.id, learner.id).await.unwrap();
        let enrolled = storage.list_student_courses_impl(learner.id).await.unwrap();
        assert_eq!(enrolled.len(), 1);
        assert_eq!(enrolled[0].id, theirs.id);
    }

    #[actix_web::test]
    async fn test_update_and_delete_require_owner() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "opettaja").await;
        let other = teacher(&storage, "toinen").await;
        let created = course(&storage, owner.id, "Ohjelmointi").await;

        assert!(storage.is_course_owner_impl(owner.id, created.id).await.unwrap());
        assert!(!storage.is_course_owner_impl(other.id, created.id).await.unwrap());
        assert!(!storage.is_course_owner_impl(owner.id, 9999).await.unwrap());

        let rejected = storage
            .update_course_impl(
                other.id,
                created.id,
                UpdateCourseRequest {
                    name: "Kaapattu".to_string(),
                    description: "x".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(rejected.is_none());

        let updated = storage
            .update_course_impl(
                owner.id,
                created.id,
                UpdateCourseRequest {
                    name: "Tietorakenteet".to_string(),
                    description: "Uusi kuvaus".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Tietorakenteet");
        assert_eq!(updated.description, "Uusi kuvaus");

        assert!(!storage.delete_course_impl(other.id, created.id).await.unwrap());
        assert!(storage.delete_course_impl(owner.id, created.id).await.unwrap());
        assert!(storage.get_course_impl(created.id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_deleting_teacher_removes_courses() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "opettaja").await;
        let created = course(&storage, owner.id, "Ohjelmointi").await;

        storage.delete_user_impl(owner.id).await.unwrap();
        assert!(storage.get_course_impl(created.id).await.unwrap().is_none());
    }
}
