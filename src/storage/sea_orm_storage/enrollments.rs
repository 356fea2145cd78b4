use super::SeaOrmStorage;
use crate::entity::enrollments::Column;
use crate::entity::prelude::{EnrollmentActiveModel, Enrollments};
use crate::errors::{CourseSystemError, Result};
use crate::models::enrollments::entities::Enrollment;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 学生选课
    pub async fn enroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<Enrollment> {
        let model = EnrollmentActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("选课失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 判断学生是否已选该课程
    pub async fn is_student_enrolled_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let count = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{course, memory_storage, student, teacher};

    #[actix_web::test]
    async fn test_enroll_once_per_course() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "opettaja").await;
        let learner = student(&storage, "oppilas").await;
        let created = course(&storage, owner.id, "Ohjelmointi").await;

        assert!(!storage.is_student_enrolled_impl(created.id, learner.id).await.unwrap());

        let enrollment = storage.enroll_student_impl(created.id, learner.id).await.unwrap();
        assert_eq!(enrollment.course_id, created.id);
        assert_eq!(enrollment.student_id, learner.id);
        assert!(storage.is_student_enrolled_impl(created.id, learner.id).await.unwrap());

        // 唯一索引拒绝重复选课
        assert!(storage.enroll_student_impl(created.id, learner.id).await.is_err());
    }

    #[actix_web::test]
    async fn test_enroll_into_missing_course_fails() {
        let storage = memory_storage().await;
        let learner = student(&storage, "oppilas").await;

        assert!(storage.enroll_student_impl(9999, learner.id).await.is_err());
    }

    #[actix_web::test]
    async fn test_deleting_course_removes_enrollments() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "opettaja").await;
        let learner = student(&storage, "oppilas").await;
        let created = course(&storage, owner.id, "Ohjelmointi").await;
        storage.enroll_student_impl(created.id, learner.id).await.unwrap();

        storage.delete_course_impl(owner.id, created.id).await.unwrap();
        assert!(!storage.is_student_enrolled_impl(created.id, learner.id).await.unwrap());
    }
}
