use super::SeaOrmStorage;
use crate::entity::answers::Column as AnswerColumn;
use crate::entity::exercises::Column;
use crate::entity::prelude::{
    AnswerActiveModel, AnswerModel, Answers, ExerciseActiveModel, Exercises, UserModel, Users,
};
use crate::errors::{CourseSystemError, Result};
use crate::models::{
    exercises::{
        entities::{Answer, AnswerView, Exercise},
        requests::CreateExerciseRequest,
    },
    users::entities::full_name,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

fn into_answer_view((answer, student): (AnswerModel, Option<UserModel>)) -> AnswerView {
    let student_name = student
        .map(|s| {
            let name = full_name(s.first_name.as_deref(), s.last_name.as_deref());
            if name.is_empty() { s.username } else { name }
        })
        .unwrap_or_default();
    let answer = answer.into_answer();

    AnswerView {
        exercise_id: answer.exercise_id,
        student_id: answer.student_id,
        student_name,
        answer: answer.answer,
        is_correct: answer.is_correct,
        answered_at: answer.answered_at,
    }
}

impl SeaOrmStorage {
    /// 创建练习题
    pub async fn create_exercise_impl(
        &self,
        course_id: i64,
        req: CreateExerciseRequest,
    ) -> Result<Exercise> {
        let model = ExerciseActiveModel {
            course_id: Set(course_id),
            question: Set(req.question),
            correct_answer: Set(req.correct_answer),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("创建练习题失败: {e}")))?;

        Ok(result.into_exercise())
    }

    /// 通过 ID 获取练习题
    pub async fn get_exercise_impl(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        let result = Exercises::find_by_id(exercise_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询练习题失败: {e}")))?;

        Ok(result.map(|m| m.into_exercise()))
    }

    /// 列出课程的练习题（按创建顺序）
    pub async fn list_course_exercises_impl(&self, course_id: i64) -> Result<Vec<Exercise>> {
        let exercises = Exercises::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询练习题列表失败: {e}"))
            })?;

        Ok(exercises.into_iter().map(|m| m.into_exercise()).collect())
    }

    /// 删除练习题（级联删除答案）
    pub async fn delete_exercise_impl(&self, exercise_id: i64) -> Result<bool> {
        let result = Exercises::delete_by_id(exercise_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("删除练习题失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 保存学生答案
    pub async fn create_answer_impl(
        &self,
        exercise_id: i64,
        student_id: i64,
        answer: String,
        is_correct: bool,
    ) -> Result<Answer> {
        let model = AnswerActiveModel {
            exercise_id: Set(exercise_id),
            student_id: Set(student_id),
            answer: Set(answer),
            is_correct: Set(is_correct),
            answered_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("保存答案失败: {e}")))?;

        Ok(result.into_answer())
    }

    /// 获取学生对某题的答案
    pub async fn get_answer_impl(&self, exercise_id: i64, student_id: i64) -> Result<Option<Answer>> {
        let result = Answers::find()
            .filter(AnswerColumn::ExerciseId.eq(exercise_id))
            .filter(AnswerColumn::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询答案失败: {e}")))?;

        Ok(result.map(|m| m.into_answer()))
    }

    /// 课程全部练习题的 ID
    async fn course_exercise_ids(&self, course_id: i64) -> Result<Vec<i64>> {
        let exercises = Exercises::find()
            .filter(Column::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询练习题列表失败: {e}"))
            })?;

        Ok(exercises.into_iter().map(|m| m.id).collect())
    }

    /// 列出课程的全部答案（课程所有者可见）
    pub async fn list_course_answers_impl(&self, course_id: i64) -> Result<Vec<AnswerView>> {
        let exercise_ids = self.course_exercise_ids(course_id).await?;
        if exercise_ids.is_empty() {
            return Ok(Vec::new());
        }

        let answers = Answers::find()
            .filter(AnswerColumn::ExerciseId.is_in(exercise_ids))
            .find_also_related(Users)
            .order_by_asc(AnswerColumn::ExerciseId)
            .order_by_asc(AnswerColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询答案列表失败: {e}")))?;

        Ok(answers.into_iter().map(into_answer_view).collect())
    }

    /// 列出学生在某课程中的答案
    pub async fn list_student_course_answers_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<AnswerView>> {
        let exercise_ids = self.course_exercise_ids(course_id).await?;
        if exercise_ids.is_empty() {
            return Ok(Vec::new());
        }

        let answers = Answers::find()
            .filter(AnswerColumn::ExerciseId.is_in(exercise_ids))
            .filter(AnswerColumn::StudentId.eq(student_id))
            .find_also_related(Users)
            .order_by_asc(AnswerColumn::ExerciseId)
            .all(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询答案列表失败: {e}")))?;

        Ok(answers.into_iter().map(into_answer_view).collect())
    }

    /// 统计学生在某课程中答对的题数
    pub async fn count_correct_answers_impl(&self, student_id: i64, course_id: i64) -> Result<i64> {
        let exercise_ids = self.course_exercise_ids(course_id).await?;
        if exercise_ids.is_empty() {
            return Ok(0);
        }

        let count = Answers::find()
            .filter(AnswerColumn::ExerciseId.is_in(exercise_ids))
            .filter(AnswerColumn::StudentId.eq(student_id))
            .filter(AnswerColumn::IsCorrect.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("统计得分失败: {e}")))?;

        Ok(count as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{course, memory_storage, student, teacher, with_userinfo};
    use crate::models::exercises::requests::CreateExerciseRequest;

    fn question(question: &str, correct_answer: &str) -> CreateExerciseRequest {
        CreateExerciseRequest {
            question: question.to_string(),
            correct_answer: correct_answer.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_exercises_are_course_scoped() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "opettaja").await;
        let first = course(&storage, owner.id, "Eka").await;
        let second = course(&storage, owner.id, "Toka").await;

        storage
            .create_exercise_impl(first.id, question("1 + 1?", "2"))
            .await
            .unwrap();
        storage
            .create_exercise_impl(first.id, question("2 + 2?", "4"))
            .await
            .unwrap();
        storage
            .create_exercise_impl(second.id, question("3 + 3?", "6"))
            .await
            .unwrap();

        let listed = storage.list_course_exercises_impl(first.id).await.unwrap();
        let questions: Vec<_> = listed.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["1 + 1?", "2 + 2?"]);
    }

    #[actix_web::test]
    async fn test_answers_and_points() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "opettaja").await;
        let learner = with_userinfo(&storage, &student(&storage, "oppilas").await).await;
        let other = student(&storage, "toinen").await;
        let created = course(&storage, owner.id, "Matikka").await;

        let one = storage
            .create_exercise_impl(created.id, question("1 + 1?", "2"))
            .await
            .unwrap();
        let two = storage
            .create_exercise_impl(created.id, question("2 + 2?", "4"))
            .await
            .unwrap();

        storage
            .create_answer_impl(one.id, learner.id, "2".to_string(), true)
            .await
            .unwrap();
        storage
            .create_answer_impl(two.id, learner.id, "5".to_string(), false)
            .await
            .unwrap();
        storage
            .create_answer_impl(one.id, other.id, "2".to_string(), true)
            .await
            .unwrap();

        // 同一题不能重复作答
        assert!(
            storage
                .create_answer_impl(one.id, learner.id, "2".to_string(), true)
                .await
                .is_err()
        );

        assert_eq!(
            storage.count_correct_answers_impl(learner.id, created.id).await.unwrap(),
            1
        );

        let own = storage
            .list_student_course_answers_impl(learner.id, created.id)
            .await
            .unwrap();
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|a| a.student_name == "Etu oppilas"));

        let all = storage.list_course_answers_impl(created.id).await.unwrap();
        assert_eq!(all.len(), 3);
        // 未填写资料的学生以用户名显示
        assert!(all.iter().any(|a| a.student_name == "toinen"));

        let fetched = storage.get_answer_impl(two.id, learner.id).await.unwrap().unwrap();
        assert!(!fetched.is_correct);
        assert!(storage.get_answer_impl(two.id, other.id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_delete_exercise_removes_answers() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "opettaja").await;
        let learner = student(&storage, "oppilas").await;
        let created = course(&storage, owner.id, "Matikka").await;
        let exercise = storage
            .create_exercise_impl(created.id, question("1 + 1?", "2"))
            .await
            .unwrap();
        storage
            .create_answer_impl(exercise.id, learner.id, "2".to_string(), true)
            .await
            .unwrap();

        assert!(storage.delete_exercise_impl(exercise.id).await.unwrap());
        assert!(storage.get_exercise_impl(exercise.id).await.unwrap().is_none());
        assert!(storage.list_course_answers_impl(created.id).await.unwrap().is_empty());
        assert_eq!(
            storage.count_correct_answers_impl(learner.id, created.id).await.unwrap(),
            0
        );
    }
}
