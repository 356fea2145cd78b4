pub mod answer;
pub mod create;
pub mod delete;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exercises::requests::{AnswerRequest, CreateExerciseRequest};
use crate::storage::Storage;

pub struct ExerciseService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExerciseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 课程所有者新增练习题
    pub async fn add_exercise(
        &self,
        request: &HttpRequest,
        course_id: i64,
        exercise: CreateExerciseRequest,
    ) -> ActixResult<HttpResponse> {
        create::add_exercise(self, request, course_id, exercise).await
    }

    // 已选课学生作答
    pub async fn answer(
        &self,
        request: &HttpRequest,
        exercise_id: i64,
        answer: AnswerRequest,
    ) -> ActixResult<HttpResponse> {
        answer::answer_exercise(self, request, exercise_id, answer).await
    }

    pub async fn delete_exercise(
        &self,
        request: &HttpRequest,
        exercise_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exercise(self, request, exercise_id).await
    }
}

fn exercise_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(crate::models::ApiResponse::error_empty(
        crate::models::ErrorCode::ExerciseNotFound,
        "Tehtävää ei löytynyt.",
    ))
}
