use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ExerciseService;
use crate::models::exercises::requests::CreateExerciseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, require_course_owner, validation_failed};
use crate::utils::validate::validate_exercise_form;

pub async fn add_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    course_id: i64,
    exercise: CreateExerciseRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = require_course_owner(
        &storage,
        user.id,
        course_id,
        "Vain kurssin opettaja voi lisätä tehtäviä!",
    )
    .await
    {
        return Ok(resp);
    }

    let errors = validate_exercise_form(&exercise.question, &exercise.correct_answer);
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    match storage.create_exercise(course_id, exercise).await {
        Ok(exercise) => {
            info!("Exercise {} added to course {}", exercise.id, course_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(exercise, "Tehtävä lisätty.")))
        }
        Err(e) => {
            error!("Failed to add exercise to course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExerciseCreationFailed,
                    "Tehtävän lisäys ei onnistunut.",
                )),
            )
        }
    }
}
