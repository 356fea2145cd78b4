use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ExerciseService, exercise_not_found};
use crate::models::exercises::{requests::AnswerRequest, responses::AnswerResponse};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, validation_failed};
use crate::utils::validate::validate_answer;

pub async fn answer_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    exercise_id: i64,
    answer: AnswerRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let exercise = match storage.get_exercise(exercise_id).await {
        Ok(Some(exercise)) => exercise,
        Ok(None) => return Ok(exercise_not_found()),
        Err(e) => {
            error!("Failed to load exercise {}: {}", exercise_id, e);
            return Ok(internal_error());
        }
    };

    // 只有已选课的学生可以作答
    let enrolled = user.role == UserRole::Student
        && match storage.is_student_enrolled(exercise.course_id, user.id).await {
            Ok(enrolled) => enrolled,
            Err(e) => {
                error!("Failed to check enrollment of {}: {}", user.id, e);
                return Ok(internal_error());
            }
        };
    if !enrolled {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "Vain kurssille ilmoittautuneet voivat vastata tehtäviin.",
        )));
    }

    if let Err(msg) = validate_answer(&answer.answer) {
        return Ok(validation_failed(vec![msg.to_string()]));
    }

    match storage.get_answer(exercise_id, user.id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AlreadyAnswered,
                "Olet jo vastannut tähän tehtävään.",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to load answer of {}: {}", user.id, e);
            return Ok(internal_error());
        }
    }

    let is_correct = exercise.is_correct(&answer.answer);
    match storage
        .create_answer(exercise_id, user.id, answer.answer, is_correct)
        .await
    {
        Ok(answer) => {
            info!(
                "Student {} answered exercise {} (correct: {})",
                user.id, exercise_id, is_correct
            );
            let message = if is_correct {
                "Oikein!"
            } else {
                "Väärin."
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(
                AnswerResponse { is_correct, answer },
                message,
            )))
        }
        Err(e) => {
            error!("Failed to save answer of {}: {}", user.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::AnswerFailed,
                    "Vastauksen tallennus ei onnistunut.",
                )),
            )
        }
    }
}
