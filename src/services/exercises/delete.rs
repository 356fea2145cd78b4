use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{ExerciseService, exercise_not_found};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, require_course_owner};

pub async fn delete_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    exercise_id: i64,
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

    if let Err(resp) = require_course_owner(
        &storage,
        user.id,
        exercise.course_id,
        "Vain kurssin opettaja voi poistaa tehtäviä!",
    )
    .await
    {
        return Ok(resp);
    }

    match storage.delete_exercise(exercise_id).await {
        Ok(true) => {
            info!("Exercise {} deleted by {}", exercise_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Tehtävä poistettu.")))
        }
        Ok(false) => Ok(exercise_not_found()),
        Err(e) => {
            error!("Failed to delete exercise {}: {}", exercise_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExerciseDeleteFailed,
                    "Tehtävän poistaminen ei onnistunut.",
                )),
            )
        }
    }
}
