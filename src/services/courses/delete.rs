use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, require_course_owner};

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
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
        "Vain kurssin opettaja voi poistaa kurssin!",
    )
    .await
    {
        return Ok(resp);
    }

    let deleted = match storage.delete_course(user.id, course_id).await {
        Ok(deleted) => deleted,
        Err(e) => {
            error!("Failed to delete course {}: {}", course_id, e);
            false
        }
    };

    if deleted {
        info!("Course {} deleted by teacher {}", course_id, user.id);
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Kurssi poistettu.")))
    } else {
        warn!("Course {} was not deleted", course_id);
        Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::CourseDeleteFailed,
                "Kurssin poistaminen ei onnistunut.",
            )),
        )
    }
}
