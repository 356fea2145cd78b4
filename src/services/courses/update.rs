use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::errors::Result;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{CourseFormRequest, UpdateCourseRequest};
use crate::models::courses::responses::CourseFormResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, require_course_owner, validation_failed};
use crate::utils::validate::validate_course_form;

const NOT_OWNER: &str = "Vain kurssin opettaja voi muokata kurssitietoja!";

fn course_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::CourseNotFound,
        "Kurssia ei löytynyt tietokannasta",
    ))
}

pub async fn update_course_form(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = require_course_owner(&storage, user.id, course_id, NOT_OWNER).await {
        return Ok(resp);
    }

    match storage.get_course(course_id).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseFormResponse::from(course),
            "Muokkaa kurssia",
        ))),
        Ok(None) => Ok(course_not_found()),
        Err(e) => {
            error!("Failed to load course {}: {}", course_id, e);
            Ok(internal_error())
        }
    }
}

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    form: CourseFormRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = require_course_owner(&storage, user.id, course_id, NOT_OWNER).await {
        return Ok(resp);
    }

    let errors = validate_course_form(&form.course_name, &form.description);
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    let update = UpdateCourseRequest {
        name: form.course_name,
        description: form.description,
    };

    let result = storage.update_course(user.id, course_id, update).await;
    Ok(update_response(course_id, user.id, result))
}

// 所有者检查之后仍未更新到行，同样按更新失败处理
fn update_response(
    course_id: i64,
    teacher_id: i64,
    result: Result<Option<Course>>,
) -> HttpResponse {
    match result {
        Ok(Some(course)) => {
            info!("Course {} updated by teacher {}", course_id, teacher_id);
            HttpResponse::Ok().json(ApiResponse::success(course, "Kurssitiedot päivitetty."))
        }
        Ok(None) => {
            error!("Course {} vanished before update by {}", course_id, teacher_id);
            update_failed()
        }
        Err(e) => {
            error!("Failed to update course {}: {}", course_id, e);
            update_failed()
        }
    }
}

fn update_failed() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::CourseUpdateFailed,
        "Kurssin päivitys ei onnistunut.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CourseSystemError;
    use actix_web::{body::to_bytes, http::StatusCode};

    async fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_missing_row_after_owner_check_is_update_failure() {
        let resp = update_response(7, 1, Ok(None));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::CourseUpdateFailed as i32);
        assert_eq!(body["message"], "Kurssin päivitys ei onnistunut.");
    }

    #[actix_web::test]
    async fn test_storage_error_is_update_failure() {
        let resp = update_response(
            7,
            1,
            Err(CourseSystemError::database_operation("yhteys katkesi")),
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::CourseUpdateFailed as i32);
    }
}
