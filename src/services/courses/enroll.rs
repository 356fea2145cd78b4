use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::courses::responses::EnrollFormResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{USERINFO_MISSING, fresh_user, internal_error, rejected};

const COURSE_NOT_FOUND: &str = "Kurssia ei löytynyt.";

fn course_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::CourseNotFound,
        COURSE_NOT_FOUND,
    ))
}

pub async fn enroll_form(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course(course_id).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EnrollFormResponse {
                course_id: course.id,
                course_name: course.name,
            },
            "Ilmoittaudu kurssille",
        ))),
        Ok(None) => Ok(course_not_found()),
        Err(e) => {
            error!("Failed to load course {}: {}", course_id, e);
            Ok(internal_error())
        }
    }
}

pub async fn enroll(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match fresh_user(&storage, request).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match storage.get_course(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(course_not_found()),
        Err(e) => {
            error!("Failed to load course {}: {}", course_id, e);
            return Ok(internal_error());
        }
    }

    // 按顺序收集全部拒绝原因
    let mut errors = Vec::new();
    if user.role != UserRole::Student {
        errors.push("Vain opiskelijat voivat ilmoittautua kursseille.".to_string());
    }
    if !user.has_userinfo() {
        errors.push(USERINFO_MISSING.to_string());
    }
    match storage.is_student_enrolled(course_id, user.id).await {
        Ok(true) => errors.push("Olet jo ilmoittautunut kurssille!".to_string()),
        Ok(false) => {}
        Err(e) => {
            error!("Failed to check enrollment of {}: {}", user.id, e);
            return Ok(internal_error());
        }
    }
    if !errors.is_empty() {
        return Ok(rejected(ErrorCode::EnrollmentRejected, errors));
    }

    match storage.enroll_student(course_id, user.id).await {
        Ok(enrollment) => {
            info!("Student {} enrolled on course {}", user.id, course_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(enrollment, "Ilmoittautuminen onnistui.")))
        }
        Err(e) => {
            error!("Failed to enroll {} on {}: {}", user.id, course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EnrollmentFailed,
                    "Ilmoittautuminen epäonnistui.",
                )),
            )
        }
    }
}
