use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::courses::requests::{CourseFormRequest, CreateCourseRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{USERINFO_MISSING, fresh_user, rejected, validation_failed};
use crate::utils::validate::validate_course_form;

// 教师必须先填写资料才能开课
pub async fn add_course_form(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match fresh_user(&storage, request).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if !user.has_userinfo() {
        return Ok(rejected(
            ErrorCode::UserInfoMissing,
            vec![USERINFO_MISSING.to_string()],
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Lisää kurssi")))
}

pub async fn add_course(
    service: &CourseService,
    request: &HttpRequest,
    form: CourseFormRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match fresh_user(&storage, request).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if !user.has_userinfo() {
        return Ok(rejected(
            ErrorCode::UserInfoMissing,
            vec![USERINFO_MISSING.to_string()],
        ));
    }

    let errors = validate_course_form(&form.course_name, &form.description);
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    let create_request = CreateCourseRequest {
        teacher_id: user.id,
        name: form.course_name,
        description: form.description,
    };

    match storage.create_course(create_request).await {
        Ok(course) => {
            info!("Course {} created by teacher {}", course.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "Kurssi lisätty.")))
        }
        Err(e) => {
            error!("Failed to create course for {}: {}", user.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::CourseCreationFailed,
                    "Kurssin lisäys ei onnistunut.",
                )),
            )
        }
    }
}
