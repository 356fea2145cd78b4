use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::models::courses::requests::CourseQueryParams;
use crate::models::courses::responses::HomepageResponse;
use crate::models::users::entities::UserRole;
use crate::models::ApiResponse;
use crate::services::{current_user, internal_error};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_courses_with_pagination(query.into()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Kurssit"))),
        Err(e) => {
            error!("Failed to list courses: {}", e);
            Ok(internal_error())
        }
    }
}

pub async fn homepage(service: &CourseService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let courses = match user.role {
        UserRole::Teacher => storage.list_teacher_courses(user.id).await,
        UserRole::Student => storage.list_student_courses(user.id).await,
    };

    match courses {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            HomepageResponse { items },
            "Omat kurssit",
        ))),
        Err(e) => {
            error!("Failed to list homepage courses of {}: {}", user.id, e);
            Ok(internal_error())
        }
    }
}
