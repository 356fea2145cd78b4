use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use super::CourseService;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::courses::entities::CourseDetail;
use crate::models::courses::responses::CoursePageResponse;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::storage::Storage;

pub async fn course_page(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    // 访客也可以查看课程主页
    let viewer = RequireJWT::extract_user_claims(request);

    let detail = match storage.get_course_detail(course_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Kurssitietoja ei löytynyt.",
            )));
        }
        Err(e) => {
            error!("Failed to load course {}: {}", course_id, e);
            return Ok(internal_error());
        }
    };

    match build_page(&storage, detail, viewer.as_ref()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Kurssisivu"))),
        Err(e) => {
            error!("Failed to build course page {}: {}", course_id, e);
            Ok(internal_error())
        }
    }
}

async fn build_page(
    storage: &Arc<dyn Storage>,
    detail: CourseDetail,
    viewer: Option<&User>,
) -> Result<CoursePageResponse> {
    let course = detail.course;
    let owner = viewer.is_some_and(|u| course.is_owned_by(u.id));

    let enrolled = match viewer {
        Some(user) if user.role == UserRole::Student => {
            storage.is_student_enrolled(course.id, user.id).await?
        }
        _ => false,
    };

    // 正确答案只对课程所有者可见
    let exercise_list = storage
        .list_course_exercises(course.id)
        .await?
        .into_iter()
        .map(|e| e.into_view(owner))
        .collect();

    let (answers, points) = match viewer {
        Some(_) if owner => (storage.list_course_answers(course.id).await?, 0),
        Some(user) if enrolled => (
            storage
                .list_student_course_answers(user.id, course.id)
                .await?,
            storage.count_correct_answers(user.id, course.id).await?,
        ),
        _ => (Vec::new(), 0),
    };

    let materials = storage.list_course_materials(course.id).await?;

    Ok(CoursePageResponse {
        id: course.id,
        course_name: course.name,
        description: course.description,
        teacher: detail.teacher_name,
        enrolled,
        owner,
        exercise_list,
        answers,
        points,
        materials,
    })
}
