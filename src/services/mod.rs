pub mod auth;
pub mod courses;
pub mod exercises;
pub mod materials;
pub mod users;

pub use auth::AuthService;
pub use courses::CourseService;
pub use exercises::ExerciseService;
pub use materials::MaterialService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode, ValidationErrors};
use crate::storage::Storage;

pub(crate) const USERINFO_MISSING: &str = "Täydennä ensin käyttäjätietosi!";

/// 当前登录用户；中间件未放入用户时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Kirjaudu ensin sisään.",
        ))
    })
}

/// 从存储重新读取当前用户，避免使用缓存中过期的资料
pub(crate) async fn fresh_user(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<User, HttpResponse> {
    let user = current_user(request)?;
    match storage.get_user_by_id(user.id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Käyttäjää ei löytynyt.",
        ))),
        Err(e) => {
            error!("Failed to reload user {}: {}", user.id, e);
            Err(internal_error())
        }
    }
}

/// 业务规则拒绝请求，返回 400 与全部原因
pub(crate) fn rejected(code: ErrorCode, error_messages: Vec<String>) -> HttpResponse {
    let message = error_messages.first().cloned().unwrap_or_default();
    HttpResponse::BadRequest().json(ApiResponse::error(
        code,
        ValidationErrors { error_messages },
        message,
    ))
}

/// 表单字段校验失败
pub(crate) fn validation_failed(error_messages: Vec<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::validation(error_messages))
}

pub(crate) fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        "Palvelinvirhe. Yritä myöhemmin uudelleen.",
    ))
}

/// 丢弃当前用户的会话缓存，其所有令牌下次请求时重新校验
pub(crate) async fn drop_cached_session(request: &HttpRequest) {
    let Some(session) = RequireJWT::extract_session(request) else {
        return;
    };
    if let Some(cache) = request.app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>() {
        cache.remove(&session.cache_key()).await;
    }
}

/// 仅课程所有者可继续；课程不存在同样视为无权限
pub(crate) async fn require_course_owner(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    course_id: i64,
    denied_message: &str,
) -> Result<(), HttpResponse> {
    match storage.is_course_owner(user_id, course_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            denied_message,
        ))),
        Err(e) => {
            error!("Failed to check owner of course {}: {}", course_id, e);
            Err(internal_error())
        }
    }
}
