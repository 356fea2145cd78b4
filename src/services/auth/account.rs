use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, drop_cached_session};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 删除当前用户；其课程、选课记录与答案随之级联删除
pub async fn handle_delete_account(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_user(user.id).await {
        Ok(true) => {
            drop_cached_session(request).await;
            info!("User {} deleted their account", user.username);
            Ok(HttpResponse::Ok()
                .cookie(JwtUtils::create_empty_session_cookie())
                .json(ApiResponse::<()>::success_empty("Käyttäjätili on poistettu.")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Käyttäjää ei löytynyt.",
        ))),
        Err(e) => {
            error!("Failed to delete user {}: {}", user.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserDeleteFailed,
                    "Käyttäjätilin poistaminen epäonnistui.",
                )),
            )
        }
    }
}
