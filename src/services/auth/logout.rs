use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, drop_cached_session};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 处理用户登出
/// 令牌版本加一使该用户已签发的令牌全部失效，并清除客户端的会话 cookie
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(e) = storage.bump_token_version(user.id).await {
        error!("Failed to revoke sessions of user {}: {}", user.id, e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::LogoutFailed,
                "Uloskirjautuminen epäonnistui.",
            )),
        );
    }

    drop_cached_session(request).await;
    info!("User {} logged out", user.username);

    // max_age=0 会让浏览器删除该 cookie
    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_session_cookie())
        .json(ApiResponse::<()>::success_empty("Olet kirjautunut ulos.")))
}
