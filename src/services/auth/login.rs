use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse, responses::SessionStatusResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

const LOGIN_FAILED: &str = "Väärä käyttäjätunnus tai salasana.";

pub async fn handle_login_status(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user_claims(request);
    let response = SessionStatusResponse {
        logged_in: user.is_some(),
        user,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Istunnon tila")))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 根据用户名获取用户信息
    let user = match storage.get_user_by_username(&login_request.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::AuthFailed, LOGIN_FAILED)));
        }
        Err(e) => {
            error!("Login lookup failed for {}: {}", login_request.username, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Kirjautuminen epäonnistui.",
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        info!("Wrong password for user {}", user.username);
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::AuthFailed, LOGIN_FAILED)));
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        error!("Failed to update last login for {}: {}", user.id, e);
    }

    // 4. 签发会话令牌
    let duration = JwtUtils::session_duration(login_request.remember_me);
    let session = match JwtUtils::generate_session_token(
        user.id,
        &user.role.to_string(),
        user.token_version,
        duration,
    ) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to generate session token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Kirjautuminen epäonnistui.",
                )),
            );
        }
    };

    info!(
        "User {} logged in successfully (remember_me: {}, cookie: {})",
        user.username, login_request.remember_me, config.jwt.cookie_name
    );

    let cookie = JwtUtils::create_session_cookie(&session.token, duration);
    let response = LoginResponse {
        access_token: session.token,
        csrf_token: session.csrf_token,
        expires_in: session.expires_in,
        user,
    };

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(response, "Kirjautuminen onnistui.")))
}
