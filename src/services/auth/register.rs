use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::responses::RegisterFormResponse,
    users::{
        entities::UserRole,
        requests::{CreateUserRequest, RegisterRequest},
        responses::UserResponse,
    },
};
use crate::services::validation_failed;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_password, validate_username};

use super::AuthService;

pub async fn handle_register_form() -> ActixResult<HttpResponse> {
    let response = RegisterFormResponse {
        roles: UserRole::all_roles().iter().map(|r| (*r).clone()).collect(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Rekisteröityminen")))
}

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 校验输入，收集全部错误
    let mut errors = Vec::new();
    if let Err(msg) = validate_username(&register_request.username) {
        errors.push(msg.to_string());
    }
    if let Err(msg) = validate_password(&register_request.password) {
        errors.push(msg.to_string());
    }
    let role = register_request.role.parse::<UserRole>().ok();
    if role.is_none() {
        errors.push("Roolin on oltava opettaja (teacher) tai opiskelija (student).".to_string());
    }
    let Some(role) = role.filter(|_| errors.is_empty()) else {
        return Ok(validation_failed(errors));
    };

    // 2. 用户名唯一
    match storage.get_user_by_username(&register_request.username).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                "Käyttäjätunnus on jo käytössä.",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Username lookup failed: {}", e);
            return Ok(register_failed());
        }
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(register_failed());
        }
    };

    // 4. 创建用户
    let create_request = CreateUserRequest {
        username: register_request.username,
        password_hash,
        role,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("User {} registered as {}", user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "Rekisteröityminen onnistui.",
            )))
        }
        Err(e) => {
            error!("Failed to create user: {}", e);
            Ok(register_failed())
        }
    }
}

fn register_failed() -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::RegisterFailed,
        "Rekisteröityminen epäonnistui.",
    ))
}
