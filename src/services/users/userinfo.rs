use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::models::users::{
    entities::{UserProfile, UserRole},
    requests::SaveUserInfoRequest,
    responses::UserInfoResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{drop_cached_session, fresh_user, validation_failed};
use crate::utils::validate::validate_userinfo;

pub async fn get_userinfo(
    service: &UserService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match fresh_user(&storage, request).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse::from(&user),
        "Käyttäjätiedot",
    )))
}

pub async fn save_userinfo(
    service: &UserService,
    request: &HttpRequest,
    userinfo: SaveUserInfoRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let user = match fresh_user(&storage, request).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 先去掉首尾空白，与 has_userinfo 的判断保持一致
    let first_name = userinfo.first_name.trim().to_string();
    let last_name = userinfo.last_name.trim().to_string();
    let student_number = userinfo
        .student_number
        .map(|number| number.trim().to_string())
        .filter(|number| !number.is_empty());

    let is_student = user.role == UserRole::Student;
    let errors = validate_userinfo(
        &first_name,
        &last_name,
        student_number.as_deref(),
        is_student,
    );
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    // 教师不保存学号
    let profile = UserProfile {
        first_name: Some(first_name),
        last_name: Some(last_name),
        student_number: student_number.filter(|_| is_student),
    };

    match storage.save_user_info(user.id, profile).await {
        Ok(Some(updated)) => {
            drop_cached_session(request).await;
            info!("User {} saved their userinfo", updated.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserInfoResponse::from(&updated),
                "Käyttäjätiedot tallennettu.",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Käyttäjää ei löytynyt.",
        ))),
        Err(e) => {
            error!("Failed to save userinfo of {}: {}", user.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserInfoSaveFailed,
                    "Käyttäjätietojen tallennus ei onnistunut.",
                )),
            )
        }
    }
}
