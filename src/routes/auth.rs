use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::LoginRequest;
use crate::models::users::requests::RegisterRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login_status(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login_status(&req).await
}

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn register_form() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register_form().await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn logout(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&req).await
}

pub async fn delete_account(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.delete_account(&req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .route(
                web::get()
                    .to(login_status)
                    .wrap(middlewares::OptionalJWT),
            )
            .route(
                web::post()
                    .to(login)
                    // 防止暴力破解
                    .wrap(middlewares::RateLimit::login()),
            ),
    )
    .service(
        web::resource("/register")
            .route(web::get().to(register_form))
            .route(
                web::post()
                    .to(register)
                    .wrap(middlewares::RateLimit::register()),
            ),
    )
    .service(
        web::resource("/logout")
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(logout)),
    )
    .service(
        web::resource("/delete_account")
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(delete_account)),
    );
}
