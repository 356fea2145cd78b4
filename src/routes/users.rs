use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::requests::SaveUserInfoRequest;
use crate::services::UserService;

// 懒加载的全局 USER_SERVICE 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn get_userinfo(req: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_userinfo(&req).await
}

pub async fn save_userinfo(
    req: HttpRequest,
    userinfo: web::Json<SaveUserInfoRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.save_userinfo(&req, userinfo.into_inner()).await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/userinfo")
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(get_userinfo))
            .route(web::post().to(save_userinfo)),
    );
}
