use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::CreateMaterialRequest;
use crate::services::MaterialService;
use crate::utils::{SafeCourseIdI64, SafeMaterialIdI64};

// 懒加载的全局 MATERIAL_SERVICE 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn add_material(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    material: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .add_material(&req, course_id.0, material.into_inner())
        .await
}

pub async fn delete_material(
    req: HttpRequest,
    material_id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_material(&req, material_id.0).await
}

// 配置路由
pub fn configure_material_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/add_material/{course_id}")
            .wrap(middlewares::RequireJWT)
            .route(web::post().to(add_material)),
    )
    .service(
        web::resource("/delete_material/{material_id}")
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(delete_material))
            .route(web::delete().to(delete_material)),
    );
}
