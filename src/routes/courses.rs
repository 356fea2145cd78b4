use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{CourseFormRequest, CourseQueryParams};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 COURSE_SERVICE 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn homepage(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.homepage(&req).await
}

pub async fn enroll_form(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.enroll_form(&req, course_id.0).await
}

pub async fn enroll(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.enroll(&req, course_id.0).await
}

pub async fn course_page(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.course_page(&req, course_id.0).await
}

pub async fn add_course_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.add_course_form(&req).await
}

pub async fn add_course(
    req: HttpRequest,
    form: web::Json<CourseFormRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.add_course(&req, form.into_inner()).await
}

pub async fn update_course_form(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.update_course_form(&req, course_id.0).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    form: web::Json<CourseFormRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, course_id.0, form.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, course_id.0).await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["", "/"]).route(web::get().to(list_courses)))
        .service(
            web::resource("/homepage")
                .wrap(middlewares::RequireJWT)
                .route(web::get().to(homepage)),
        )
        .service(
            web::resource("/enroll/{course_id}")
                .route(web::get().to(enroll_form))
                .route(web::post().to(enroll).wrap(middlewares::RequireJWT)),
        )
        .service(
            web::resource("/course_page/{course_id}")
                // 访客与已登录用户看到的内容不同
                .wrap(middlewares::OptionalJWT)
                .route(web::get().to(course_page)),
        )
        .service(
            web::resource("/add_course")
                .wrap(
                    middlewares::RequireRole::new(&UserRole::Teacher)
                        .with_message("Vain opettajat voivat lisätä kursseja!"),
                )
                .wrap(middlewares::RequireJWT)
                .route(web::get().to(add_course_form))
                .route(web::post().to(add_course)),
        )
        .service(
            web::resource("/update_course/{course_id}")
                .wrap(middlewares::RequireJWT)
                .route(web::get().to(update_course_form))
                .route(web::post().to(update_course)),
        )
        .service(
            web::resource("/delete_course/{course_id}")
                .wrap(middlewares::RequireJWT)
                .route(web::get().to(delete_course))
                .route(web::delete().to(delete_course)),
        );
}
