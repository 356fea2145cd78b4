use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exercises::requests::{AnswerRequest, CreateExerciseRequest};
use crate::services::ExerciseService;
use crate::utils::{SafeCourseIdI64, SafeExerciseIdI64};

// 懒加载的全局 EXERCISE_SERVICE 实例
static EXERCISE_SERVICE: Lazy<ExerciseService> = Lazy::new(ExerciseService::new_lazy);

pub async fn add_exercise(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    exercise: web::Json<CreateExerciseRequest>,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE
        .add_exercise(&req, course_id.0, exercise.into_inner())
        .await
}

pub async fn answer(
    req: HttpRequest,
    exercise_id: SafeExerciseIdI64,
    answer: web::Json<AnswerRequest>,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE
        .answer(&req, exercise_id.0, answer.into_inner())
        .await
}

pub async fn delete_exercise(
    req: HttpRequest,
    exercise_id: SafeExerciseIdI64,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE.delete_exercise(&req, exercise_id.0).await
}

// 配置路由
pub fn configure_exercise_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/add_exercise/{course_id}")
            .wrap(middlewares::RequireJWT)
            .route(web::post().to(add_exercise)),
    )
    .service(
        web::resource("/answer/{exercise_id}")
            .wrap(middlewares::RequireJWT)
            .route(web::post().to(answer)),
    )
    .service(
        web::resource("/delete_exercise/{exercise_id}")
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(delete_exercise))
            .route(web::delete().to(delete_exercise)),
    );
}
