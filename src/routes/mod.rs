pub mod auth;

pub mod users;

pub mod courses;

pub mod exercises;

pub mod materials;

pub mod frontend;

#[cfg(test)]
mod tests;

pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use exercises::configure_exercise_routes;
pub use frontend::configure_frontend_routes;
pub use materials::configure_material_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 全部 API 都挂在 /api/v1 下
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(configure_auth_routes)
            .configure(configure_user_routes)
            .configure(configure_course_routes)
            .configure(configure_exercise_routes)
            .configure(configure_material_routes),
    );
}
