use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MaterialService;
use crate::models::materials::requests::CreateMaterialRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, require_course_owner, validation_failed};
use crate::utils::validate::validate_material_form;

pub async fn add_material(
    service: &MaterialService,
    request: &HttpRequest,
    course_id: i64,
    material: CreateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = require_course_owner(
        &storage,
        user.id,
        course_id,
        "Vain kurssin opettaja voi lisätä materiaaleja!",
    )
    .await
    {
        return Ok(resp);
    }

    let errors = validate_material_form(&material.title, &material.content);
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    match storage.create_material(course_id, material).await {
        Ok(material) => {
            info!("Material {} added to course {}", material.id, course_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(material, "Materiaali lisätty.")))
        }
        Err(e) => {
            error!("Failed to add material to course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::MaterialCreationFailed,
                    "Materiaalin lisäys ei onnistunut.",
                )),
            )
        }
    }
}
