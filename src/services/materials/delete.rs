use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MaterialService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, require_course_owner};

fn material_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::MaterialNotFound,
        "Materiaalia ei löytynyt.",
    ))
}

pub async fn delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let material = match storage.get_material(material_id).await {
        Ok(Some(material)) => material,
        Ok(None) => return Ok(material_not_found()),
        Err(e) => {
            error!("Failed to load material {}: {}", material_id, e);
            return Ok(internal_error());
        }
    };

    if let Err(resp) = require_course_owner(
        &storage,
        user.id,
        material.course_id,
        "Vain kurssin opettaja voi poistaa materiaaleja!",
    )
    .await
    {
        return Ok(resp);
    }

    match storage.delete_material(material_id).await {
        Ok(true) => {
            info!("Material {} deleted by {}", material_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Materiaali poistettu.")))
        }
        Ok(false) => Ok(material_not_found()),
        Err(e) => {
            error!("Failed to delete material {}: {}", material_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::MaterialDeleteFailed,
                    "Materiaalin poistaminen ei onnistunut.",
                )),
            )
        }
    }
}
