//! 路径参数提取器
//!
//! 路径中的 ID 解析失败时直接返回统一格式的 400 响应，而不是 actix 默认的纯文本错误。

use crate::models::{ApiResponse, ErrorCode};
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    req.match_info()
        .get(param)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            let message = format!("Virheellinen tunniste: {param}");
            InternalError::from_response(
                message.clone(),
                HttpResponse::BadRequest()
                    .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, message)),
            )
            .into()
        })
}

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id! {
    SafeCourseIdI64 => "course_id",
    SafeExerciseIdI64 => "exercise_id",
    SafeMaterialIdI64 => "material_id",
}
