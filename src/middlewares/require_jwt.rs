/*!
 * 会话认证中间件
 *
 * 验证会话 JWT，把当前用户放入请求扩展，供后续处理程序使用。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::resource("/api/v1/homepage")
 *         .wrap(RequireJWT)
 *         .route(web::get().to(homepage_handler)),
 * )
 * ```
 *
 * 处理程序中读取当前用户：
 *
 * ```rust,ignore
 * async fn homepage_handler(req: HttpRequest) -> Result<HttpResponse> {
 *     let user = RequireJWT::extract_user_claims(&req);
 *     // ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 令牌取自 `Authorization: Bearer <JWT>`，没有时取自会话 Cookie
 * 2. 校验签名与有效期，并比对令牌版本（注销后旧令牌失效）
 * 3. 令牌来自 Cookie 时，修改类请求必须带上与令牌绑定的 `X-CSRF-Token`
 * 4. 会话用户按用户 ID 缓存，缓存未命中时从存储读取；注销、删除账号或修改资料时
 *    清除该条目，同一用户的其他令牌随即重新比对令牌版本
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::models::users::entities::{self, UserRole};
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::jwt::{JwtUtils, SessionClaims, TokenSource};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

use super::create_error_response;

pub const CSRF_HEADER: &str = "X-CSRF-Token";

#[derive(Clone)]
pub struct RequireJWT;

/// 当前请求的会话
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub token: String,
    pub user_id: i64,
    pub claims: SessionClaims,
}

impl SessionContext {
    pub fn cache_key(&self) -> String {
        session_cache_key(self.user_id)
    }
}

// 同一用户的所有令牌共用一个缓存条目
pub(crate) fn session_cache_key(user_id: i64) -> String {
    format!("session:user:{user_id}")
}

// 认证失败的原因
#[derive(Debug)]
pub(crate) enum SessionError {
    Missing,
    Invalid(String),
    CsrfMismatch,
}

impl SessionError {
    pub(crate) fn status(&self) -> (StatusCode, ErrorCode, &'static str) {
        match self {
            SessionError::Missing => (
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Kirjaudu ensin sisään.",
            ),
            SessionError::Invalid(_) => (
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Istunto on vanhentunut. Kirjaudu uudelleen sisään.",
            ),
            SessionError::CsrfMismatch => (
                StatusCode::FORBIDDEN,
                ErrorCode::CsrfTokenInvalid,
                "Virheellinen CSRF-tunniste.",
            ),
        }
    }
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

// 提取并验证会话，成功时返回会话用户
pub(crate) async fn resolve_session(
    req: &ServiceRequest,
) -> Result<(entities::User, SessionContext), SessionError> {
    let (token, source) =
        JwtUtils::extract_session_token(req.request()).ok_or(SessionError::Missing)?;

    let claims = JwtUtils::verify_session_token(&token).map_err(|err| {
        info!("Session token validation failed: {}", err);
        SessionError::Invalid("invalid token".to_string())
    })?;

    if source == TokenSource::Cookie && !is_safe_method(req.method()) {
        let provided = req
            .headers()
            .get(CSRF_HEADER)
            .and_then(|h| h.to_str().ok());
        if provided != Some(claims.csrf.as_str()) {
            warn!("CSRF token mismatch for request to {}", req.path());
            return Err(SessionError::CsrfMismatch);
        }
    }

    let user_id = claims
        .user_id()
        .ok_or_else(|| SessionError::Invalid("invalid user id".to_string()))?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| SessionError::Invalid("cache not configured".to_string()))?;

    let cache_key = session_cache_key(user_id);
    let cached = match cache.get_raw(&cache_key).await {
        CacheResult::Found(json) => match serde_json::from_str::<entities::User>(&json) {
            Ok(user) => Some(user),
            Err(_) => {
                cache.remove(&cache_key).await;
                info!("Failed to deserialize cached session user {}", user_id);
                None
            }
        },
        CacheResult::NotFound => None,
    };

    let user = match cached {
        Some(user) => user,
        None => {
            let storage = req
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .map(|data| data.get_ref().clone())
                .ok_or_else(|| SessionError::Invalid("storage not configured".to_string()))?;

            let user = storage
                .get_user_by_id(user_id)
                .await
                .map_err(|e| SessionError::Invalid(format!("storage error: {e}")))?
                .ok_or_else(|| SessionError::Invalid("user not found".to_string()))?;

            if let Ok(user_json) = serde_json::to_string(&user) {
                cache.insert_raw(cache_key, user_json).await;
            }
            user
        }
    };

    if user.token_version != claims.ver {
        return Err(SessionError::Invalid("token revoked".to_string()));
    }

    Ok((
        user,
        SessionContext {
            token,
            user_id,
            claims,
        },
    ))
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match resolve_session(&req).await {
                Ok((user, session)) => {
                    debug!("Session authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    req.extensions_mut().insert(session);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "Session authentication failed for request to {}: {:?}",
                        req.path(),
                        err
                    );
                    let (status, code, message) = err.status();
                    Ok(req.into_response(
                        create_error_response(status, code, message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<entities::User> {
        req.extensions().get::<entities::User>().cloned()
    }

    /// 从请求扩展中提取用户角色
    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions()
            .get::<entities::User>()
            .map(|user| user.role.clone())
    }

    /// 从请求扩展中提取当前会话
    pub fn extract_session(req: &actix_web::HttpRequest) -> Option<SessionContext> {
        req.extensions().get::<SessionContext>().cloned()
    }
}
