/*!
 * 可选会话中间件
 *
 * 与 `RequireJWT` 相同地解析会话，但认证失败时以匿名身份继续处理请求。
 * 用于公开页面中需要区分访客与已登录用户的场景（如课程主页）。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::debug;

use super::require_jwt::resolve_session;

#[derive(Clone)]
pub struct OptionalJWT;

impl<S, B> Transform<S, ServiceRequest> for OptionalJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = OptionalJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OptionalJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct OptionalJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for OptionalJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
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
            match resolve_session(&req).await {
                Ok((user, session)) => {
                    req.extensions_mut().insert(user);
                    req.extensions_mut().insert(session);
                }
                Err(err) => debug!("Continuing anonymously on {}: {:?}", req.path(), err),
            }
            srv.call(req).await
        })
    }
}
