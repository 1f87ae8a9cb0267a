use crate::config::AdminConfig;
use crate::error::AppError;
use actix_web::http::Method;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// 管理端点前缀（/api/v1 作用域下的 /admin）
const ADMIN_PATH_PREFIX: &str = "/api/v1/admin";

/// 管理令牌守卫：只拦 /admin 前缀，其它路径全部放行。
/// 令牌从 X-Admin-Token 或 Authorization: Bearer 读取，判定统一走 AdminConfig
pub struct AdminAuthMiddleware {
    admin: AdminConfig,
}

impl AdminAuthMiddleware {
    pub fn new(admin: AdminConfig) -> Self {
        Self { admin }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddlewareService {
            service,
            admin: self.admin.clone(),
        }))
    }
}

pub struct AdminAuthMiddlewareService<S> {
    service: S,
    admin: AdminConfig,
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        if !req.path().starts_with(ADMIN_PATH_PREFIX) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token = extract_token(&req);

        if self.admin.authorizes_token(token.as_deref()) {
            let fut = self.service.call(req);
            Box::pin(fut)
        } else {
            let error = AppError::AuthError("Missing or invalid admin token".to_string());
            Box::pin(async move { Err(error.into()) })
        }
    }
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(value) = req.headers().get("X-Admin-Token")
        && let Ok(s) = value.to_str()
    {
        return Some(s.to_string());
    }
    if let Some(value) = req.headers().get("Authorization")
        && let Ok(s) = value.to_str()
    {
        return s.strip_prefix("Bearer ").map(str::to_string);
    }
    None
}
