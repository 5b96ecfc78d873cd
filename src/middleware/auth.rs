use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::token_service::TokenService;

/// Bearer-token guard. Proves that *some* valid token was presented; it never
/// compares the decoded email against route parameters, so any valid token
/// can act on any task id.
pub struct AuthMiddleware {
    token_service: TokenService,
}

impl AuthMiddleware {
    pub fn new(token_service: TokenService) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            token_service: self.token_service.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    token_service: TokenService,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
        // No header at all: unauthenticated, the wrapped handler never runs
        let auth_header = match req.headers().get("Authorization") {
            Some(value) => value.clone(),
            None => {
                let response = HttpResponse::Unauthorized()
                    .json(serde_json::json!({ "message": "Unauthorized Access" }));
                return Box::pin(async move {
                    Err(InternalError::from_response("Unauthorized Access", response).into())
                });
            }
        };

        // Header present: anything short of a verified `Bearer <token>` is forbidden
        let token = auth_header
            .to_str()
            .ok()
            .and_then(|s| s.strip_prefix("Bearer "));

        let claims = token.and_then(|t| self.token_service.verify(t).ok());

        match claims {
            Some(claims) => {
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            None => {
                let response = HttpResponse::Forbidden()
                    .json(serde_json::json!({ "message": "Forbidden Access" }));
                Box::pin(async move {
                    Err(InternalError::from_response("Forbidden Access", response).into())
                })
            }
        }
    }
}
