//! Principal resolution and the authentication/admin gates

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::warn;

use crate::{error::AppError, state::AppState};

/// User ids allowed to edit and delete cafes
#[derive(Debug, Clone)]
pub struct AdminList(Arc<[i64]>);

impl AdminList {
    pub fn new(ids: Vec<i64>) -> Self {
        Self(ids.into())
    }

    pub fn contains(&self, user_id: i64) -> bool {
        self.0.contains(&user_id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.0
    }
}

/// Authenticated user information
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub is_admin: bool,
}

/// Whoever is asking: an authenticated user or nobody
#[derive(Debug, Clone, Default)]
pub struct Principal(pub Option<AuthUser>);

impl Principal {
    pub fn user(&self) -> Option<&AuthUser> {
        self.0.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(|user| user.is_admin)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(principal.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let principal = match state.session_service.resolve(&jar) {
            // A token for a user that no longer exists is treated as anonymous
            Some(user_id) => Principal(
                state
                    .user_repository
                    .find_by_id(user_id)
                    .await?
                    .map(|user| AuthUser {
                        is_admin: state.admins.contains(user.id),
                        id: user.id,
                        name: user.name,
                    }),
            ),
            None => Principal::default(),
        };

        parts.extensions.insert(principal.clone());
        Ok(principal)
    }
}

/// Reject anonymous requests with a redirect to the login page
pub async fn require_auth(
    principal: Principal,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !principal.is_authenticated() {
        return Err(AppError::AuthenticationRequired);
    }

    Ok(next.run(req).await)
}

/// Reject everyone outside the admin list with 403
pub async fn require_admin(
    principal: Principal,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !principal.is_admin() {
        warn!(
            "Forbidden {} {} for user {:?}",
            req.method(),
            req.uri().path(),
            principal.user().map(|user| user.id)
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}
