use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::{Actor, TokenService};
use super::ApiError;

/// The caller behind a valid `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

/// Like [`AuthUser`] for routes open to anonymous callers. No header means
/// anonymous; a header that fails verification is still rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Actor>);

fn missing_token() -> ApiError {
    ApiError::Unauthorized("Missing bearer token".to_string())
}

fn verify_header<S>(header: &str, state: &S) -> Result<Actor, ApiError>
where
    TokenService: FromRef<S>,
{
    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(missing_token)?;
    Ok(TokenService::from_ref(state).verify(token)?)
}

fn authorization(parts: &Parts) -> Option<Result<&str, ApiError>> {
    parts
        .headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| missing_token()))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = authorization(parts).ok_or_else(missing_token)??;
        Ok(AuthUser(verify_header(header, state)?))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthUser
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match authorization(parts) {
            None => Ok(MaybeAuthUser(None)),
            Some(header) => Ok(MaybeAuthUser(Some(verify_header(header?, state)?))),
        }
    }
}
