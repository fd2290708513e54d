use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::OwnerId;

use super::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity, set by the authentication layer in front of this service.
#[derive(Debug, Clone, Copy)]
pub struct OwnerIdentity(pub OwnerId);

impl<S> FromRequestParts<S> for OwnerIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        raw.parse::<OwnerId>()
            .map(OwnerIdentity)
            .map_err(|_| ApiError::unauthorized("Invalid user identity"))
    }
}
