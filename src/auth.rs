use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use crate::errors::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity as established by the upstream auth layer. Session and
/// token validation happen before requests reach this service; the
/// authenticated user id travels in the `X-User-Id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| AuthenticatedUser(value.to_owned()));
        ready(user.ok_or(ApiError::Unauthorized))
    }
}
