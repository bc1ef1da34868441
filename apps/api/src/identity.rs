//! Caller identity.
//!
//! Sign-in happens at the identity provider in front of this service. The
//! provider's opaque user id arrives in the `x-user-id` header and is trusted
//! as the owner key without further verification.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::models::resume::Resume;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl Owner {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only the owner may change a resume.
    pub fn authorize(&self, resume: &Resume) -> Result<(), AppError> {
        if resume.is_owned_by(&self.0) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Owner(v.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}
