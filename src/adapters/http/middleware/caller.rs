//! Caller identity extractors for axum.
//!
//! The registry does not authenticate; an upstream gateway does, and
//! forwards the verified identity in the `X-Caller-Id` header. These
//! extractors read that header for handlers.
//!
//! - `Caller` - Requires the header; rejects with 401 when missing
//! - `OptionalCaller` - For permissionless endpoints that record the caller if present

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::membership::ErrorResponse;
use crate::domain::foundation::Identity;

/// Header carrying the caller identity.
pub const CALLER_HEADER: &str = "X-Caller-Id";

/// Extractor that requires a caller identity.
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

/// Extractor for an optional caller identity.
#[derive(Debug, Clone)]
pub struct OptionalCaller(pub Option<Identity>);

/// Rejection when the caller header is missing, empty or not valid UTF-8.
#[derive(Debug, Clone, Copy)]
pub struct CallerRequired;

impl IntoResponse for CallerRequired {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new(
            "CALLER_REQUIRED",
            format!("The {} header is required", CALLER_HEADER),
        );
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

fn caller_from(parts: &Parts) -> Option<Identity> {
    parts
        .headers
        .get(CALLER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(Identity::new)
        .filter(|identity| !identity.is_null())
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = CallerRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller_from(parts).map(Caller).ok_or(CallerRequired)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalCaller
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalCaller(caller_from(parts)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(CALLER_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn caller_reads_header() {
        let mut parts = parts(Some(" issuer-1 "));
        let Caller(identity) = Caller::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(identity, Identity::new("issuer-1"));
    }

    #[tokio::test]
    async fn caller_rejects_missing_or_null() {
        for header in [None, Some(""), Some("0x0000")] {
            let mut parts = parts(header);
            assert!(Caller::from_request_parts(&mut parts, &()).await.is_err());
        }
    }

    #[tokio::test]
    async fn optional_caller_allows_missing() {
        let mut parts = parts(None);
        let OptionalCaller(identity) = OptionalCaller::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(identity.is_none());
    }

    #[test]
    fn rejection_is_unauthorized() {
        assert_eq!(
            CallerRequired.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
