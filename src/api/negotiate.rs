//! Content negotiation
//!
//! Picks the response representation from `Accept` and decodes customer
//! payloads according to `Content-Type`.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
    Form, Json,
};

use crate::error::{AppError, NegotiatedError, ResponseFormat};
use crate::models::CustomerInput;

pub const JSON: &str = "application/json";
pub const FORM: &str = "application/x-www-form-urlencoded";

pub const UNSUPPORTED_MEDIA_TYPE: &str = "Tipo de contenido no soportado";

/// Value of `Content-Type`, or "" when absent or not valid UTF-8.
pub fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

impl ResponseFormat {
    /// JSON when `Accept` mentions `application/json`, HTML otherwise.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let accepts_json = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.contains(JSON));
        if accepts_json {
            ResponseFormat::Json
        } else {
            ResponseFormat::Html
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ResponseFormat::from_headers(&parts.headers))
    }
}

// == Customer Payload ==
/// Customer fields decoded from a JSON body or a URL-encoded form.
#[derive(Debug)]
pub struct CustomerPayload(pub CustomerInput);

#[async_trait]
impl<S> FromRequest<S> for CustomerPayload
where
    S: Send + Sync,
{
    type Rejection = NegotiatedError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = ResponseFormat::from_headers(req.headers());
        let content_type = content_type(req.headers()).to_ascii_lowercase();

        let input = if content_type.contains(JSON) {
            Json::<CustomerInput>::from_request(req, state)
                .await
                .map(|Json(input)| input)
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
        } else if content_type.contains(FORM) {
            Form::<CustomerInput>::from_request(req, state)
                .await
                .map(|Form(input)| input)
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
        } else {
            Err(AppError::UnsupportedMediaType(
                UNSUPPORTED_MEDIA_TYPE.to_string(),
            ))
        };

        input
            .map(CustomerPayload)
            .map_err(|err| err.negotiated(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_accept_json() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert_eq!(ResponseFormat::from_headers(&headers), ResponseFormat::Json);
    }

    #[test]
    fn test_browser_accept_is_html() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );
        assert_eq!(ResponseFormat::from_headers(&headers), ResponseFormat::Html);
        assert_eq!(
            ResponseFormat::from_headers(&HeaderMap::new()),
            ResponseFormat::Html
        );
    }

    #[tokio::test]
    async fn test_payload_from_form() {
        let req = axum::http::Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, FORM)
            .body(axum::body::Body::from(
                "name=Ana&email=ana%40example.com&phone=555&address=Calle+1",
            ))
            .unwrap();

        let CustomerPayload(input) = CustomerPayload::from_request(req, &()).await.unwrap();
        assert_eq!(input.email, "ana@example.com");
        assert_eq!(input.address, "Calle 1");
    }

    #[tokio::test]
    async fn test_payload_unsupported_type() {
        let req = axum::http::Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(axum::body::Body::from("name=Ana"))
            .unwrap();

        let err = CustomerPayload::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err.error, AppError::UnsupportedMediaType(_)));
    }

    #[tokio::test]
    async fn test_payload_malformed_json() {
        let req = axum::http::Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, JSON)
            .header(header::ACCEPT, JSON)
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let err = CustomerPayload::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err.error, AppError::BadRequest(_)));
        assert_eq!(err.format, ResponseFormat::Json);
    }
}
