//! Response builders for the HTTP shell.
//!
//! Handlers return [`EndpointResponse`] instead of writing to the
//! connection directly. This keeps response generation testable and puts
//! header policy (content types, CORS) in one place.

use bytes::Bytes;
use http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use http::StatusCode;
use http_body_util::Full;
use hyper::Response;

/// Response from an endpoint handler.
#[derive(Debug, Clone)]
pub struct EndpointResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header value, when one applies
    pub content_type: Option<&'static str>,
    /// Response body
    pub body: Vec<u8>,
    /// Attach `Access-Control-Allow-Origin: *`
    pub cors: bool,
    /// Attach the full CORS preflight header set
    pub preflight: bool,
}

impl EndpointResponse {
    /// JSON response with CORS allowed (every JSON response carries it,
    /// success and error alike).
    pub fn json(status: StatusCode, body: String) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.into_bytes(),
            cors: true,
            preflight: false,
        }
    }

    /// Plain text response (404 bodies and similar).
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain"),
            body: body.as_bytes().to_vec(),
            cors: false,
            preflight: false,
        }
    }

    /// Raw file bytes with a caller-chosen content type.
    pub fn file(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some(content_type),
            body,
            cors: false,
            preflight: false,
        }
    }

    /// Empty 200 carrying the CORS preflight headers.
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            content_type: None,
            body: Vec::new(),
            cors: true,
            preflight: true,
        }
    }

    /// Convert into a hyper response.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(Bytes::from(self.body)));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        if let Some(content_type) = self.content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        if self.cors {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        }
        if self.preflight {
            headers.insert(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            );
            headers.insert(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            );
        }

        response
    }
}
