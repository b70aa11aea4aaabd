//! Request handlers for the upload server endpoints.
//!
//! Routing and the endpoint logic: base64 payload decoding, the fail-open
//! watermark branch, file serving and the JSON listing. Handlers translate
//! every failure into an [`EndpointResponse`]; nothing in here panics on
//! bad input.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use http::{Method, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response};
use serde::{Deserialize, Serialize};

use super::response::EndpointResponse;
use crate::config::AppConfig;
use crate::error::ServerError;
use crate::storage::Storage;
use crate::watermark::WatermarkProcessor;

const UPLOADS_PREFIX: &str = "/uploads/";

/// Everything a request handler needs, shared read-only across connections.
pub struct AppContext {
    pub config: AppConfig,
    pub storage: Storage,
    /// `None` when overlay assets failed to load at startup; uploads are
    /// then saved unmodified.
    pub processor: Option<WatermarkProcessor>,
}

#[derive(Debug, Deserialize)]
struct UploadRequest {
    image: Option<String>,
}

#[derive(Debug, Serialize)]
struct FileEntry {
    url: String,
    filename: String,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    files: Vec<FileEntry>,
}

/// Dispatch a request to its endpoint handler.
pub async fn handle(ctx: Arc<AppContext>, req: Request<Incoming>) -> Response<Full<Bytes>> {
    let response = match (req.method(), req.uri().path()) {
        (&Method::OPTIONS, _) => EndpointResponse::preflight(),
        (&Method::GET, path) if path.starts_with(UPLOADS_PREFIX) => {
            serve_file(&ctx, &path[UPLOADS_PREFIX.len()..]).await
        }
        (&Method::GET, "/list") => list_files(&ctx).await,
        (&Method::POST, "/upload") => upload(&ctx, req, true).await,
        (&Method::POST, "/upload-original") => upload(&ctx, req, false).await,
        _ => EndpointResponse::text(StatusCode::NOT_FOUND, "Not found"),
    };

    response.into_response()
}

/// Handle `POST /upload` and `POST /upload-original`.
///
/// Decodes the base64 payload, optionally runs the watermark pipeline, and
/// persists the result under a freshly generated filename.
async fn upload(ctx: &AppContext, req: Request<Incoming>, watermark: bool) -> EndpointResponse {
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => return error_response(&ServerError::Internal(e.to_string())),
    };

    let payload: UploadRequest = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => return error_response(&ServerError::Internal(e.to_string())),
    };

    let image_field = match payload.image {
        Some(data) if !data.is_empty() => data,
        _ => {
            return error_response(&ServerError::Validation("No image data provided".to_string()))
        }
    };

    let image_bytes = match BASE64.decode(strip_data_uri(&image_field)) {
        Ok(bytes) => bytes,
        Err(e) => {
            return error_response(&ServerError::Decode(format!("Invalid base64 data: {}", e)))
        }
    };

    let (prefix, output) = if watermark {
        ("image", stamp_or_passthrough(ctx, image_bytes))
    } else {
        ("original", image_bytes)
    };

    let filename = Storage::random_name(prefix);
    if let Err(e) = ctx.storage.save(&filename, &output).await {
        return error_response(&ServerError::Internal(e.to_string()));
    }

    tracing::info!(
        filename = %filename,
        bytes = output.len(),
        watermarked = watermark,
        "Image saved"
    );

    let url = format!("{}{}{}", ctx.config.base_url(), UPLOADS_PREFIX, filename);
    EndpointResponse::json(
        StatusCode::OK,
        serde_json::json!({ "url": url }).to_string(),
    )
}

/// The fail-open branch: a broken watermark never blocks the upload.
///
/// Returns the stamped bytes on success, or the input unchanged when the
/// processor is unavailable or fails.
fn stamp_or_passthrough(ctx: &AppContext, bytes: Vec<u8>) -> Vec<u8> {
    match &ctx.processor {
        Some(processor) => match processor.apply(&bytes) {
            Ok(stamped) => stamped,
            Err(e) => {
                tracing::warn!(error = %e, "Watermarking failed, saving original image");
                bytes
            }
        },
        None => {
            tracing::warn!("Watermark assets unavailable, saving original image");
            bytes
        }
    }
}

/// Handle `GET /uploads/{filename}`.
async fn serve_file(ctx: &AppContext, name: &str) -> EndpointResponse {
    match ctx.storage.read(name).await {
        Ok(Some(bytes)) => EndpointResponse::file(content_type_for(name), bytes),
        Ok(None) => EndpointResponse::text(StatusCode::NOT_FOUND, "File not found"),
        Err(e) => EndpointResponse::text(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

/// Handle `GET /list`.
async fn list_files(ctx: &AppContext) -> EndpointResponse {
    let names = match ctx.storage.list().await {
        Ok(names) => names,
        Err(e) => return error_response(&ServerError::Internal(e.to_string())),
    };

    let base_url = ctx.config.base_url();
    let files = names
        .into_iter()
        .map(|filename| FileEntry {
            url: format!("{}{}{}", base_url, UPLOADS_PREFIX, filename),
            filename,
        })
        .collect();

    match serde_json::to_string(&ListResponse { files }) {
        Ok(body) => EndpointResponse::json(StatusCode::OK, body),
        Err(e) => error_response(&ServerError::Internal(e.to_string())),
    }
}

fn error_response(err: &ServerError) -> EndpointResponse {
    let status = StatusCode::from_u16(err.to_http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    EndpointResponse::json(
        status,
        serde_json::json!({ "error": err.to_string() }).to_string(),
    )
}

/// Strip a `data:image/...;base64,` style prefix, if present, up to the
/// first comma.
fn strip_data_uri(data: &str) -> &str {
    if data.starts_with("data:image") {
        match data.split_once(',') {
            Some((_, rest)) => rest,
            None => data,
        }
    } else {
        data
    }
}

/// Content type inferred from the filename extension.
fn content_type_for(name: &str) -> &'static str {
    if name.ends_with(".jpg") || name.ends_with(".jpeg") {
        "image/jpeg"
    } else if name.ends_with(".png") {
        "image/png"
    } else {
        "application/octet-stream"
    }
}
