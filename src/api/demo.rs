//! Demo handlers
//!
//! Echo endpoints that report back what they received in an [`Envelope`],
//! plus file upload and a token-protected route.

use std::collections::BTreeMap;
use std::path::Path;

use axum::{
    extract::{
        multipart::{Field, Multipart, MultipartRejection},
        FromRequest, Query, Request, State,
    },
    http::StatusCode,
    Extension, Form, Json,
};
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::api::negotiate::{content_type, FORM, JSON, UNSUPPORTED_MEDIA_TYPE};
use crate::api::AppState;
use crate::auth::Claims;
use crate::error::{AppError, Negotiated, ResponseFormat, Result};
use crate::models::Envelope;

const INVALID_JSON: &str = "JSON inválido";
const INVALID_FORM: &str = "Datos de formulario inválidos";
const MULTIPART_PARSE_FAILED: &str = "Error al analizar datos del formulario";
const MISSING_FILE: &str = "Error al obtener el archivo";
const INVALID_FILE_NAME: &str = "Nombre de archivo inválido";
const SAVE_FAILED: &str = "Error al guardar el archivo";

/// Name of the multipart field carrying the upload.
pub const FILE_FIELD: &str = "file";

/// Suffix of the hidden file an upload streams into before it is renamed.
pub const PARTIAL_SUFFIX: &str = ".part";

type Pairs = Vec<(String, String)>;

/// Groups repeated keys the way URL query strings allow: `a=1&a=2` becomes
/// `{"a": ["1", "2"]}`. Keys come out sorted.
fn group_values(pairs: Pairs) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in pairs {
        grouped.entry(key).or_default().push(value);
    }
    grouped
}

fn grouped_json(pairs: Pairs) -> Value {
    serde_json::to_value(group_values(pairs)).unwrap_or_default()
}

/// Decodes a JSON object body; anything else is `JSON inválido`.
async fn json_object(req: Request) -> Result<Map<String, Value>> {
    Json::<Map<String, Value>>::from_request(req, &())
        .await
        .map(|Json(object)| object)
        .map_err(|_| AppError::BadRequest(INVALID_JSON.to_string()))
}

/// Handler for GET /get
pub async fn handle_get(Query(pairs): Query<Pairs>) -> Envelope {
    Envelope::ok("GET exitoso", grouped_json(pairs))
}

/// Handler for POST /post
///
/// Accepts a JSON object or a URL-encoded form.
pub async fn handle_post(format: ResponseFormat, req: Request) -> Negotiated<Envelope> {
    echo_post(req).await.map_err(|err| err.negotiated(format))
}

async fn echo_post(req: Request) -> Result<Envelope> {
    let content_type = content_type(req.headers()).to_ascii_lowercase();

    if content_type.contains(JSON) {
        let object = json_object(req).await?;
        Ok(Envelope::ok("POST exitoso", object))
    } else if content_type.contains(FORM) {
        let Form(pairs) = Form::<Pairs>::from_request(req, &())
            .await
            .map_err(|_| AppError::BadRequest(INVALID_FORM.to_string()))?;
        Ok(Envelope::ok("POST exitoso", grouped_json(pairs)))
    } else {
        Err(AppError::UnsupportedMediaType(
            UNSUPPORTED_MEDIA_TYPE.to_string(),
        ))
    }
}

/// Handler for PUT /put
///
/// JSON object bodies only.
pub async fn handle_put(format: ResponseFormat, req: Request) -> Negotiated<Envelope> {
    echo_put(req).await.map_err(|err| err.negotiated(format))
}

async fn echo_put(req: Request) -> Result<Envelope> {
    if !content_type(req.headers())
        .to_ascii_lowercase()
        .contains(JSON)
    {
        return Err(AppError::UnsupportedMediaType(
            UNSUPPORTED_MEDIA_TYPE.to_string(),
        ));
    }
    let object = json_object(req).await?;
    Ok(Envelope::ok("PUT exitoso", object))
}

/// Handler for DELETE /delete
pub async fn handle_delete(Query(pairs): Query<Pairs>) -> Envelope {
    Envelope::ok("DELETE exitoso", grouped_json(pairs))
}

/// Handler for GET /secure, reachable only through the bearer guard.
pub async fn handle_secure(Extension(claims): Extension<Claims>) -> Envelope {
    debug!(exp = claims.exp, sub = ?claims.sub, "Authorized secure access");
    Envelope::without_data(StatusCode::OK, "Acceso seguro autorizado")
}

/// Reduces a client-supplied filename to a bare name inside the upload
/// directory.
///
/// Returns `None` when nothing usable is left.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next()?.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains('\0') {
        return None;
    }
    Some(name.to_string())
}

fn parse_failed() -> AppError {
    AppError::BadRequest(MULTIPART_PARSE_FAILED.to_string())
}

fn save_failed(err: std::io::Error) -> AppError {
    error!(error = %err, "Failed to write upload");
    AppError::Internal(SAVE_FAILED.to_string())
}

/// Handler for POST /upload
///
/// Streams the `file` part to the upload directory and answers with the
/// stored name. An existing file with the same name is replaced only once
/// the whole part has been received.
pub async fn handle_upload(
    State(state): State<AppState>,
    format: ResponseFormat,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Negotiated<Envelope> {
    receive_upload(&state.upload_dir, multipart)
        .await
        .map_err(|err| err.negotiated(format))
}

async fn receive_upload(
    upload_dir: &Path,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Envelope> {
    let mut multipart = multipart.map_err(|_| parse_failed())?;

    while let Some(mut field) = multipart.next_field().await.map_err(|_| parse_failed())? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .and_then(sanitize_file_name)
            .ok_or_else(|| AppError::BadRequest(INVALID_FILE_NAME.to_string()))?;

        let written = store_field(&mut field, upload_dir, &file_name).await?;

        info!(file = %file_name, bytes = written, "File uploaded");
        return Ok(Envelope::ok("Archivo subido exitosamente", file_name));
    }

    Err(AppError::BadRequest(MISSING_FILE.to_string()))
}

/// Writes `field` to a hidden partial file next to its destination and
/// renames it into place. The partial file is removed on any failure.
async fn store_field(field: &mut Field<'_>, dir: &Path, file_name: &str) -> Result<u64> {
    let partial = dir.join(format!(".{}{}", Uuid::new_v4(), PARTIAL_SUFFIX));

    let outcome = match write_field(field, &partial).await {
        Ok(written) => tokio::fs::rename(&partial, dir.join(file_name))
            .await
            .map(|()| written)
            .map_err(save_failed),
        Err(err) => Err(err),
    };

    if outcome.is_err() {
        if let Err(err) = tokio::fs::remove_file(&partial).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %partial.display(), error = %err, "Failed to remove partial upload");
            }
        }
    }
    outcome
}

async fn write_field(field: &mut Field<'_>, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await.map_err(save_failed)?;
    let mut written: u64 = 0;
    while let Some(chunk) = field.chunk().await.map_err(|_| parse_failed())? {
        file.write_all(&chunk).await.map_err(save_failed)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(save_failed)?;
    Ok(written)
}
