//! Field extraction endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Query, Request, State},
    http::header::CONTENT_TYPE,
};
use invex_core::{LayoutProfile, ResultMapping};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Options accepted in the query string.
///
/// Multipart form fields of the same name take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractQuery {
    /// Comma-separated extra field names.
    pub extra_fields: Option<String>,
    /// Layout profile overriding the configured one.
    pub profile: Option<String>,
}

/// Document and options read from the request body.
#[derive(Debug, Default)]
struct Upload {
    document: Option<Bytes>,
    extra_fields: Option<String>,
    profile: Option<String>,
}

/// Extract invoice fields from an uploaded document.
/// POST /extract
///
/// The document is either the `file` part of a multipart form or the raw
/// request body.
pub async fn extract_invoice(
    State(state): State<AppState>,
    Query(query): Query<ExtractQuery>,
    request: Request,
) -> ApiResult<Json<ResultMapping>> {
    let upload = read_upload(&state, request).await?;

    let profile = upload
        .profile
        .or(query.profile)
        .map(|p| p.parse::<LayoutProfile>())
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let extra_fields = upload.extra_fields.or(query.extra_fields);
    let document = upload.document.ok_or_else(ApiError::missing_document)?;

    debug!(
        "extracting from {} byte upload, extra_fields={:?}",
        document.len(),
        extra_fields
    );

    let pipeline = state.pipeline(profile);
    let result = tokio::task::spawn_blocking(move || {
        pipeline.process(&document, extra_fields.as_deref())
    })
    .await
    .map_err(|e| ApiError::internal(format!("extraction task failed: {}", e)))??;

    Ok(Json(result.fields))
}

async fn read_upload(state: &AppState, request: Request) -> ApiResult<Upload> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !is_multipart {
        let body = Bytes::from_request(request, state)
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
        return Ok(Upload {
            document: (!body.is_empty()).then_some(body),
            ..Default::default()
        });
    }

    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
    let mut upload = Upload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                upload.document = Some(data);
            }
            Some("extra_fields") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                upload.extra_fields = Some(text);
            }
            Some("profile") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                upload.profile = Some(text);
            }
            other => debug!("ignoring form field {:?}", other),
        }
    }

    Ok(upload)
}
