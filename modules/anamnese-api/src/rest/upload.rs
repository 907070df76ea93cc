use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::AppState;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];
const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Returns the lowercased extension when the file name carries an allowed
/// image extension.
pub fn allowed_extension(file_name: &str) -> Option<String> {
    let ext = file_name.rsplit_once('.')?.1.to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": message})),
    )
        .into_response()
}

/// Store an uploaded exam image under the public uploads directory. Only
/// image types are accepted, capped at 5 MB.
pub async fn upload_exam_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "malformed multipart upload");
                return bad_request("malformed multipart request");
            }
        };
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let Some(ext) = allowed_extension(&file_name) else {
            return bad_request("only jpeg, jpg, png, gif and webp images are allowed");
        };
        if !field
            .content_type()
            .is_some_and(|mime| ALLOWED_MIME_TYPES.contains(&mime))
        {
            return bad_request("only jpeg, jpg, png, gif and webp images are allowed");
        }

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "failed to read uploaded image");
                return bad_request("failed to read uploaded file");
            }
        };
        if data.len() > MAX_IMAGE_BYTES {
            return bad_request("image exceeds the 5 MB limit");
        }

        let stored_name = format!("exam-{}.{ext}", Uuid::new_v4());
        if let Err(e) = tokio::fs::write(state.exams_dir.join(&stored_name), &data).await {
            warn!(error = %e, "failed to store exam image");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }

        info!(file = %stored_name, bytes = data.len(), "exam image stored");
        return Json(serde_json::json!({
            "file_path": format!("/uploads/exams/{stored_name}"),
        }))
        .into_response();
    }

    bad_request("no file was sent")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_extensions_case_insensitively() {
        assert_eq!(allowed_extension("rx.PNG").as_deref(), Some("png"));
        assert_eq!(allowed_extension("torax.jpeg").as_deref(), Some("jpeg"));
        assert_eq!(allowed_extension("eco.webp").as_deref(), Some("webp"));
    }

    #[test]
    fn rejects_other_extensions_and_bare_names() {
        assert!(allowed_extension("laudo.pdf").is_none());
        assert!(allowed_extension("script.png.exe").is_none());
        assert!(allowed_extension("semextensao").is_none());
    }
}
