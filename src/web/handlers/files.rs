//! Raw file serving for Web API.

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
};
use std::sync::Arc;

use crate::explorer::{content_type, is_previewable};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Generate a safe Content-Disposition header value.
///
/// Previewable files are sent `inline`, everything else as an `attachment`.
/// Control characters are dropped, quotes and backslashes are replaced in
/// the plain `filename`, and non-ASCII names also get an RFC 5987
/// `filename*` parameter.
pub fn content_disposition_header(filename: &str, inline: bool) -> String {
    let disposition = if inline { "inline" } else { "attachment" };

    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("{}; filename=\"{}\"", disposition, filename);
    }

    let encoded = urlencoding::encode(filename);

    format!(
        "{}; filename=\"{}\"; filename*=UTF-8''{}",
        disposition, sanitized, encoded
    )
}

/// GET /files/{path} - Serve the raw content of a file under the root.
#[utoipa::path(
    get,
    path = "/files/{path}",
    tag = "files",
    params(
        ("path" = String, Path, description = "Root-relative file path")
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 400, description = "Path is a folder or escapes the root"),
        (status = 404, description = "File not found")
    )
)]
pub async fn serve_file(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let file = state
        .explorer
        .read_file(&path)
        .map_err(|e| ApiError::from_explorer(e, "Failed to load file"))?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type(&file.name))
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&file.name, is_previewable(&file.name)),
        )
        .header(header::CONTENT_LENGTH, file.content.len())
        .body(Body::from(file.content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_simple_ascii() {
        assert_eq!(
            content_disposition_header("report.zip", false),
            "attachment; filename=\"report.zip\""
        );
        assert_eq!(
            content_disposition_header("photo.png", true),
            "inline; filename=\"photo.png\""
        );
    }

    #[test]
    fn test_content_disposition_with_spaces() {
        let result = content_disposition_header("my notes.txt", true);
        assert_eq!(result, "inline; filename=\"my notes.txt\"");
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        let result = content_disposition_header("日本語.pdf", true);
        assert!(result.starts_with("inline; filename=\""));
        assert!(result.contains("filename*=UTF-8''"));
        assert!(result.contains("%E6%97%A5%E6%9C%AC%E8%AA%9E"));
    }

    #[test]
    fn test_content_disposition_quote_and_backslash() {
        let result = content_disposition_header("a\"b\\c.bin", false);
        assert!(result.contains("filename=\"a_b_c.bin\""));
        assert!(result.contains("%22"));
        assert!(result.contains("%5C"));
    }

    #[test]
    fn test_content_disposition_header_injection() {
        let result = content_disposition_header("x\"\r\nX-Evil: header\r\n\r\n.txt", false);
        assert!(!result.contains('\r'));
        assert!(!result.contains('\n'));
        assert!(result.starts_with("attachment; filename="));
    }

    #[test]
    fn test_content_disposition_null_character() {
        let result = content_disposition_header("a\x00b.txt", true);
        assert!(!result.contains('\x00'));
    }
}
