//! Extension-based MIME classification.

/// MIME type reported when the extension is not in [`MIME_TYPES`].
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Known extensions and their MIME types.
const MIME_TYPES: &[(&str, &str)] = &[
    // Images
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    // Videos
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogg", "video/ogg"),
    // Documents
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    // Archives
    ("zip", "application/zip"),
    ("rar", "application/x-rar-compressed"),
];

/// Extensions the browser client can render inline.
const PREVIEWABLE: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "mp4", "webm", "ogg", "pdf", "txt", "md",
];

/// Lowercased text after the last `.` in `name`, or empty if there is none.
pub fn extension(name: &str) -> String {
    name.rfind('.')
        .map(|dot| name[dot + 1..].to_lowercase())
        .unwrap_or_default()
}

/// MIME type for `name`, from the fixed table.
pub fn mime_type(name: &str) -> &'static str {
    let ext = extension(name);
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// Whether `name` has an inline-previewable extension.
pub fn is_previewable(name: &str) -> bool {
    PREVIEWABLE.contains(&extension(name).as_str())
}

/// Content-Type header for serving `name`.
///
/// Uses the fixed table first and falls back to a registry guess for
/// extensions the table does not know.
pub fn content_type(name: &str) -> String {
    match mime_type(name) {
        DEFAULT_MIME_TYPE => mime_guess::from_path(name)
            .first_or_octet_stream()
            .to_string(),
        known => known.to_string(),
    }
}
