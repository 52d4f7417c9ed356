//! MIME type mapping for extracted images.

/// Build the MIME type of an image from its data URI subtype.
///
/// Subtypes are lowercased and the common `jpg` alias is folded into `jpeg`.
pub fn image_mime_from_subtype(subtype: &str) -> String {
    match subtype.to_lowercase().as_str() {
        "jpg" | "pjpeg" => "image/jpeg".to_string(),
        other => format!("image/{}", other),
    }
}

/// Get the standard file extension for an image MIME type.
pub fn extension_from_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        "image/webp" => "webp",
        "image/avif" => "avif",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/heic" => "heic",
        "image/x-icon" | "image/icon" => "ico",
        _ => "bin",
    }
}
