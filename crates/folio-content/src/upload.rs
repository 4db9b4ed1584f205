//! Image upload allow-list.

/// MIME types accepted for image uploads.
pub const ALLOWED_IMAGE_MIME_TYPES: [&str; 7] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Extensions accepted when the MIME type is missing or not recognised.
/// Browsers often send HEIC/HEIF photos with an empty type.
const FALLBACK_EXTENSIONS: [&str; 2] = ["heic", "heif"];

fn normalized_mime(mime: Option<&str>) -> Option<String> {
    mime.map(|m| m.trim().to_ascii_lowercase())
        .filter(|m| !m.is_empty())
}

fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether an uploaded file may be stored as an image.
pub fn is_allowed_image_file(mime: Option<&str>, filename: &str) -> bool {
    if let Some(mime) = normalized_mime(mime) {
        if ALLOWED_IMAGE_MIME_TYPES.contains(&mime.as_str()) {
            return true;
        }
    }

    extension(filename)
        .map(|ext| FALLBACK_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Extension to store an accepted image under. Prefers the MIME type and
/// falls back to the original filename.
pub fn image_extension(mime: Option<&str>, filename: &str) -> Option<&'static str> {
    let from_mime = match normalized_mime(mime).as_deref() {
        Some("image/jpeg") | Some("image/jpg") => Some("jpg"),
        Some("image/png") => Some("png"),
        Some("image/gif") => Some("gif"),
        Some("image/webp") => Some("webp"),
        Some("image/heic") => Some("heic"),
        Some("image/heif") => Some("heif"),
        _ => None,
    };

    from_mime.or_else(|| match extension(filename).as_deref() {
        Some("heic") => Some("heic"),
        Some("heif") => Some("heif"),
        _ => None,
    })
}
