//! Media type allow-lists and file extensions for stored uploads.

/// Types accepted as profile avatars.
pub const AVATAR_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Types accepted as post attachments.
pub const POST_MEDIA_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
];

/// Lower-case a `Content-Type` value and drop any parameters
/// (`image/PNG; charset=binary` becomes `image/png`).
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether `content_type` is one of `allowed`.
pub fn is_allowed(content_type: &str, allowed: &[&str]) -> bool {
    let essence = essence(content_type);
    allowed.iter().any(|t| *t == essence)
}

/// File extension used when storing an object of this type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let ext = match essence(content_type).as_str() {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "video/mp4" => "mp4",
        _ => return None,
    };
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_allow_list() {
        assert!(is_allowed("image/jpeg", AVATAR_TYPES));
        assert!(is_allowed("Image/PNG; charset=binary", AVATAR_TYPES));
        assert!(!is_allowed("image/gif", AVATAR_TYPES));
        assert!(!is_allowed("text/plain", AVATAR_TYPES));
    }

    #[test]
    fn test_post_media_allows_video() {
        assert!(is_allowed("video/mp4", POST_MEDIA_TYPES));
        assert!(!is_allowed("application/pdf", POST_MEDIA_TYPES));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("video/mp4"), Some("mp4"));
        assert_eq!(extension_for("application/zip"), None);
    }
}
