//! Uploaded-file naming and content-type inference.

use uuid::Uuid;

/// Content type for a stored file, inferred from its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Build a collision-free stored name that keeps the original extension.
///
/// `field` prefixes the name so stored files stay recognisable on disk.
pub fn stored_file_name(field: &str, original: Option<&str>) -> String {
    let ext = original
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();
    let prefix: String = field
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    format!("{prefix}-{}{ext}", Uuid::new_v4().simple())
}

/// Reject names that could escape the upload directory.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_from_extension() {
        assert_eq!(content_type_for("brief.PDF"), "application/pdf");
        assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn stored_name_keeps_extension() {
        let name = stored_file_name("panCard", Some("My Scan.JPG"));
        assert!(name.starts_with("panCard-"));
        assert!(name.ends_with(".jpg"));
        assert!(is_safe_file_name(&name));
    }

    #[test]
    fn stored_name_drops_suspicious_extension() {
        let name = stored_file_name("file", Some("evil./../x"));
        assert!(!name.contains('/'));
        assert!(!name.contains('.'));
    }

    #[test]
    fn traversal_names_rejected() {
        assert!(!is_safe_file_name("../secrets"));
        assert!(!is_safe_file_name(".."));
        assert!(!is_safe_file_name("a\\b"));
        assert!(is_safe_file_name("report.pdf"));
    }
}
