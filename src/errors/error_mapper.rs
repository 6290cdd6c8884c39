use blogsift_core::SiftError;
use std::io::ErrorKind;
use std::path::Path;

/// Map a loading error to user-friendly messages
/// Returns (title, message, details)
pub fn map_load_error(error: &SiftError, path: &Path) -> (String, String, String) {
    match error {
        SiftError::Io { source, .. } if source.kind() == ErrorKind::NotFound => (
            "File Not Found".to_string(),
            "The file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        ),
        SiftError::Io { source, .. } if source.kind() == ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        SiftError::Io { source, .. } => (
            "Error Reading File".to_string(),
            "Failed to read the file.".to_string(),
            format!("{}: {}", path.display(), source),
        ),
        SiftError::Json(err) => (
            "Invalid JSON".to_string(),
            "The file is not valid JSON.".to_string(),
            format!(
                "{} (line {}, column {})",
                path.display(),
                err.line(),
                err.column()
            ),
        ),
        SiftError::InvalidItems(reason) => (
            "Invalid Posts File".to_string(),
            "The posts file does not contain a list of posts.".to_string(),
            format!("{}: {}", path.display(), reason),
        ),
    }
}

/// Full report for a loading error: title, message, then details
pub fn load_error_report(error: &SiftError, path: &Path) -> String {
    let (title, message, details) = map_load_error(error, path);
    format!("{}\n{}\n\n{}", title, message, details)
}
