use std::path::Path;

use crate::{error::AppError, storage::UploadedFile};

const IMAGE_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Extracts the file extension from a filename and converts it to lowercase.
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename) // treats string as filesystem path.
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Checks if a MIME type is one of the accepted image formats.
pub fn is_image_mime_type(mime_type: &str) -> bool {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    IMAGE_MIME_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(essence))
}

/// Reject files over `max_file_size` bytes.
pub fn check_file_size(file: &UploadedFile, max_file_size: u64) -> Result<(), AppError> {
    let size = file.data.len() as u64;
    if size > max_file_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size {} exceeds maximum limit of {} bytes",
            size, max_file_size
        )));
    }
    Ok(())
}

/// An uploaded image must declare an image content type and carry an image extension.
pub fn validate_image(file: &UploadedFile, max_file_size: u64) -> Result<(), AppError> {
    check_file_size(file, max_file_size)?;

    let content_type = file.content_type.as_deref().unwrap_or_default();
    if !is_image_mime_type(content_type) {
        return Err(AppError::UnsupportedMediaType(
            "Invalid file type. Only JPEG, PNG, GIF, and WebP are allowed".into(),
        ));
    }

    match get_file_extension(&file.file_name) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(AppError::UnsupportedMediaType(
            "Invalid file extension. Only .jpg, .jpeg, .png, .gif, and .webp are allowed".into(),
        )),
    }
}

/// Documents are accepted by extension against the configured allow-list.
pub fn validate_document(
    file: &UploadedFile,
    allowed_extensions: &[String],
    max_file_size: u64,
) -> Result<(), AppError> {
    check_file_size(file, max_file_size)?;

    let extension = get_file_extension(&file.file_name)
        .ok_or_else(|| AppError::BadRequest("Invalid file extension".into()))?;

    if !allowed_extensions.contains(&extension) {
        return Err(AppError::UnsupportedMediaType(format!(
            "File extension .{} is not allowed",
            extension
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn file(name: &str, content_type: Option<&str>, len: usize) -> UploadedFile {
        UploadedFile {
            file_name: name.into(),
            content_type: content_type.map(str::to_string),
            data: Bytes::from(vec![0u8; len]),
        }
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(get_file_extension("Cow.JPG").as_deref(), Some("jpg"));
        assert_eq!(get_file_extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(get_file_extension("README"), None);
    }

    #[test]
    fn image_mime_types() {
        assert!(is_image_mime_type("image/png"));
        assert!(is_image_mime_type("IMAGE/JPEG; charset=binary"));
        assert!(!is_image_mime_type("image/svg+xml"));
        assert!(!is_image_mime_type("application/pdf"));
    }

    #[test]
    fn image_needs_type_and_extension() {
        assert!(validate_image(&file("cow.png", Some("image/png"), 10), 100).is_ok());
        assert!(matches!(
            validate_image(&file("cow.png", Some("text/plain"), 10), 100),
            Err(AppError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            validate_image(&file("cow.bmp", Some("image/png"), 10), 100),
            Err(AppError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            validate_image(&file("cow.png", None, 10), 100),
            Err(AppError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn oversized_files_are_rejected() {
        assert!(matches!(
            validate_image(&file("cow.png", Some("image/png"), 101), 100),
            Err(AppError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn documents_follow_allow_list() {
        let allowed = vec!["pdf".to_string(), "docx".to_string()];
        assert!(validate_document(&file("Report.PDF", None, 10), &allowed, 100).is_ok());
        assert!(matches!(
            validate_document(&file("run.exe", None, 10), &allowed, 100),
            Err(AppError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            validate_document(&file("noext", None, 10), &allowed, 100),
            Err(AppError::BadRequest(_))
        ));
    }
}
