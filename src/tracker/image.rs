// ABOUTME: Lossless data-URI encoding of meal photos for gateway submission
// ABOUTME: Derives the media type from the file extension and base64-encodes the bytes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! Image encoding
//!
//! The gateway contract carries the photo as a data URI so the image
//! survives JSON transport without a multipart layer. Base64 is lossless;
//! the bytes the model sees are exactly the bytes on disk.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::errors::{AppError, AppResult};

/// Encode an image file as a `data:<type>;base64,<payload>` URI
///
/// # Errors
///
/// Returns a validation error if the extension is not a supported image
/// type or the file cannot be read.
pub fn encode_data_uri(path: &Path) -> AppResult<String> {
    let media_type = media_type_for(path)?;
    let bytes = fs::read(path).map_err(|e| {
        AppError::invalid_input(format!("Failed to read image {}: {e}", path.display()))
    })?;
    Ok(format!("data:{media_type};base64,{}", STANDARD.encode(bytes)))
}

/// Media type from the file extension
fn media_type_for(path: &Path) -> AppResult<&'static str> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        "bmp" => Ok("image/bmp"),
        _ => Err(AppError::invalid_input(format!(
            "Unsupported image type for {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_encode_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meal.png");
        let payload = [0x89u8, 0x50, 0x4E, 0x47, 0x00, 0xFF, 0x7F];
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&payload).unwrap();

        let uri = encode_data_uri(&path).unwrap();
        let encoded = uri.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), payload);
    }

    #[test]
    fn test_jpeg_extension_variants() {
        assert_eq!(media_type_for(Path::new("a.jpg")).unwrap(), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.JPEG")).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(media_type_for(Path::new("notes.txt")).is_err());
        assert!(media_type_for(Path::new("noext")).is_err());
    }
}
