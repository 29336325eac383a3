use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::ClientError;

/// MIME types accepted for SAR images and avatars.
pub const ACCEPTED_MIME_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/tiff",
    "image/tif",
];

const MIB: usize = 1024 * 1024;

/// What an uploaded image is for; decides the size ceiling and form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    SarImage,
    Avatar,
}

impl ImageKind {
    pub const fn max_bytes(self) -> usize {
        match self {
            ImageKind::SarImage => 50 * MIB,
            ImageKind::Avatar => 5 * MIB,
        }
    }

    pub const fn size_label(self) -> &'static str {
        match self {
            ImageKind::SarImage => "50MB",
            ImageKind::Avatar => "5MB",
        }
    }

    /// Multipart field name the backend expects.
    pub const fn form_field(self) -> &'static str {
        match self {
            ImageKind::SarImage => "image",
            ImageKind::Avatar => "avatar",
        }
    }
}

/// An image file ready to be uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Build an upload from a path, inferring the MIME type from the extension.
    ///
    /// Unknown extensions get `application/octet-stream`, which validation
    /// rejects.
    pub fn from_path_bytes(path: &Path, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = mime_for_path(path).unwrap_or("application/octet-stream");
        Self::new(file_name, mime_type, bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// MIME type for a supported image extension.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

/// Colorized PNG returned by the prediction endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorizedImage {
    pub png: Vec<u8>,
}

impl ColorizedImage {
    pub fn from_base64(encoded: &str) -> Result<Self, ClientError> {
        let png = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ClientError::Decode(format!("colorized image is not base64: {}", e)))?;
        Ok(Self { png })
    }

    /// `data:` URL suitable for embedding the result in HTML.
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

impl std::fmt::Debug for ColorizedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorizedImage")
            .field("len", &self.png.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("scene.TIF")), Some("image/tiff"));
        assert_eq!(mime_for_path(Path::new("a/b/scene.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("scene.gif")), None);
        assert_eq!(mime_for_path(Path::new("scene")), None);
    }

    #[test]
    fn test_from_path_bytes_unknown_extension() {
        let upload = ImageUpload::from_path_bytes(Path::new("/tmp/notes.txt"), vec![1]);
        assert_eq!(upload.file_name, "notes.txt");
        assert_eq!(upload.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_colorized_image_decode() {
        let image = ColorizedImage::from_base64("iVBORw0KGgo=").unwrap();
        assert_eq!(&image.png[..4], &[0x89, b'P', b'N', b'G']);
        assert_eq!(image.to_data_url(), "data:image/png;base64,iVBORw0KGgo=");

        assert!(matches!(
            ColorizedImage::from_base64("not base64!"),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn test_kind_limits() {
        assert_eq!(ImageKind::SarImage.max_bytes(), 52_428_800);
        assert_eq!(ImageKind::Avatar.max_bytes(), 5_242_880);
        assert_eq!(ImageKind::Avatar.form_field(), "avatar");
    }
}
