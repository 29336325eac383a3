//! Client-side checks that run before any network call.

use crate::domain::{ACCEPTED_MIME_TYPES, ImageKind, ImageUpload, LoginCredentials, Registration};
use crate::error::ValidationError;

/// Check an image's MIME type and size against the limits for `kind`.
pub fn validate_image(upload: &ImageUpload, kind: ImageKind) -> Result<(), ValidationError> {
    let mime = upload.mime_type.to_ascii_lowercase();
    if !ACCEPTED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(ValidationError::UnsupportedType(upload.mime_type.clone()));
    }
    if upload.is_empty() {
        return Err(ValidationError::EmptyFile);
    }
    if upload.len() > kind.max_bytes() {
        return Err(ValidationError::TooLarge {
            size: upload.len(),
            limit: kind.size_label(),
        });
    }
    Ok(())
}

pub fn validate_login(creds: &LoginCredentials) -> Result<(), ValidationError> {
    if creds.identifier().is_none() || creds.password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

pub fn validate_registration(reg: &Registration) -> Result<(), ValidationError> {
    if reg.password1 != reg.password2 {
        return Err(ValidationError::PasswordMismatch);
    }
    if reg.email.trim().is_empty() || reg.password1.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(len: usize) -> ImageUpload {
        ImageUpload::new("scene.png", "image/png", vec![0u8; len])
    }

    #[test]
    fn test_accepts_supported_types() {
        for mime in ACCEPTED_MIME_TYPES {
            let upload = ImageUpload::new("scene", mime, vec![1, 2, 3]);
            assert!(validate_image(&upload, ImageKind::SarImage).is_ok(), "{}", mime);
        }
        let upper = ImageUpload::new("scene.PNG", "IMAGE/PNG", vec![1]);
        assert!(validate_image(&upper, ImageKind::SarImage).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let gif = ImageUpload::new("anim.gif", "image/gif", vec![1]);
        assert_eq!(
            validate_image(&gif, ImageKind::SarImage),
            Err(ValidationError::UnsupportedType("image/gif".to_string()))
        );
    }

    #[test]
    fn test_size_ceilings() {
        assert!(validate_image(&png(50 * 1024 * 1024), ImageKind::SarImage).is_ok());
        assert!(matches!(
            validate_image(&png(50 * 1024 * 1024 + 1), ImageKind::SarImage),
            Err(ValidationError::TooLarge { limit: "50MB", .. })
        ));
        assert!(matches!(
            validate_image(&png(5 * 1024 * 1024 + 1), ImageKind::Avatar),
            Err(ValidationError::TooLarge { limit: "5MB", .. })
        ));
        assert_eq!(
            validate_image(&png(0), ImageKind::Avatar),
            Err(ValidationError::EmptyFile)
        );
    }

    #[test]
    fn test_login_requires_identifier_and_password() {
        assert!(validate_login(&LoginCredentials::with_email("a@b.com", "x")).is_ok());
        assert_eq!(
            validate_login(&LoginCredentials::with_email("a@b.com", "")),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(
            validate_login(&LoginCredentials {
                password: "x".to_string(),
                ..Default::default()
            }),
            Err(ValidationError::MissingCredentials)
        );
    }

    #[test]
    fn test_registration_checks() {
        let mut reg = Registration {
            email: "a@b.com".to_string(),
            password1: "secret".to_string(),
            password2: "secret".to_string(),
            ..Default::default()
        };
        assert!(validate_registration(&reg).is_ok());

        reg.password2 = "other".to_string();
        assert_eq!(
            validate_registration(&reg),
            Err(ValidationError::PasswordMismatch)
        );

        reg.password2 = "secret".to_string();
        reg.email = " ".to_string();
        assert_eq!(
            validate_registration(&reg),
            Err(ValidationError::MissingFields)
        );
    }
}
