//! Avatar storage
//!
//! Decodes base64 avatar uploads (raw or `data:` URL), checks the image
//! signature and writes the file under `<upload_dir>/avatars/`.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::info;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;
pub const PUBLIC_PREFIX: &str = "/uploads/avatars";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
}

impl ImageKind {
    /// Detect from magic bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(ImageKind::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageKind::Jpeg)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageKind::Webp)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
            ImageKind::Webp => "webp",
        }
    }
}

/// Decode the payload and check size and image type
pub fn decode_avatar(payload: &str) -> AppResult<(Vec<u8>, ImageKind)> {
    let encoded = match payload.split_once(";base64,") {
        Some((header, data)) if header.starts_with("data:") => data,
        _ => payload,
    };

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AppError::BadRequest(format!("avatar is not valid base64: {}", e)))?;

    if bytes.is_empty() {
        return Err(AppError::BadRequest("avatar is empty".to_string()));
    }
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(AppError::BadRequest(format!(
            "avatar exceeds {} bytes",
            MAX_AVATAR_BYTES
        )));
    }

    let kind = ImageKind::sniff(&bytes)
        .ok_or_else(|| AppError::BadRequest("avatar must be a PNG, JPEG or WebP image".to_string()))?;

    Ok((bytes, kind))
}

/// Write the avatar and return its public URL
pub async fn store_avatar(upload_dir: &Path, user_id: Uuid, payload: &str) -> AppResult<String> {
    let (bytes, kind) = decode_avatar(payload)?;

    let dir: PathBuf = upload_dir.join("avatars");
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::Internal(format!("could not create upload directory: {}", e)))?;

    let file_name = format!("{}-{}.{}", user_id, Uuid::new_v4().simple(), kind.extension());
    tokio::fs::write(dir.join(&file_name), &bytes)
        .await
        .map_err(|e| AppError::Internal(format!("could not write avatar: {}", e)))?;

    info!("🖼️ Stored avatar {} ({} bytes)", file_name, bytes.len());
    Ok(format!("{}/{}", PUBLIC_PREFIX, file_name))
}

/// Delete a previously stored avatar. URLs outside `PUBLIC_PREFIX` are left
/// alone; returns whether a file was removed.
pub async fn remove_avatar(upload_dir: &Path, url: &str) -> std::io::Result<bool> {
    let Some(file_name) = url
        .strip_prefix(PUBLIC_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return Ok(false);
    };
    if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
        return Ok(false);
    }

    match tokio::fs::remove_file(upload_dir.join("avatars").join(file_name)).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_decode_data_url_png() {
        let payload = format!("data:image/png;base64,{}", STANDARD.encode(PNG_HEADER));
        let (bytes, kind) = decode_avatar(&payload).unwrap();
        assert_eq!(kind, ImageKind::Png);
        assert_eq!(bytes.len(), 8);
    }

    #[test]
    fn test_rejects_non_images() {
        let payload = STANDARD.encode(b"hello world");
        assert!(matches!(decode_avatar(&payload), Err(AppError::BadRequest(_))));
        assert!(decode_avatar("***").is_err());
    }

    #[tokio::test]
    async fn test_store_avatar_writes_file() {
        let dir = std::env::temp_dir().join(format!("avatar-test-{}", Uuid::new_v4()));
        let payload = STANDARD.encode([0xFF, 0xD8, 0xFF, 0xE0, 0, 0]);

        let url = store_avatar(&dir, Uuid::new_v4(), &payload).await.unwrap();
        assert!(url.starts_with("/uploads/avatars/"));
        assert!(url.ends_with(".jpg"));

        let file_name = url.rsplit('/').next().unwrap();
        assert!(dir.join("avatars").join(file_name).exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_remove_avatar_only_touches_stored_files() {
        let dir = std::env::temp_dir().join(format!("avatar-test-{}", Uuid::new_v4()));
        let url = store_avatar(&dir, Uuid::new_v4(), &STANDARD.encode(PNG_HEADER))
            .await
            .unwrap();
        let file_name = url.rsplit('/').next().unwrap().to_string();

        assert!(!remove_avatar(&dir, "https://cdn.example.com/me.png").await.unwrap());
        assert!(!remove_avatar(&dir, "/uploads/avatars/../secret").await.unwrap());
        assert!(remove_avatar(&dir, &url).await.unwrap());
        assert!(!dir.join("avatars").join(file_name).exists());
        assert!(!remove_avatar(&dir, &url).await.unwrap());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
