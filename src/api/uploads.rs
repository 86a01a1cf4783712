//! Image uploads, written to the upload directory and served under `/uploads`.

use std::future::Future;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::ApiError;

/// Name of the multipart field carrying the file.
pub const IMAGE_FIELD: &str = "image";

/// File extensions accepted for uploads. Files are served back by extension.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

pub const UNSUPPORTED_IMAGE: &str = "Only jpg, jpeg, png, gif or webp images are allowed";

/// An image written to disk but not yet referenced by any document.
#[derive(Debug)]
pub struct StoredImage {
    path: PathBuf,
    url: String,
}

impl StoredImage {
    /// Hands the public URL to `attach`. The file is removed again if that fails.
    pub async fn attach<T, E, F, Fut>(self, attach: F) -> Result<T, ApiError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        ApiError: From<E>,
    {
        match attach(self.url.clone()).await {
            Ok(value) => Ok(value),
            Err(e) => {
                self.discard().await;
                Err(e.into())
            }
        }
    }

    async fn discard(self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => info!(path = %self.path.display(), "Unreferenced image removed"),
            Err(e) => warn!(path = %self.path.display(), "Failed to remove image: {e}"),
        }
    }
}

/// Stores the `image` field of the form under a fresh name.
pub async fn save_image(dir: &Path, mut multipart: Multipart) -> Result<StoredImage, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let extension = image_extension(field.file_name(), field.content_type())
            .ok_or_else(|| ApiError::validation(UNSUPPORTED_IMAGE))?;
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(ApiError::validation("Image file is empty"));
        }

        tokio::fs::create_dir_all(dir).await?;
        let file_name = format!("{}.{extension}", Uuid::new_v4());
        let path = dir.join(&file_name);
        tokio::fs::write(&path, &bytes).await?;
        info!(file = %file_name, size = bytes.len(), "Image stored");

        return Ok(StoredImage {
            path,
            url: format!("/uploads/{file_name}"),
        });
    }

    Err(ApiError::validation("Image file is required"))
}

/// Extension to store the file under, or `None` when the part is not an allowed image.
///
/// The part must declare an `image/*` content type. The extension comes from the file
/// name, or from the content subtype when the name has none.
fn image_extension(file_name: Option<&str>, content_type: Option<&str>) -> Option<String> {
    let content_type = content_type?.to_ascii_lowercase();
    let subtype = content_type.strip_prefix("image/")?;

    let extension = match file_name.and_then(|name| Path::new(name).extension()) {
        Some(ext) => ext.to_str()?.to_ascii_lowercase(),
        None => subtype.to_string(),
    };

    IMAGE_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}
