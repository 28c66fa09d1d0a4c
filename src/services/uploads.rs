//! Profile and banner image uploads.

use std::path::Path;

use tracing::{debug, info};

use crate::context::ServiceContext;
use crate::error::AppError;
use crate::ports::{AuthUser, Bucket};

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Extension used when the original file name has none.
const DEFAULT_EXTENSION: &str = "jpg";

/// A received file, before validation.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    /// Original file name from the form.
    pub file_name: Option<String>,
    /// Declared content type.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// The raw multipart fields of an upload request.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    /// The `file` field.
    pub file: Option<ImageUpload>,
    /// The `bucket` field.
    pub bucket: Option<String>,
    /// The `userId` field.
    pub user_id: Option<String>,
}

/// A form that passed the payload checks.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    /// Target bucket.
    pub bucket: Bucket,
    /// Claimed owner.
    pub user_id: String,
    /// The image.
    pub file: ImageUpload,
}

/// Checks the payload: required fields, bucket, content type, then size.
///
/// Runs before authentication so malformed requests get a 400 regardless of
/// credentials.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] describing the first failed check.
pub fn validate_upload(form: UploadForm) -> Result<ValidatedUpload, AppError> {
    let (Some(file), Some(bucket), Some(user_id)) = (form.file, form.bucket, form.user_id) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };
    let bucket = bucket
        .parse::<Bucket>()
        .map_err(|_| AppError::BadRequest("Invalid bucket".to_string()))?;
    if !file.content_type.starts_with("image/") {
        return Err(AppError::BadRequest("File must be an image".to_string()));
    }
    if file.bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest("File size must be less than 5MB".to_string()));
    }

    Ok(ValidatedUpload { bucket, user_id, file })
}

/// Object path for `user_id`'s image: `{user_id}.{ext}`.
#[must_use]
pub fn object_path(user_id: &str, file_name: Option<&str>) -> String {
    let ext = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map_or_else(|| DEFAULT_EXTENSION.to_string(), str::to_ascii_lowercase);
    format!("{user_id}.{ext}")
}

/// Replaces the caller's image in the target bucket and returns its public URL.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] when `user` is not the upload's
/// owner, or [`AppError::Backend`] when the upload fails.
pub async fn store_image(
    ctx: &ServiceContext,
    user: &AuthUser,
    upload: ValidatedUpload,
) -> Result<String, AppError> {
    if upload.user_id != user.id {
        return Err(AppError::unauthorized());
    }

    let path = object_path(&upload.user_id, upload.file.file_name.as_deref());
    if let Err(e) = ctx.storage.remove(upload.bucket, &path).await {
        debug!("Ignoring failed removal of {}/{path}: {e}", upload.bucket);
    }
    ctx.storage
        .upload(upload.bucket, &path, upload.file.bytes, &upload.file.content_type)
        .await?;

    info!(bucket = %upload.bucket, path = %path, "Stored image");
    Ok(ctx.storage.public_url(upload.bucket, &path))
}
