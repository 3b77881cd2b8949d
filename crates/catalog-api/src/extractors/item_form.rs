//! Multipart bodies for item creation and image replacement.
//!
//! The image travels as a file part and is spooled into a temporary file
//! owned by the request. The item service only ever sees that file's path,
//! so a client cannot make the server publish a file of its choosing.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartRejection;
use tempfile::NamedTempFile;
use tracing::debug;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;

/// Name of the file part carrying the image.
pub const IMAGE_PART: &str = "image";

/// An uploaded image written to a temporary file. The file is removed when
/// this value is dropped.
#[derive(Debug)]
pub struct SpooledImage {
    file: NamedTempFile,
    size: usize,
}

impl SpooledImage {
    /// Write `data` to a fresh temporary file.
    pub async fn spool(data: Bytes) -> AppResult<Self> {
        if data.is_empty() {
            return Err(AppError::validation("Image file is empty"));
        }
        let size = data.len();
        let file = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
            let mut file = tempfile::Builder::new()
                .prefix("catalog-upload-")
                .suffix(".jpg")
                .tempfile()?;
            file.write_all(&data)?;
            file.flush()?;
            Ok(file)
        })
        .await
        .map_err(|e| AppError::internal(format!("Image spooling task failed: {e}")))??;

        debug!(path = %file.path().display(), size, "Spooled uploaded image");
        Ok(Self { file, size })
    }

    /// Location of the spooled bytes.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Text parts by name, plus the image part if one was sent.
#[derive(Debug, Default)]
pub struct ItemForm {
    fields: HashMap<String, String>,
    image: Option<SpooledImage>,
}

impl ItemForm {
    /// Drain a multipart body. Anything other than `multipart/form-data`
    /// is a validation error.
    pub async fn read(multipart: Result<Multipart, MultipartRejection>) -> AppResult<Self> {
        let mut multipart = multipart.map_err(|e| {
            AppError::validation(format!("Expected a multipart/form-data body: {e}"))
        })?;

        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == IMAGE_PART {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read image: {e}")))?;
                form.image = Some(SpooledImage::spool(data).await?);
            } else if !name.is_empty() {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid {name} field: {e}")))?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    /// A text part, if sent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A text part that must be present.
    pub fn required(&self, name: &str) -> AppResult<&str> {
        self.text(name)
            .ok_or_else(|| AppError::validation(format!("{name} is required")))
    }

    /// Take the image part, which must be present.
    pub fn take_image(&mut self) -> AppResult<SpooledImage> {
        self.image
            .take()
            .ok_or_else(|| AppError::validation(format!("An '{IMAGE_PART}' file part is required")))
    }
}
