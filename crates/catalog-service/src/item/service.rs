//! Item operations and the write coordinator.
//!
//! Creating an item touches three tables and the image store. The rows are
//! written in one transaction that commits only after the upload
//! succeeded, so an item is never left without its image. The uploaded
//! object is not removed if the final commit fails; re-adding the item
//! overwrites it under the new id's name.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::storage::{ImageUploader, UploadStatus};
use catalog_core::types::{Filter, ListQuery, Message};
use catalog_database::error::db_error;
use catalog_database::repositories::ItemRepository;
use catalog_entity::item::{CreateItem, ItemDetail, ItemSummary, UpdateItem, image_filename};

/// Alt text recorded when an image is replaced without one.
pub const DEFAULT_IMAGE_ALT_TEXT: &str = "Updated via catalog console";

/// Manages items, their category links, and their images.
#[derive(Debug, Clone)]
pub struct ItemService {
    /// Item repository.
    repo: Arc<ItemRepository>,
    /// Image storage backend.
    uploader: Arc<dyn ImageUploader>,
}

impl ItemService {
    /// Creates a new item service.
    pub fn new(repo: Arc<ItemRepository>, uploader: Arc<dyn ImageUploader>) -> Self {
        Self { repo, uploader }
    }

    /// Lists items with their representative category and image.
    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<ItemSummary>> {
        self.repo.list(query).await
    }

    /// Counts item listing rows matching a filter.
    pub async fn count(&self, filter: &Filter) -> AppResult<i64> {
        self.repo.count(filter).await
    }

    /// Finds an item with its categories and images. Empty when it does
    /// not exist.
    pub async fn find(&self, id: i64) -> AppResult<Vec<ItemDetail>> {
        self.repo.find_by_id(id).await
    }

    /// Adds an item linked to one category, uploading its image as
    /// `{id}.jpg`.
    ///
    /// A rejected upload rolls every row back and is reported as a failure
    /// message. Database errors roll back and are returned as errors.
    pub async fn add_item(&self, input: CreateItem) -> AppResult<Message> {
        const ORIGIN: &str = "item_service::add_item";

        let mut tx = self.repo.begin().await?;
        let item = self
            .repo
            .insert_item(&mut tx, &input.title, &input.description)
            .await?;
        self.repo
            .insert_link(&mut tx, item.id, input.category_id)
            .await?;

        let filename = image_filename(item.id);
        let status = self
            .upload_image(ORIGIN, item.id, &input.image_path, &filename)
            .await?;

        if let UploadStatus::Failed {
            status_code,
            reason,
        } = status
        {
            tx.rollback()
                .await
                .map_err(|e| db_error(ORIGIN, "Failed to roll back item", e))?;
            warn!(
                origin = ORIGIN,
                item_id = item.id,
                status_code,
                %reason,
                "Image upload failed, item rolled back"
            );
            return Ok(Message::failure(
                format!("{} was not added, please check exception messages", input.title),
                ORIGIN,
                502,
            )
            .with_exception(reason));
        }

        let url = self.uploader.public_url(&filename);
        self.repo
            .insert_image(&mut tx, item.id, &url, &input.alt_text)
            .await?;
        tx.commit()
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to commit item", e))?;

        info!(item_id = item.id, category_id = input.category_id, %url, "Item added");
        Ok(Message::success(format!(
            "{} Item added successfully",
            input.title
        )))
    }

    /// Overwrites an item's title and description. When a category is
    /// given, the item's links are replaced by a single link to it.
    pub async fn update_item(&self, id: i64, input: UpdateItem) -> AppResult<Message> {
        const ORIGIN: &str = "item_service::update_item";

        let mut tx = self.repo.begin().await?;
        if self.repo.lock(&mut tx, id).await?.is_none() {
            return Err(missing(id));
        }

        self.repo
            .update_item(&mut tx, id, &input.title, &input.description)
            .await?;
        if let Some(category_id) = input.category_id {
            self.repo.delete_links(&mut tx, id).await?;
            self.repo.insert_link(&mut tx, id, category_id).await?;
        }
        tx.commit()
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to commit item update", e))?;

        info!(item_id = id, category_id = input.category_id, "Item updated");
        Ok(Message::success(format!(
            "{} Item updated successfully",
            input.title
        )))
    }

    /// Uploads a replacement image for an item and records it.
    ///
    /// The object name stays `{id}.jpg`, so the public URL is unchanged.
    /// A rejected upload writes nothing.
    pub async fn update_item_image(
        &self,
        id: i64,
        image_path: &Path,
        alt_text: Option<&str>,
    ) -> AppResult<Message> {
        const ORIGIN: &str = "item_service::update_item_image";

        let mut tx = self.repo.begin().await?;
        if self.repo.lock(&mut tx, id).await?.is_none() {
            return Err(missing(id));
        }

        let filename = image_filename(id);
        match self.upload_image(ORIGIN, id, image_path, &filename).await? {
            UploadStatus::Uploaded => {}
            UploadStatus::Failed {
                status_code,
                reason,
            } => {
                warn!(origin = ORIGIN, item_id = id, status_code, %reason, "Image upload failed");
                return Ok(Message::failure(
                    "Image was not updated, please check for exceptions",
                    ORIGIN,
                    502,
                )
                .with_exception(reason));
            }
        }

        let url = self.uploader.public_url(&filename);
        let alt_text = alt_text.unwrap_or(DEFAULT_IMAGE_ALT_TEXT);
        self.repo.insert_image(&mut tx, id, &url, alt_text).await?;
        tx.commit()
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to commit item image", e))?;

        info!(item_id = id, %url, "Item image updated");
        Ok(Message::success("Image updated successfully"))
    }

    /// Deletes an item with its category links and images.
    ///
    /// The three deletes commit together. If any step fails nothing is
    /// removed and the failure is reported as a message rather than an
    /// error. Deleting an id with no item is a not-found error.
    pub async fn delete_item(&self, id: i64) -> AppResult<Message> {
        const ORIGIN: &str = "item_service::delete_item";

        match self.delete_rows(id).await {
            Ok(true) => {
                info!(item_id = id, "Item deleted");
                Ok(Message::success("Item Deleted Successfully."))
            }
            Ok(false) => Err(missing(id)),
            Err(e) => {
                error!(origin = ORIGIN, item_id = id, error = %e, "Item deletion rolled back");
                Ok(Message::failure(
                    "Item was not deleted successfully, please check exception message",
                    ORIGIN,
                    500,
                )
                .with_exception(e))
            }
        }
    }

    /// Upload `path` as `filename`. A rejection comes back as
    /// [`UploadStatus::Failed`]; an `Err` means the store could not be
    /// reached or the local file could not be read.
    async fn upload_image(
        &self,
        origin: &'static str,
        item_id: i64,
        path: &Path,
        filename: &str,
    ) -> AppResult<UploadStatus> {
        self.uploader.upload(path, filename).await.map_err(|e| {
            error!(origin, item_id, %filename, error = %e, "Image upload errored");
            e
        })
    }

    /// Returns whether an item row was removed. Dropping the transaction
    /// on any early return rolls it back.
    async fn delete_rows(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.repo.begin().await?;
        self.repo.delete_links(&mut tx, id).await?;
        self.repo.delete_images(&mut tx, id).await?;
        if self.repo.delete_item(&mut tx, id).await? == 0 {
            return Ok(false);
        }
        tx.commit()
            .await
            .map_err(|e| db_error("item_service::delete_item", "Failed to commit item deletion", e))?;
        Ok(true)
    }
}

fn missing(id: i64) -> AppError {
    AppError::not_found(format!("Item {id} does not exist"))
}
