//! Request DTOs with validation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use catalog_core::error::AppError;
use catalog_entity::category::{CreateCategory, UpdateCategory};
use catalog_entity::item::{CreateItem, UpdateItem};

use crate::extractors::ItemForm;

/// Run the derived validation rules on a request body.
pub fn validated<T: Validate>(request: T) -> Result<T, AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;
    Ok(request)
}

/// Create category request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Category name.
    #[validate(length(min = 1, max = 255, message = "Category name is required"))]
    pub name: String,
    /// Description.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
}

impl From<CreateCategoryRequest> for CreateCategory {
    fn from(req: CreateCategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

/// Update category request. Both fields are written as given, empty or not.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    /// New name.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,
    /// New description.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
}

impl From<UpdateCategoryRequest> for UpdateCategory {
    fn from(req: UpdateCategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

/// Text parts of the multipart create-item form. The image itself arrives
/// as a file part.
#[derive(Debug, Clone, Validate)]
pub struct CreateItemRequest {
    /// Item title.
    #[validate(length(min = 1, max = 255, message = "Item title is required"))]
    pub title: String,
    /// Description.
    #[validate(length(max = 2000))]
    pub description: String,
    /// Image alternative text.
    #[validate(length(max = 500))]
    pub alt_text: String,
    /// Category to file the item under.
    #[validate(range(min = 1))]
    pub category_id: i64,
}

impl TryFrom<&ItemForm> for CreateItemRequest {
    type Error = AppError;

    fn try_from(form: &ItemForm) -> Result<Self, AppError> {
        let category_id = form.required("category_id")?;
        let category_id = category_id.trim().parse::<i64>().map_err(|_| {
            AppError::validation(format!("category_id must be an integer, got '{category_id}'"))
        })?;

        Ok(Self {
            title: form.required("title")?.to_string(),
            description: form.text("description").unwrap_or_default().to_string(),
            alt_text: form.text("alt_text").unwrap_or_default().to_string(),
            category_id,
        })
    }
}

impl CreateItemRequest {
    /// The item to create, with its image read from `image_path`.
    pub fn into_item(self, image_path: &Path) -> CreateItem {
        CreateItem {
            title: self.title,
            description: self.description,
            image_path: image_path.to_path_buf(),
            alt_text: self.alt_text,
            category_id: self.category_id,
        }
    }
}

/// Update item request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateItemRequest {
    /// New title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// New description.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    /// Replacement category.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub category_id: Option<i64>,
}

impl From<UpdateItemRequest> for UpdateItem {
    fn from(req: UpdateItemRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            category_id: req.category_id,
        }
    }
}

/// Text parts of the multipart replace-image form.
#[derive(Debug, Clone, Validate)]
pub struct UpdateItemImageRequest {
    /// Image alternative text.
    #[validate(length(max = 500))]
    pub alt_text: Option<String>,
}

impl From<&ItemForm> for UpdateItemImageRequest {
    fn from(form: &ItemForm) -> Self {
        Self {
            alt_text: form.text("alt_text").map(str::to_string),
        }
    }
}
