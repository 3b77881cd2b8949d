//! Category CRUD operations.

use std::sync::Arc;

use tracing::info;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::types::{Filter, ListQuery, Message};
use catalog_database::repositories::CategoryRepository;
use catalog_entity::category::{Category, CreateCategory, UpdateCategory};

/// Manages categories.
#[derive(Debug, Clone)]
pub struct CategoryService {
    /// Category repository.
    repo: Arc<CategoryRepository>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(repo: Arc<CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Lists categories.
    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Category>> {
        self.repo.list(query).await
    }

    /// Counts categories matching a filter.
    pub async fn count(&self, filter: &Filter) -> AppResult<i64> {
        self.repo.count(filter).await
    }

    /// Finds a category by id. Empty when it does not exist.
    pub async fn find(&self, id: i64) -> AppResult<Vec<Category>> {
        self.repo.find_by_id(id).await
    }

    /// Adds a category under the next free id.
    pub async fn add(&self, input: CreateCategory) -> AppResult<Message> {
        let category = self.repo.create(&input).await?;
        info!(category_id = category.id, name = %category.name, "Category added");
        Ok(Message::success(format!("{} Category Added", category.name)))
    }

    /// Overwrites a category's name and description, resetting its
    /// creation time. Empty strings are written as given.
    pub async fn update(&self, id: i64, input: UpdateCategory) -> AppResult<Message> {
        self.require_existing(id).await?;

        let category = self
            .repo
            .update(id, &input)
            .await?
            .ok_or_else(|| missing(id))?;

        info!(category_id = id, "Category updated");
        Ok(Message::success(format!("{} Category Updated.", category.name)))
    }

    /// Deletes a category. Fails with a conflict while items still use it.
    pub async fn delete(&self, id: i64) -> AppResult<Message> {
        self.require_existing(id).await?;

        if !self.repo.delete(id).await? {
            return Err(missing(id));
        }

        info!(category_id = id, "Category deleted");
        Ok(Message::success("Category Deleted Successfully."))
    }

    async fn require_existing(&self, id: i64) -> AppResult<()> {
        if self.repo.find_by_id(id).await?.is_empty() {
            return Err(missing(id));
        }
        Ok(())
    }
}

fn missing(id: i64) -> AppError {
    AppError::not_found(format!("Category {id} does not exist, add it first"))
}
