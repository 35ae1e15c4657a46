//! Catalog storage seam
//!
//! Implemented by whichever backend owns categories and products.

use crate::{
    error::AppError,
    models::catalog::{
        Category, CategoryDraft, CategoryUpdate, PageRequest, Pagination, Product, ProductPage,
    },
};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    /// Fails with [`AppError::Validation`] when the title is taken.
    async fn insert_category(&self, draft: CategoryDraft) -> Result<Category, AppError>;

    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError>;

    async fn find_category_by_title(&self, title: &str) -> Result<Option<Category>, AppError>;

    async fn update_category(
        &self,
        id: Uuid,
        update: CategoryUpdate,
    ) -> Result<Option<Category>, AppError>;

    /// Returns the removed category
    async fn delete_category(&self, id: Uuid) -> Result<Option<Category>, AppError>;

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError>;

    async fn count_products(&self) -> Result<u64, AppError>;

    async fn fetch_products(&self, offset: u64, limit: u32) -> Result<Vec<Product>, AppError>;

    /// One page of products plus totals
    async fn list_products(&self, page: PageRequest) -> Result<ProductPage, AppError> {
        let (total, products) = tokio::try_join!(
            self.count_products(),
            self.fetch_products(page.offset(), page.limit)
        )?;

        Ok(ProductPage {
            products,
            pagination: Pagination::new(total, &page),
        })
    }
}
