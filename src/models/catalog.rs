//! Catalog models
//!
//! Categories and products are owned by an external catalog backend; these
//! types describe what that backend stores and how product listings page.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub icon: Option<String>,
    pub slug: String,
    pub description: String,
    pub seo_words: Vec<String>,
    pub is_active: bool,
}

impl Category {
    /// New categories start active with a slug derived from the title
    pub fn from_draft(id: Uuid, draft: CategoryDraft) -> Self {
        Self {
            id,
            slug: slugify(&draft.title),
            title: draft.title,
            icon: draft.icon,
            description: draft.description,
            seo_words: draft.seo_words,
            is_active: true,
        }
    }

    pub fn apply(&mut self, update: CategoryUpdate) {
        if let Some(title) = update.title {
            self.slug = slugify(&title);
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if update.icon.is_some() {
            self.icon = update.icon;
        }
        if let Some(seo_words) = update.seo_words {
            self.seo_words = seo_words;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryDraft {
    pub title: String,
    pub icon: Option<String>,
    pub description: String,
    pub seo_words: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub seo_words: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductProperty {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub category_id: Uuid,
    pub slug: String,
    pub size: f64,
    pub properties: Vec<ProductProperty>,
    pub seo_words: Vec<String>,
    /// Path of the uploaded image, relative to the upload directory
    pub image: Option<String>,
    pub is_active: bool,
    pub colors: Vec<String>,
}

/// Trim, join whitespace runs with `-`, lowercase
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Page selector for product listings, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_products: u64,
    pub current_page: u32,
    pub total_page: u64,
    pub page_size: u32,
}

impl Pagination {
    pub fn new(total_products: u64, page: &PageRequest) -> Self {
        let limit = u64::from(page.limit.max(1));
        Self {
            total_products,
            current_page: page.page,
            total_page: total_products.div_ceil(limit),
            page_size: page.limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}
