//! 目录存储接口测试

use async_trait::async_trait;
use catalog_service::{
    error::AppError,
    models::catalog::{Category, CategoryDraft, CategoryUpdate, PageRequest, Product},
    repository::CatalogStore,
};
use std::sync::Mutex;
use uuid::Uuid;

/// 基于 Vec 的目录存储
#[derive(Default)]
struct VecCatalog {
    categories: Mutex<Vec<Category>>,
    products: Vec<Product>,
}

impl VecCatalog {
    fn with_products(count: usize) -> Self {
        let category_id = Uuid::new_v4();
        let products = (0..count)
            .map(|i| Product {
                id: Uuid::new_v4(),
                title: format!("Product {i}"),
                description: None,
                code: Some(format!("P-{i}")),
                category_id,
                slug: format!("product-{i}"),
                size: 1.0,
                properties: Vec::new(),
                seo_words: Vec::new(),
                image: None,
                is_active: true,
                colors: vec!["black".to_string()],
            })
            .collect();

        Self {
            products,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CatalogStore for VecCatalog {
    async fn insert_category(&self, draft: CategoryDraft) -> Result<Category, AppError> {
        let mut categories = self.categories.lock().unwrap();
        if categories.iter().any(|c| c.title == draft.title) {
            return Err(AppError::Validation(format!(
                "Category with title '{}' already exists.",
                draft.title
            )));
        }

        let category = Category::from_draft(Uuid::new_v4(), draft);
        categories.push(category.clone());
        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        Ok(self.categories.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_by_title(&self, title: &str) -> Result<Option<Category>, AppError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.title == title)
            .cloned())
    }

    async fn update_category(
        &self,
        id: Uuid,
        update: CategoryUpdate,
    ) -> Result<Option<Category>, AppError> {
        let mut categories = self.categories.lock().unwrap();
        Ok(categories.iter_mut().find(|c| c.id == id).map(|category| {
            category.apply(update);
            category.clone()
        }))
    }

    async fn delete_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let mut categories = self.categories.lock().unwrap();
        let index = categories.iter().position(|c| c.id == id);
        Ok(index.map(|i| categories.remove(i)))
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn count_products(&self) -> Result<u64, AppError> {
        Ok(self.products.len() as u64)
    }

    async fn fetch_products(&self, offset: u64, limit: u32) -> Result<Vec<Product>, AppError> {
        Ok(self
            .products
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[tokio::test]
async fn test_list_products_pages() {
    let store = VecCatalog::with_products(23);

    let first = store.list_products(PageRequest::default()).await.unwrap();
    assert_eq!(first.products.len(), 10);
    assert_eq!(first.products[0].title, "Product 0");
    assert_eq!(first.pagination.total_products, 23);
    assert_eq!(first.pagination.total_page, 3);
    assert_eq!(first.pagination.current_page, 1);

    let last = store.list_products(PageRequest::new(3, 10)).await.unwrap();
    assert_eq!(last.products.len(), 3);
    assert_eq!(last.products[0].title, "Product 20");

    let past_end = store.list_products(PageRequest::new(4, 10)).await.unwrap();
    assert!(past_end.products.is_empty());
    assert_eq!(past_end.pagination.total_page, 3);
}

#[tokio::test]
async fn test_list_products_empty_catalog() {
    let store = VecCatalog::default();

    let page = store.list_products(PageRequest::default()).await.unwrap();
    assert!(page.products.is_empty());
    assert_eq!(page.pagination.total_page, 0);
}

#[tokio::test]
async fn test_category_lifecycle() {
    let store = VecCatalog::default();

    let created = store
        .insert_category(CategoryDraft {
            title: "Summer Shoes".to_string(),
            seo_words: vec!["sandals".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.slug, "summer-shoes");
    assert!(created.is_active);

    let dup = store
        .insert_category(CategoryDraft {
            title: "Summer Shoes".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(dup, Err(AppError::Validation(_))));

    let found = store.find_category_by_title("Summer Shoes").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);

    let updated = store
        .update_category(
            created.id,
            CategoryUpdate {
                title: Some("Beach Shoes".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.slug, "beach-shoes");
    assert_eq!(updated.seo_words, vec!["sandals".to_string()]);

    let missing = store
        .update_category(Uuid::new_v4(), CategoryUpdate::default())
        .await
        .unwrap();
    assert!(missing.is_none());

    let removed = store.delete_category(created.id).await.unwrap().unwrap();
    assert_eq!(removed.title, "Beach Shoes");
    assert!(store.find_category(created.id).await.unwrap().is_none());
    assert!(store.list_categories().await.unwrap().is_empty());
}

#[test]
fn test_category_wire_format() {
    let draft: CategoryDraft =
        serde_json::from_str(r#"{"title":"Bags","seoWords":["leather"]}"#).unwrap();
    let category = Category::from_draft(Uuid::new_v4(), draft);

    let json = serde_json::to_value(&category).unwrap();
    assert_eq!(json["slug"], "bags");
    assert_eq!(json["seoWords"][0], "leather");
    assert_eq!(json["isActive"], true);
    assert!(json["icon"].is_null());
}
