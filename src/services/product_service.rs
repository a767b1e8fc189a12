use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::{
    database::ProductStore,
    models::{CreateProductRequest, DeleteOutcome, NewProduct, Product, ProductChanges, UpdateOutcome},
    utils::AppError,
};

pub struct ProductService {
    products: Arc<dyn ProductStore>,
}

fn check_id(id: &str) -> Result<(), AppError> {
    ObjectId::parse_str(id).map(|_| ()).map_err(|_| AppError::InvalidId)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    pub async fn add(&self, owner_id: &str, request: CreateProductRequest) -> Result<Product, AppError> {
        let (Some(name), Some(price), Some(category), Some(company)) = (
            non_empty(request.name),
            non_empty(request.price),
            non_empty(request.category),
            non_empty(request.company),
        ) else {
            return Err(AppError::validation("All fields are required"));
        };

        self.products
            .insert(NewProduct {
                name,
                price,
                category,
                company,
                user_id: owner_id.to_string(),
            })
            .await
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.products.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Product>, AppError> {
        check_id(id)?;
        self.products.find_by_id(id).await
    }

    pub async fn update(&self, id: &str, changes: ProductChanges) -> Result<UpdateOutcome, AppError> {
        check_id(id)?;
        if changes.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        self.products.update(id, &changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome, AppError> {
        check_id(id)?;
        let deleted_count = self.products.delete(id).await?;
        Ok(DeleteOutcome { deleted_count })
    }

    pub async fn search(&self, key: &str) -> Result<Vec<Product>, AppError> {
        self.products.search(key).await
    }

    pub async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Product>, AppError> {
        self.products.list_by_owner(user_id).await
    }
}
