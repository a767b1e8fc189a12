use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use super::{MongoDB, PRODUCTS};
use crate::models::{NewProduct, Product, ProductChanges, UpdateOutcome};
use crate::utils::AppError;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: NewProduct) -> Result<Product, AppError>;

    async fn list(&self) -> Result<Vec<Product>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError>;

    async fn update(&self, id: &str, changes: &ProductChanges) -> Result<UpdateOutcome, AppError>;

    /// Number of records removed.
    async fn delete(&self, id: &str) -> Result<u64, AppError>;

    /// Case-insensitive substring match over name, company and category.
    async fn search(&self, key: &str) -> Result<Vec<Product>, AppError>;

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Product>, AppError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    // Records were saved unvalidated, so any of these may be absent.
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    company: String,
    #[serde(rename = "userId", default)]
    user_id: String,
}

impl ProductDocument {
    fn into_product(self) -> Option<Product> {
        Some(Product {
            id: self.id?.to_hex(),
            name: self.name,
            price: self.price,
            category: self.category,
            company: self.company,
            user_id: self.user_id,
        })
    }
}

pub struct MongoProductStore {
    collection: Collection<ProductDocument>,
}

impl MongoProductStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            collection: db.collection::<ProductDocument>(PRODUCTS),
        }
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Product>, AppError> {
        let documents: Vec<ProductDocument> = self.collection.find(filter).await?.try_collect().await?;
        Ok(documents.into_iter().filter_map(ProductDocument::into_product).collect())
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn insert(&self, product: NewProduct) -> Result<Product, AppError> {
        let object_id = ObjectId::new();
        let document = ProductDocument {
            id: Some(object_id),
            name: product.name,
            price: product.price,
            category: product.category,
            company: product.company,
            user_id: product.user_id,
        };

        self.collection.insert_one(&document).await?;

        Ok(Product {
            id: object_id.to_hex(),
            name: document.name,
            price: document.price,
            category: document.category,
            company: document.company,
            user_id: document.user_id,
        })
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.find_many(doc! {}).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let found = self.collection.find_one(doc! { "_id": object_id }).await?;
        Ok(found.and_then(ProductDocument::into_product))
    }

    async fn update(&self, id: &str, changes: &ProductChanges) -> Result<UpdateOutcome, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(UpdateOutcome { matched_count: 0, modified_count: 0 });
        };

        let set = mongodb::bson::to_document(changes)
            .map_err(|e| AppError::Database(e.into()))?;

        let result = self
            .collection
            .update_one(doc! { "_id": object_id }, doc! { "$set": set })
            .await?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete(&self, id: &str) -> Result<u64, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(0);
        };

        let result = self.collection.delete_one(doc! { "_id": object_id }).await?;
        Ok(result.deleted_count)
    }

    async fn search(&self, key: &str) -> Result<Vec<Product>, AppError> {
        let pattern = regex::escape(key);
        let filter = doc! {
            "$or": [
                { "name": { "$regex": pattern.as_str(), "$options": "i" } },
                { "company": { "$regex": pattern.as_str(), "$options": "i" } },
                { "category": { "$regex": pattern.as_str(), "$options": "i" } }
            ]
        };

        self.find_many(filter).await
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Product>, AppError> {
        self.find_many(doc! { "userId": user_id }).await
    }
}
