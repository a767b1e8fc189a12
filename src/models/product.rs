use serde::{Deserialize, Serialize};

/// Catalog entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub company: String,
    #[serde(rename = "userId")]
    pub user_id: String,  // owner, taken from the creator's token
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: String,
    pub category: String,
    pub company: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub company: Option<String>,
}

/// Partial update; only the fields present are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.category.is_none() && self.company.is_none()
    }

    pub fn apply(&self, product: &mut Product) -> bool {
        let mut modified = false;
        let fields = [
            (&self.name, &mut product.name),
            (&self.price, &mut product.price),
            (&self.category, &mut product.category),
            (&self.company, &mut product.company),
        ];
        for (change, field) in fields {
            if let Some(value) = change {
                if field != value {
                    *field = value.clone();
                    modified = true;
                }
            }
        }
        modified
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}
