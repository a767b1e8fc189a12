pub mod products;
pub mod users;

#[cfg(test)]
pub mod memory;

pub use products::{MongoProductStore, ProductStore};
pub use users::{MongoUserStore, UserStore};

use mongodb::{Client, Collection, Database};
use std::error::Error;

pub const USERS: &str = "users";
pub const PRODUCTS: &str = "products";

const DEFAULT_DB_NAME: &str = "e-comm";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        let db = client.database(database_name(uri));

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// The unique email index is what rejects a racing duplicate registration.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<mongodb::bson::Document>(USERS);

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        // Fails when the collection already holds duplicate emails.
        users.create_index(email_index).await?;
        log::info!("   ✅ Index ready: users(email) unique");

        let products = self.collection::<mongodb::bson::Document>(PRODUCTS);

        let owner_index = IndexModel::builder()
            .keys(doc! { "userId": 1 })
            .build();

        match products.create_index(owner_index).await {
            Ok(_) => log::info!("   ✅ Index ready: products(userId)"),
            Err(e) => log::debug!("   ℹ️  Index not created: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    #[cfg(test)]
    async fn ping(&self) -> bool {
        self.db.list_collection_names().await.is_ok()
    }
}

/// Database name from the URI path, e.g. `mongodb://host:27017/e-comm?retryWrites=true`.
fn database_name(uri: &str) -> &str {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);

    without_scheme
        .split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DB_NAME)
}
