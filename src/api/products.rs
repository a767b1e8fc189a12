use actix_web::{web, HttpResponse};

use crate::models::{
    CreateProductRequest, DeleteOutcome, IdentityClaim, Product, ProductChanges, UpdateOutcome,
};
use crate::services::{identity_service, ProductService};
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/add-product",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product stored", body = Product),
        (status = 400, description = "Missing fields")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_product(
    products: web::Data<ProductService>,
    claim: web::ReqData<IdentityClaim>,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let owner_id = identity_service::claimed_user_id(&claim)?;
    log::info!("➕ POST /add-product - owner: {}", owner_id);

    let product = products.add(&owner_id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products, or {result: \"No products found\"}", body = [Product])
    )
)]
pub async fn get_products(products: web::Data<ProductService>) -> Result<HttpResponse, AppError> {
    let all = products.list().await?;

    if all.is_empty() {
        return Ok(HttpResponse::Ok().json(serde_json::json!({ "result": "No products found" })));
    }
    Ok(HttpResponse::Ok().json(all))
}

#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product, or {result: \"No Record Found.\"}", body = Product),
        (status = 400, description = "Invalid product ID")
    )
)]
pub async fn get_product(
    products: web::Data<ProductService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    match products.get(&path).await? {
        Some(product) => Ok(HttpResponse::Ok().json(product)),
        None => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": "No Record Found." }))),
    }
}

#[utoipa::path(
    put,
    path = "/product/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductChanges,
    responses(
        (status = 200, description = "Update counts", body = UpdateOutcome),
        (status = 400, description = "Invalid product ID or empty update")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_product(
    products: web::Data<ProductService>,
    path: web::Path<String>,
    changes: web::Json<ProductChanges>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("✏️ PUT /product/{}", id);

    let outcome = products.update(&id, changes.into_inner()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    delete,
    path = "/product/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Delete count", body = DeleteOutcome),
        (status = 400, description = "Invalid product ID")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_product(
    products: web::Data<ProductService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️ DELETE /product/{}", id);

    let outcome = products.delete(&id).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    get,
    path = "/search/{key}",
    tag = "Products",
    params(("key" = String, Path, description = "Matched case-insensitively against name, company and category")),
    responses(
        (status = 200, description = "Matching products", body = [Product])
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_products(
    products: web::Data<ProductService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let found = products.search(&path).await?;
    Ok(HttpResponse::Ok().json(found))
}

#[utoipa::path(
    get,
    path = "/user-products/{user_id}",
    tag = "Products",
    params(("user_id" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Products owned by the user", body = [Product])
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn user_products(
    products: web::Data<ProductService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let owned = products.list_by_owner(&path).await?;
    Ok(HttpResponse::Ok().json(owned))
}
