use actix_multipart::form::MultipartForm;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};

use crate::forms::products::CreateProductForm;
use crate::forms::search::{build_search_params, first_values};
use crate::routes::{INVALID_PRODUCT_ID, INVALID_REQUEST_BODY, encode, send_error};
use crate::services::ProductService;
use crate::services::products::{
    FAILED_TO_CREATE_PRODUCT, FAILED_TO_RETRIEVE_PRODUCT, FAILED_TO_SEARCH_PRODUCTS,
};

#[post("/products")]
/// Create a product from a multipart form carrying JSON data and images.
pub async fn create_product(
    service: web::Data<dyn ProductService>,
    MultipartForm(form): MultipartForm<CreateProductForm>,
) -> HttpResponse {
    let submission = match form.into_submission() {
        Ok(submission) => submission,
        Err(err) => {
            log::warn!("Rejected product creation request: {err}");
            return send_error(StatusCode::BAD_REQUEST, INVALID_REQUEST_BODY, err.to_string());
        }
    };

    match service.create_product(submission.product, submission.images) {
        Ok(product) => encode(StatusCode::CREATED, &product, "create_product"),
        Err(err) => {
            log::error!("Failed to create product: {err}");
            send_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                FAILED_TO_CREATE_PRODUCT,
                err.to_string(),
            )
        }
    }
}

#[get("/products/{id}")]
/// Fetch a single product by its numeric identifier.
///
/// Every service failure, including a missing product, is reported as 500.
pub async fn get_product(
    service: web::Data<dyn ProductService>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = match path.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            return send_error(StatusCode::BAD_REQUEST, INVALID_PRODUCT_ID, "Invalid product ID");
        }
    };

    match service.get_product(id) {
        Ok(product) => encode(StatusCode::OK, &product, "get_product"),
        Err(err) => {
            log::error!("Failed to get product {id}: {err}");
            send_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                FAILED_TO_RETRIEVE_PRODUCT,
                err.to_string(),
            )
        }
    }
}

#[get("/products/search")]
/// Search products; malformed filters are ignored rather than rejected.
///
/// A repeated parameter resolves to its first occurrence.
pub async fn search_products(
    service: web::Data<dyn ProductService>,
    web::Query(pairs): web::Query<Vec<(String, String)>>,
) -> HttpResponse {
    let params = build_search_params(&first_values(pairs));

    match service.search_products(&params) {
        Ok(products) => encode(StatusCode::OK, &products, "search_products"),
        Err(err) => {
            log::error!("Failed to search products: {err}");
            send_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                FAILED_TO_SEARCH_PRODUCTS,
                err.to_string(),
            )
        }
    }
}
