use actix_multipart::form::{MultipartFormConfig, text::TextConfig};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, error::InternalError, web};
use serde::{Deserialize, Serialize};

pub mod products;

/// Total size ceiling for a multipart request body.
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// The request body could not be decoded or failed validation.
pub const INVALID_REQUEST_BODY: &str = "invalid-request-body";
/// The product identifier in the path is not a 64-bit integer.
pub const INVALID_PRODUCT_ID: &str = "invalid-product-id";
/// The successful result could not be serialised.
pub const FAILED_TO_ENCODE_PRODUCT: &str = "failed-to-encode-product";

/// Uniform error envelope returned with every 4xx/5xx response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Build an error envelope response.
pub fn send_error(status: StatusCode, code: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        code: code.to_string(),
        message: message.into(),
    })
}

/// Serialise `value` as the JSON body; report encoding failures with their own code.
pub fn encode<T: Serialize>(status: StatusCode, value: &T, operation: &str) -> HttpResponse {
    match serde_json::to_vec(value) {
        Ok(body) => HttpResponse::build(status)
            .content_type("application/json")
            .body(body),
        Err(err) => {
            log::error!("Failed to encode response of {operation}: {err}");
            send_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                FAILED_TO_ENCODE_PRODUCT,
                err.to_string(),
            )
        }
    }
}

/// Multipart limits shared by the upload endpoints. Framing failures,
/// including bodies over [`MAX_UPLOAD_SIZE`], become a 400 envelope.
pub fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(MAX_UPLOAD_SIZE)
        .memory_limit(MAX_UPLOAD_SIZE)
        .error_handler(|err, _req| {
            log::warn!("Rejected multipart request: {err}");
            let response = send_error(
                StatusCode::BAD_REQUEST,
                INVALID_REQUEST_BODY,
                "Failed to parse multipart form",
            );
            InternalError::from_response(err, response).into()
        })
}

/// Register the product endpoints. Search goes first so it is not captured by `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(multipart_config())
        .app_data(TextConfig::default().validate_content_type(false))
        .service(products::search_products)
        .service(products::get_product)
        .service(products::create_product);
}
