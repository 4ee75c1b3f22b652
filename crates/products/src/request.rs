use serde::Deserialize;

/// Inbound request body for product creation.
///
/// Exists only for the duration of the HTTP request and never carries an
/// identifier; the service assigns one. Price and quantity values are not
/// range-checked.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub price: f64,
    pub quantity: u32,
}
