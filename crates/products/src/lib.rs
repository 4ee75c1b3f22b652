//! Product creation service.
//!
//! Validates nothing beyond JSON shape (deliberately: values are passed
//! through as received), assigns a server-side [`common::ProductId`], builds
//! a [`common::ProductCreatedEvent`], and publishes it either
//! fire-and-forget or blocking-until-acknowledged.

pub mod request;
pub mod service;

pub use broker::PublishError;
pub use request::CreateProductRequest;
pub use service::ProductService;

/// Topic the product creation flow publishes to.
pub const PRODUCT_CREATED_TOPIC: &str = "product-created-events-topic";
