//! HTTP-backed implementations of the repository contracts.
//!
//! DESIGN
//! ======
//! Each service owns a clone of the [`HttpClient`](crate::http::HttpClient)
//! and nothing else. Field-name normalization lives in the domain wire
//! types, so services only pick the endpoint and the body shape.

pub mod api_key;
pub mod auth;
pub mod device;

pub use api_key::ApiKeyService;
pub use auth::AuthService;
pub use device::DeviceService;
