pub mod error;
pub mod rest;

pub use error::ApiClientError;
pub use rest::RestClient;
