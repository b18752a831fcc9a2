//! HTTP plumbing shared by every collection endpoint.

pub mod client;
pub mod context;
pub mod error;
pub mod session;

pub use client::ApiClient;
pub use context::{provide_api_client, use_api_client, use_api_context, ApiContext};
pub use error::ApiError;
pub use session::Session;
