//! Client for the chat backend REST API.
//!
//! The backend owns users and chat history; this module wraps it with a
//! typed [`ApiClient`] that knows the base URL, injects the bearer token on
//! authenticated calls and maps response statuses into [`ApiError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use chatapp_web::api::ApiClient;
//!
//! # async fn example() -> Result<(), chatapp_web::api::ApiError> {
//! let client = ApiClient::new("http://localhost:5000/api", Duration::from_secs(30))?;
//! let login = client.auth().login("ada@example.com", "secret").await?;
//! let chats = client.chats(&login.token).list().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::{ApiClient, AuthApi, ChatsApi};
pub(crate) use client::encode_path_segment;
pub use error::{ApiError, Result};
pub use types::*;
