//! ChatApp web front end.
//!
//! A server-rendered client for a hosted chat backend: visitors log in,
//! register or request a password reset, then talk to an AI assistant whose
//! replies are rendered as Markdown.
//!
//! # Architecture
//!
//! - **Server**: Axum router serving Leptos SSR pages as plain HTML forms
//! - **API**: reqwest client for the backend's `auth` and `chats` endpoints
//! - **Session**: bearer token and user in cookies; per-token transcripts
//!   held in memory with optimistic sends
//!
//! # Modules
//!
//! - [`api`]: Backend client and wire types
//! - [`config`]: Layered configuration (defaults, file, env, CLI)
//! - [`routes`]: Page and form handlers
//! - [`session`]: Credentials and transcripts
//! - [`ui`]: Leptos components

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]
#![allow(clippy::needless_pass_by_value)]

pub mod api;
pub mod config;
pub mod error;
pub mod markdown;
pub mod routes;
pub mod server;
pub mod session;
pub mod ui;
pub mod validation;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::session::TranscriptStore;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Client for the chat backend.
    pub api: ApiClient,
    /// Per-token chat transcripts.
    pub transcripts: TranscriptStore,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state from configuration, creating the backend client.
    pub fn new(config: Arc<AppConfig>) -> api::Result<Self> {
        let api = ApiClient::new(&config.backend.base_url, config.backend.timeout())?;
        Ok(Self::with_client(config, api))
    }

    /// Build state around an existing client.
    pub fn with_client(config: Arc<AppConfig>, api: ApiClient) -> Self {
        Self {
            api,
            transcripts: TranscriptStore::new(),
            config,
        }
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.config.session.secure_cookies
    }
}
