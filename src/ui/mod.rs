//! UI components and layouts.
//!
//! Every page is rendered server-side with Leptos and works as plain HTML
//! forms; no client bundle is required.
//!
//! # Structure
//!
//! - [`layout`]: Document shell, navbar and the page renderer
//! - [`auth`]: Login, registration and forgot-password pages
//! - [`chat`]: Chat transcript view
//! - [`components`]: Reusable UI components

pub mod auth;
pub mod chat;
pub mod components;
pub mod layout;

pub use layout::{NavState, render_page};
