//! Per-visitor session state.
//!
//! Two pieces live here:
//!
//! - [`Credentials`]: the `token` / `user` pair persisted in the visitor's
//!   browser as cookies
//! - [`TranscriptStore`]: server-side, per-token chat transcripts with
//!   optimistic sends
//!
//! # Example
//!
//! ```rust
//! use chatapp_web::session::{Transcript, TranscriptStore};
//!
//! let store = TranscriptStore::new();
//! let session = store.get_or_create("token-123");
//! let pending = session.begin_send("Hello!").unwrap();
//! assert!(session.is_sending());
//!
//! session.rollback(pending);
//! assert!(session.entries().is_empty());
//! ```

mod credentials;
mod transcript;

pub use credentials::{Credentials, TOKEN_COOKIE, USER_COOKIE, clear_credentials};
pub use transcript::{
    EntryStatus, PendingId, PendingSend, SendError, Transcript, TranscriptEntry, TranscriptStore,
};
