//! Chat transcripts and their server-side store.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::api::Chat;

/// Prefix marking ids minted locally for optimistic entries.
const LOCAL_ID_PREFIX: &str = "local-";

/// Handle to the optimistic entry created by [`Transcript::begin_send`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PendingId(String);

impl PendingId {
    fn new() -> Self {
        Self(format!("{LOCAL_ID_PREFIX}{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether the backend has acknowledged an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Appended locally, waiting for the backend's answer.
    Pending,
    /// Returned by the backend.
    Confirmed,
}

/// One exchange as shown in the chat view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub id: String,
    pub prompt: String,
    /// Markdown answer; `None` while pending.
    pub response: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: EntryStatus,
}

impl TranscriptEntry {
    fn pending(id: &PendingId, prompt: String) -> Self {
        Self {
            id: id.0.clone(),
            prompt,
            response: None,
            created_at: Some(Utc::now()),
            status: EntryStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == EntryStatus::Pending
    }

    fn matches(&self, needle: &str) -> bool {
        self.prompt.to_lowercase().contains(needle)
            || self
                .response
                .as_deref()
                .is_some_and(|response| response.to_lowercase().contains(needle))
    }
}

impl From<Chat> for TranscriptEntry {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            prompt: chat.prompt,
            response: Some(chat.response),
            created_at: chat.created_at,
            status: EntryStatus::Confirmed,
        }
    }
}

/// Why a send could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("Please enter a message")]
    EmptyPrompt,
    #[error("A message is already being sent")]
    InFlight,
}

/// A single visitor's chat transcript, newest entry first.
///
/// Cloning yields another handle to the same transcript.
#[derive(Debug, Clone)]
pub struct Transcript {
    inner: Arc<TranscriptInner>,
}

#[derive(Debug)]
struct TranscriptInner {
    state: RwLock<TranscriptState>,
    last_activity: RwLock<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct TranscriptState {
    entries: Vec<TranscriptEntry>,
    /// Doubles as the loading flag: at most one send at a time.
    pending: Option<PendingId>,
    /// Set once the session survived its first backend probe.
    verified: bool,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TranscriptInner {
                state: RwLock::new(TranscriptState::default()),
                last_activity: RwLock::new(Utc::now()),
            }),
        }
    }

    /// Snapshot of every entry, newest first.
    #[must_use]
    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.read(|state| state.entries.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read(|state| state.entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a send is in flight.
    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.read(|state| state.pending.is_some())
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.read(|state| state.verified)
    }

    pub fn mark_verified(&self) {
        self.write(|state| state.verified = true);
    }

    /// Replace the confirmed history with what the backend returned.
    ///
    /// An in-flight optimistic entry survives at the head.
    pub fn replace_all(&self, chats: Vec<Chat>) {
        self.write(|state| {
            let pending = state
                .entries
                .iter()
                .find(|entry| entry.is_pending())
                .cloned();
            state.entries = pending
                .into_iter()
                .chain(chats.into_iter().map(TranscriptEntry::from))
                .collect();
        });
    }

    /// Optimistically prepend `prompt` and raise the loading flag.
    pub fn begin_send(&self, prompt: &str) -> Result<PendingId, SendError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SendError::EmptyPrompt);
        }

        self.write(|state| {
            if state.pending.is_some() {
                return Err(SendError::InFlight);
            }
            let id = PendingId::new();
            state
                .entries
                .insert(0, TranscriptEntry::pending(&id, prompt.to_string()));
            state.pending = Some(id.clone());
            Ok(id)
        })
    }

    /// Swap the optimistic entry for the backend's copy.
    ///
    /// Returns `false` if `pending` is not the current in-flight send.
    pub fn confirm(&self, pending: &PendingId, chat: Chat) -> bool {
        self.write(|state| {
            if state.pending.as_ref() != Some(pending) {
                return false;
            }
            state.pending = None;
            // A refresh may already have pulled the stored chat in.
            state
                .entries
                .retain(|entry| entry.is_pending() || entry.id != chat.id);
            match state.entries.iter().position(|entry| entry.id == pending.0) {
                Some(index) => state.entries[index] = TranscriptEntry::from(chat),
                None => state.entries.insert(0, TranscriptEntry::from(chat)),
            }
            true
        })
    }

    /// Drop the optimistic entry after a failed send.
    pub fn rollback(&self, pending: PendingId) {
        self.write(|state| {
            state.entries.retain(|entry| entry.id != pending.0);
            if state.pending.as_ref() == Some(&pending) {
                state.pending = None;
            }
        });
    }

    /// Remove a confirmed entry. Returns whether anything was removed.
    pub fn remove(&self, id: &str) -> bool {
        self.write(|state| {
            let before = state.entries.len();
            state
                .entries
                .retain(|entry| entry.id != id || entry.is_pending());
            before != state.entries.len()
        })
    }

    /// Case-insensitive filter over prompts and responses.
    ///
    /// A blank query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<TranscriptEntry> {
        let needle = query.trim().to_lowercase();
        self.read(|state| {
            state
                .entries
                .iter()
                .filter(|entry| needle.is_empty() || entry.matches(&needle))
                .cloned()
                .collect()
        })
    }

    /// Check if the transcript has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // A negative age means clock skew; treat as fresh.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }

    fn read<T>(&self, f: impl FnOnce(&TranscriptState) -> T) -> T {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut TranscriptState) -> T) -> T {
        let result = {
            let mut guard = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        };
        self.touch();
        result
    }

    fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }
}

/// An in-flight send that rolls itself back unless confirmed.
///
/// Covers the request being dropped mid-flight (client gone, request
/// timeout) as well as plain failures.
#[derive(Debug)]
pub struct PendingSend {
    transcript: Transcript,
    id: Option<PendingId>,
}

impl PendingSend {
    /// Start an optimistic send on `transcript`.
    pub fn begin(transcript: &Transcript, prompt: &str) -> Result<Self, SendError> {
        let id = transcript.begin_send(prompt)?;
        Ok(Self {
            transcript: transcript.clone(),
            id: Some(id),
        })
    }

    /// Replace the optimistic entry with the backend's copy.
    pub fn confirm(mut self, chat: Chat) -> bool {
        self.id
            .take()
            .is_some_and(|id| self.transcript.confirm(&id, chat))
    }
}

impl Drop for PendingSend {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.transcript.rollback(id);
        }
    }
}

/// Thread-safe store of transcripts keyed by session token.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    inner: Arc<TranscriptStoreInner>,
}

#[derive(Debug)]
struct TranscriptStoreInner {
    transcripts: RwLock<HashMap<String, Transcript>>,
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TranscriptStoreInner {
                transcripts: RwLock::new(HashMap::new()),
            }),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Transcript> {
        self.inner
            .transcripts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Get the transcript for `key`, creating an empty one if needed.
    #[must_use]
    pub fn get_or_create(&self, key: &str) -> Transcript {
        if let Some(transcript) = self.get(key) {
            return transcript;
        }

        self.inner
            .transcripts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    pub fn remove(&self, key: &str) -> Option<Transcript> {
        self.inner
            .transcripts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .transcripts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove transcripts that have been idle longer than `timeout`.
    ///
    /// Returns the number of transcripts removed.
    pub fn cleanup_expired(&self, timeout: Duration) -> usize {
        let mut guard = self
            .inner
            .transcripts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, transcript| !transcript.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(id: &str, prompt: &str, response: &str) -> Chat {
        Chat {
            id: id.into(),
            prompt: prompt.into(),
            response: response.into(),
            created_at: None,
        }
    }

    #[test]
    fn test_optimistic_send_confirmed() {
        let transcript = Transcript::new();
        transcript.replace_all(vec![chat("1", "older", "reply")]);

        let pending = transcript.begin_send("  What is Rust?  ").unwrap();
        assert!(pending.as_str().starts_with(LOCAL_ID_PREFIX));
        assert!(transcript.is_sending());

        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_pending());
        assert_eq!(entries[0].prompt, "What is Rust?");
        assert!(entries[0].response.is_none());

        assert!(transcript.confirm(&pending, chat("2", "What is Rust?", "A language.")));
        assert!(!transcript.is_sending());

        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "2");
        assert_eq!(entries[0].status, EntryStatus::Confirmed);
        assert_eq!(entries[0].response.as_deref(), Some("A language."));
        assert_eq!(entries[1].id, "1");
    }

    #[test]
    fn test_optimistic_send_rolled_back() {
        let transcript = Transcript::new();
        transcript.replace_all(vec![chat("1", "older", "reply")]);
        let before = transcript.entries();

        let pending = transcript.begin_send("doomed").unwrap();
        transcript.rollback(pending.clone());

        assert_eq!(transcript.entries(), before);
        assert!(!transcript.is_sending());
        // A late confirmation for a rolled-back send is ignored.
        assert!(!transcript.confirm(&pending, chat("9", "doomed", "late")));
        assert_eq!(transcript.entries(), before);
    }

    #[test]
    fn test_one_send_at_a_time() {
        let transcript = Transcript::new();
        let first = transcript.begin_send("one").unwrap();
        assert_eq!(transcript.begin_send("two"), Err(SendError::InFlight));

        transcript.rollback(first);
        assert!(transcript.begin_send("two").is_ok());
    }

    #[test]
    fn test_blank_prompt_rejected() {
        let transcript = Transcript::new();
        assert_eq!(transcript.begin_send("   \n"), Err(SendError::EmptyPrompt));
        assert!(transcript.is_empty());
        assert!(!transcript.is_sending());
    }

    #[test]
    fn test_refresh_keeps_pending_entry() {
        let transcript = Transcript::new();
        let pending = transcript.begin_send("in flight").unwrap();

        transcript.replace_all(vec![chat("1", "a", "b"), chat("2", "c", "d")]);

        let entries = transcript.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, pending.as_str());
        assert_eq!(entries[1].id, "1");
    }

    #[test]
    fn test_confirm_after_refresh_keeps_one_copy() {
        let transcript = Transcript::new();
        let pending = transcript.begin_send("hello").unwrap();
        transcript.replace_all(vec![chat("c1", "hello", "hi")]);

        assert!(transcript.confirm(&pending, chat("c1", "hello", "hi")));

        let ids: Vec<String> = transcript.entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["c1"]);
        assert!(!transcript.is_sending());
    }

    #[test]
    fn test_remove_only_confirmed() {
        let transcript = Transcript::new();
        transcript.replace_all(vec![chat("1", "a", "b")]);
        let pending = transcript.begin_send("in flight").unwrap();

        assert!(!transcript.remove(pending.as_str()));
        assert!(transcript.remove("1"));
        assert!(!transcript.remove("1"));
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let transcript = Transcript::new();
        transcript.replace_all(vec![
            chat("1", "Tell me about Rust", "It is a systems language"),
            chat("2", "Weather?", "Sunny with a chance of RUST"),
            chat("3", "Pasta recipe", "Boil water"),
        ]);

        let ids = |query: &str| -> Vec<String> {
            transcript
                .search(query)
                .into_iter()
                .map(|entry| entry.id)
                .collect()
        };

        assert_eq!(ids("rust"), vec!["1", "2"]);
        assert_eq!(ids("  BOIL "), vec!["3"]);
        assert_eq!(ids(""), vec!["1", "2", "3"]);
        assert!(ids("nothing here").is_empty());
    }

    #[test]
    fn test_store_lifecycle() {
        let store = TranscriptStore::new();
        assert!(store.is_empty());

        let a = store.get_or_create("tok-a");
        a.replace_all(vec![chat("1", "a", "b")]);
        assert_eq!(store.len(), 1);

        // Same key yields the same transcript.
        assert_eq!(store.get_or_create("tok-a").len(), 1);
        assert!(store.get("tok-b").is_none());

        store.remove("tok-a");
        assert!(store.is_empty());
    }

    #[test]
    fn test_cleanup_expired() {
        let store = TranscriptStore::new();
        let _ = store.get_or_create("tok");
        assert_eq!(store.cleanup_expired(Duration::from_secs(60)), 0);

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(store.cleanup_expired(Duration::from_millis(5)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_pending_send_guard() {
        let transcript = Transcript::new();

        let send = PendingSend::begin(&transcript, "kept").unwrap();
        assert!(send.confirm(chat("1", "kept", "ok")));
        assert_eq!(transcript.len(), 1);
        assert!(!transcript.is_sending());

        let send = PendingSend::begin(&transcript, "dropped").unwrap();
        assert_eq!(transcript.len(), 2);
        drop(send);
        assert_eq!(transcript.len(), 1);
        assert!(!transcript.is_sending());
    }

    #[test]
    fn test_verified_flag() {
        let transcript = Transcript::new();
        assert!(!transcript.is_verified());
        transcript.mark_verified();
        assert!(transcript.is_verified());
    }
}
