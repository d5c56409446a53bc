//! Chat shell layout component.

use leptos::prelude::*;

use super::{ChatHeader, ChatInputArea, ChatMessageList};
use crate::session::TranscriptEntry;
use crate::ui::components::Alert;

/// Everything the chat page needs to render.
#[derive(Debug, Clone, Default)]
pub struct ChatView {
    /// Entries to show, already filtered by `query`.
    pub entries: Vec<TranscriptEntry>,
    /// Size of the unfiltered transcript.
    pub total: usize,
    /// Active search term.
    pub query: String,
    /// Inline error from the last action.
    pub error: Option<String>,
    /// Whether a send is in flight for this session.
    pub sending: bool,
    /// Prompt text to keep in the input after a failed send.
    pub draft: String,
}

/// Main chat shell component.
///
/// Provides the complete chat interface layout with:
/// - Header with title and search
/// - Scrollable message area
/// - Input area for new messages
#[component]
pub fn ChatShell(state: ChatView) -> impl IntoView {
    let ChatView {
        entries,
        total,
        query,
        error,
        sending,
        draft,
    } = state;
    let shown = entries.len();

    view! {
        <div class="chat-container">
            <ChatHeader title="AI Assistant" query=query.clone() shown=shown total=total />
            {error.map(|message| view! { <Alert>{message}</Alert> })}
            <ChatMessageList entries=entries query=query />
            <ChatInputArea sending=sending draft=draft />
        </div>
    }
}
