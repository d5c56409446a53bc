//! Chat transcript rendering.

use leptos::prelude::*;

use crate::api::encode_path_segment;
use crate::markdown;
use crate::session::TranscriptEntry;
use crate::ui::components::{
    BotIcon, Button, ButtonSize, ButtonVariant, LoaderIcon, TrashIcon, UserIcon,
};

/// List of exchanges, newest first, with an empty state.
#[component]
pub fn ChatMessageList(
    entries: Vec<TranscriptEntry>,
    /// Active search term, used for the empty state.
    #[prop(into)]
    query: String,
) -> impl IntoView {
    if entries.is_empty() {
        let message = if query.trim().is_empty() {
            "No messages yet. Ask something to get started.".to_string()
        } else {
            format!("No messages match \"{}\".", query.trim())
        };
        return view! {
            <div class="chat-box chat-empty">
                <p>{message}</p>
            </div>
        }
        .into_any();
    }

    view! {
        <div class="chat-box" aria-live="polite" aria-label="Chat messages">
            {entries
                .into_iter()
                .map(|entry| view! { <MessageItem entry=entry /> })
                .collect_view()}
        </div>
    }
    .into_any()
}

/// One prompt / reply exchange.
#[component]
pub fn MessageItem(entry: TranscriptEntry) -> impl IntoView {
    let pending = entry.is_pending();
    let classes = if pending {
        "chat-item pending"
    } else {
        "chat-item"
    };
    let dom_id = format!("chat-{}", entry.id);
    let busy = pending.then_some("true");
    let timestamp = entry.created_at.map(|at| {
        let machine = at.to_rfc3339();
        let human = at.format("%b %e, %Y %H:%M").to_string();
        view! { <time class="chat-time" datetime=machine>{human}</time> }
    });

    let reply = match entry.response {
        Some(response) => {
            let html = markdown::render(&response);
            view! { <div class="chat-markdown" inner_html=html></div> }.into_any()
        }
        None => view! {
            <div class="chat-thinking">
                <LoaderIcon />
                <span>"Thinking..."</span>
            </div>
        }
        .into_any(),
    };

    let delete = (!pending).then(|| {
        let action = format!("/chats/{}/delete", encode_path_segment(&entry.id));
        view! {
            <form method="post" action=action class="delete-form">
                <Button
                    variant=ButtonVariant::Destructive
                    size=ButtonSize::Icon
                    button_type="submit"
                    label="Delete chat"
                    class="delete-btn"
                >
                    <TrashIcon />
                </Button>
            </form>
        }
    });

    view! {
        <article class=classes id=dom_id aria-busy=busy>
            <div class="chat-user">
                <UserIcon />
                <strong>"You:"</strong>
                " "
                <span class="chat-prompt">{entry.prompt}</span>
            </div>
            <div class="chat-ai">
                <BotIcon />
                <strong>"AI:"</strong>
                {reply}
            </div>
            <footer class="chat-meta">
                {timestamp}
                {delete}
            </footer>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Chat;
    use crate::session::Transcript;

    fn confirmed(id: &str, prompt: &str, response: &str) -> TranscriptEntry {
        TranscriptEntry::from(Chat {
            id: id.into(),
            prompt: prompt.into(),
            response: response.into(),
            created_at: None,
        })
    }

    #[test]
    fn test_confirmed_entry_renders_markdown_and_delete() {
        let entry = confirmed("65f0", "What is <b>Rust</b>?", "**Fast** and safe");
        let html = view! { <MessageItem entry=entry /> }.to_html();
        assert!(html.contains("<strong>Fast</strong>"));
        assert!(html.contains("What is &lt;b&gt;Rust&lt;/b&gt;?"));
        assert!(html.contains(r#"action="/chats/65f0/delete""#));
        assert!(html.contains("btn-danger"));
        assert!(!html.contains("Thinking..."));
    }

    #[test]
    fn test_pending_entry_has_no_delete() {
        let transcript = Transcript::new();
        transcript.begin_send("in flight").unwrap();
        let entry = transcript.entries().remove(0);

        let html = view! { <MessageItem entry=entry /> }.to_html();
        assert!(html.contains("Thinking..."));
        assert!(html.contains("pending"));
        assert!(!html.contains("/delete"));
    }

    #[test]
    fn test_empty_states() {
        let html = view! { <ChatMessageList entries=Vec::new() query="" /> }.to_html();
        assert!(html.contains("No messages yet."));

        let html = view! { <ChatMessageList entries=Vec::new() query="rust" /> }.to_html();
        assert!(html.contains("No messages match"));
    }
}
