//! Chat input area component.

use leptos::prelude::*;

use crate::ui::components::{Button, SendIcon};

/// Prompt input posting to `/chats`.
///
/// The Send button is disabled while a previous send is still waiting for
/// the backend.
#[component]
pub fn ChatInputArea(
    /// Whether a send is in flight.
    sending: bool,
    /// Text to pre-fill.
    #[prop(into)]
    draft: String,
) -> impl IntoView {
    let hint = if sending {
        "Waiting for the previous reply..."
    } else {
        "Press Enter to send"
    };

    view! {
        <div class="input-box">
            <form method="post" action="/chats" class="chat-input-form">
                <input
                    type="text"
                    name="prompt"
                    class="input"
                    placeholder="Ask something..."
                    value=draft
                    autocomplete="off"
                    required=true
                    autofocus=true
                />
                <Button button_type="submit" disabled=sending>
                    <SendIcon />
                    <span>"Send"</span>
                </Button>
            </form>
            <p class="input-hint">{hint}</p>
        </div>
    }
}
