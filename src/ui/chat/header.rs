//! Chat header with title and transcript search.

use leptos::prelude::*;

use crate::ui::components::{Button, ButtonSize, ButtonVariant, SearchIcon, SparklesIcon};

/// Chat header with title and a search form filtering the transcript.
#[component]
pub fn ChatHeader(
    /// Title displayed in the header.
    #[prop(default = "Chat")]
    title: &'static str,
    /// Current search term.
    #[prop(into)]
    query: String,
    /// Number of entries currently shown.
    shown: usize,
    /// Number of entries in the transcript.
    total: usize,
) -> impl IntoView {
    let filtering = !query.trim().is_empty();
    let summary = filtering.then(|| {
        view! {
            <p class="chat-search-summary">
                {format!("Showing {shown} of {total}")}
                " "
                <a href="/">"Clear"</a>
            </p>
        }
    });

    view! {
        <header class="chat-header">
            <div class="chat-title">
                <SparklesIcon />
                <h2>{title}</h2>
            </div>
            <form method="get" action="/" class="chat-search" role="search">
                <input
                    type="search"
                    name="q"
                    class="input"
                    placeholder="Search messages..."
                    value=query
                    aria-label="Search messages"
                />
                <Button
                    variant=ButtonVariant::Secondary
                    size=ButtonSize::Icon
                    button_type="submit"
                    label="Search"
                >
                    <SearchIcon />
                </Button>
            </form>
            {summary}
        </header>
    }
}
