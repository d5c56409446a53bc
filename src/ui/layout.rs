//! Document shell and navigation bar.

use leptos::prelude::*;

use crate::session::Credentials;
use crate::ui::components::{Button, ButtonSize, ButtonVariant, SparklesIcon, UserIcon};

/// What the navbar knows about the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    Anonymous,
    LoggedIn { display_name: Option<String> },
}

impl NavState {
    pub fn from_credentials(credentials: Option<&Credentials>) -> Self {
        match credentials {
            Some(credentials) => Self::LoggedIn {
                display_name: credentials.display_name().map(str::to_string),
            },
            None => Self::Anonymous,
        }
    }
}

/// Render a full HTML document around `content`.
pub fn render_page(title: &str, nav: NavState, content: impl IntoView + 'static) -> String {
    let title = format!("{title} - ChatApp");
    let html = view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{title}</title>
                <link rel="stylesheet" href="/static/app.css" />
            </head>
            <body>
                <Navbar nav=nav />
                <main id="app" class="page">
                    {content}
                </main>
            </body>
        </html>
    }
    .to_html();
    format!("<!DOCTYPE html>{html}")
}

/// Top navigation bar reflecting the session state.
#[component]
pub fn Navbar(nav: NavState) -> impl IntoView {
    let links = match nav {
        NavState::LoggedIn { display_name } => view! {
            {display_name.map(|name| view! {
                <span class="navbar-user">
                    <UserIcon />
                    <span>{name}</span>
                </span>
            })}
            <form method="post" action="/logout" class="inline-form">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    button_type="submit"
                    class="nav-button logout"
                >
                    "Logout"
                </Button>
            </form>
        }
        .into_any(),
        NavState::Anonymous => view! {
            <a class="nav-button" href="/login">"Login"</a>
            <a class="nav-button" href="/register">"Register"</a>
        }
        .into_any(),
    };

    view! {
        <nav class="navbar">
            <a href="/" class="navbar-logo">
                <SparklesIcon />
                <span>"ChatApp"</span>
            </a>
            <div class="navbar-links">{links}</div>
        </nav>
    }
}
