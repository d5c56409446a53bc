//! Inline alert banner for errors and notices.

use leptos::prelude::*;

/// Alert visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertVariant {
    /// Something failed.
    #[default]
    Error,
    /// Something succeeded.
    Success,
}

impl AlertVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Error => "alert-error",
            Self::Success => "alert-success",
        }
    }

    fn role(self) -> &'static str {
        match self {
            Self::Error => "alert",
            Self::Success => "status",
        }
    }
}

/// Alert banner. Errors are announced with `role="alert"`.
#[component]
pub fn Alert(
    /// Alert variant.
    #[prop(default = AlertVariant::Error)]
    variant: AlertVariant,
    /// Alert content.
    children: Children,
) -> impl IntoView {
    let classes = format!("alert {}", variant.classes());
    let role = variant.role();

    view! {
        <p class=classes role=role>
            {children()}
        </p>
    }
}
