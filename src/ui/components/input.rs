//! Input components for form fields.

use leptos::prelude::*;

/// Text input component.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Input
///         input_type="email"
///         placeholder="Email"
///         name="email"
///         required=true
///     />
/// }
/// ```
#[component]
pub fn Input(
    /// Input type (text, email, password, etc.).
    #[prop(default = "text")]
    input_type: &'static str,
    /// Placeholder text.
    #[prop(default = "")]
    placeholder: &'static str,
    /// Input name attribute.
    #[prop(default = "")]
    name: &'static str,
    /// Input ID attribute.
    #[prop(default = "")]
    id: &'static str,
    /// Whether the input is required.
    #[prop(default = false)]
    required: bool,
    /// Pre-filled value.
    #[prop(into, default = String::new())]
    value: String,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Autocomplete attribute.
    #[prop(default = "off")]
    autocomplete: &'static str,
    /// Whether the field currently fails validation.
    #[prop(default = false)]
    invalid: bool,
) -> impl IntoView {
    let classes = format!("input {class}");
    let id = (!id.is_empty()).then_some(id);
    let aria_invalid = invalid.then_some("true");

    view! {
        <input
            type=input_type
            class=classes
            placeholder=placeholder
            name=name
            id=id
            required=required
            value=value
            autocomplete=autocomplete
            aria-invalid=aria_invalid
        />
    }
}

/// Labelled form field with an optional inline error underneath.
#[component]
pub fn Field(
    /// Visible label.
    label: &'static str,
    /// Inline validation message.
    #[prop(optional_no_strip)]
    error: Option<&'static str>,
    /// The input itself.
    children: Children,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            {children()}
            {error.map(|message| view! { <span class="field-error">{message}</span> })}
        </label>
    }
}
