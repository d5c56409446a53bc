//! Titled card used by the auth pages.

use leptos::prelude::*;

/// Card with an optional heading block.
///
/// The heading is rendered from `title` / `subtitle`; children follow it,
/// usually a [`CardContent`] and a [`CardFooter`].
///
/// ```rust,ignore
/// view! {
///     <Card title="Login" class="auth-card">
///         <CardContent>"form"</CardContent>
///         <CardFooter>"links"</CardFooter>
///     </Card>
/// }
/// ```
#[component]
pub fn Card(
    /// Heading text; no heading block when empty.
    #[prop(default = "")]
    title: &'static str,
    /// Line under the heading.
    #[prop(optional)]
    subtitle: Option<&'static str>,
    #[prop(default = "")] class: &'static str,
    children: Children,
) -> impl IntoView {
    let classes = format!("card {class}");
    let heading = (!title.is_empty()).then(|| {
        view! {
            <header class="card-header">
                <h2>{title}</h2>
                {subtitle.map(|text| view! { <p class="subtitle">{text}</p> })}
            </header>
        }
    });

    view! {
        <section class=classes>
            {heading}
            {children()}
        </section>
    }
}

#[component]
pub fn CardContent(children: Children) -> impl IntoView {
    view! { <div class="card-content">{children()}</div> }
}

/// Secondary links under the card body.
#[component]
pub fn CardFooter(children: Children) -> impl IntoView {
    view! { <footer class="card-footer">{children()}</footer> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_from_props() {
        let html = view! {
            <Card title="Create Account" subtitle="Join us" class="auth-card">
                <CardContent>"body"</CardContent>
            </Card>
        }
        .to_html();
        assert!(html.contains(r#"class="card auth-card""#));
        assert!(html.contains("<h2>Create Account</h2>"));
        assert!(html.contains("Join us"));
        assert!(html.contains("body"));
    }

    #[test]
    fn test_no_heading_without_title() {
        let html = view! { <Card><CardFooter>"links"</CardFooter></Card> }.to_html();
        assert!(!html.contains("card-header"));
        assert!(html.contains("card-footer"));
    }
}
