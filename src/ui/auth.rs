//! Login, registration and forgot-password pages.

use leptos::prelude::*;

use crate::ui::components::{
    Alert, AlertVariant, Button, Card, CardContent, CardFooter, Field, Input,
};
use crate::validation::ValidationErrors;

/// Messages shown on a form after a submission.
#[derive(Debug, Clone, Default)]
pub struct FormFeedback {
    /// Per-field validation failures.
    pub fields: ValidationErrors,
    /// Form-level error, usually the backend's message.
    pub error: Option<String>,
    /// Success / informational notice.
    pub notice: Option<String>,
}

impl FormFeedback {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn invalid(fields: ValidationErrors) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }
}

#[component]
fn FeedbackBanner(error: Option<String>, notice: Option<String>) -> impl IntoView {
    view! {
        {error.map(|message| view! { <Alert variant=AlertVariant::Error>{message}</Alert> })}
        {notice.map(|message| view! { <Alert variant=AlertVariant::Success>{message}</Alert> })}
    }
}

/// Login form.
#[component]
pub fn LoginPage(
    /// Email to pre-fill after a failed attempt.
    #[prop(into)]
    email: String,
    feedback: FormFeedback,
) -> impl IntoView {
    let FormFeedback {
        fields,
        error,
        notice,
    } = feedback;
    let email_error = fields.for_field("email");
    let password_error = fields.for_field("password");

    view! {
        <div class="auth-container">
            <Card title="Login" class="auth-card">
                <CardContent>
                    <FeedbackBanner error=error notice=notice />
                    <form method="post" action="/login" class="auth-form">
                        <Field label="Email" error=email_error>
                            <Input
                                input_type="email"
                                name="email"
                                placeholder="Email"
                                value=email
                                required=true
                                autocomplete="email"
                                invalid=email_error.is_some()
                            />
                        </Field>
                        <Field label="Password" error=password_error>
                            <Input
                                input_type="password"
                                name="password"
                                placeholder="Password"
                                required=true
                                autocomplete="current-password"
                                invalid=password_error.is_some()
                            />
                        </Field>
                        <Button button_type="submit" class="btn-block">"Login"</Button>
                    </form>
                </CardContent>
                <CardFooter>
                    <a href="/forgot-password">"Forgot password?"</a>
                    <a href="/register">"Create an account"</a>
                </CardFooter>
            </Card>
        </div>
    }
}

/// Registration form.
#[component]
pub fn RegisterPage(
    #[prop(into)] name: String,
    #[prop(into)] email: String,
    feedback: FormFeedback,
) -> impl IntoView {
    let FormFeedback { fields, error, .. } = feedback;
    let name_error = fields.for_field("name");
    let email_error = fields.for_field("email");
    let password_error = fields.for_field("password");

    view! {
        <div class="register-page">
            <Card
                title="Create Account"
                subtitle="Join us to start chatting"
                class="auth-card register-card"
            >
                <CardContent>
                    <FeedbackBanner error=error notice=None />
                    <form method="post" action="/register" class="register-form">
                        <Field label="Name" error=name_error>
                            <Input
                                name="name"
                                id="name"
                                placeholder="Name"
                                value=name
                                required=true
                                autocomplete="name"
                                invalid=name_error.is_some()
                            />
                        </Field>
                        <Field label="Email address" error=email_error>
                            <Input
                                input_type="email"
                                name="email"
                                id="email"
                                placeholder="Email address"
                                value=email
                                required=true
                                autocomplete="email"
                                invalid=email_error.is_some()
                            />
                        </Field>
                        <Field label="Password" error=password_error>
                            <Input
                                input_type="password"
                                name="password"
                                id="password"
                                placeholder="Password"
                                required=true
                                autocomplete="new-password"
                                invalid=password_error.is_some()
                            />
                        </Field>
                        <Button button_type="submit" class="btn-block">"Register"</Button>
                    </form>
                </CardContent>
                <CardFooter>
                    <span>"Already have an account?"</span>
                    <a href="/login">"Login"</a>
                </CardFooter>
            </Card>
        </div>
    }
}

/// Request a password reset email.
#[component]
pub fn ForgotPasswordPage(#[prop(into)] email: String, feedback: FormFeedback) -> impl IntoView {
    let FormFeedback {
        fields,
        error,
        notice,
    } = feedback;
    let email_error = fields.for_field("email");

    view! {
        <div class="auth-container">
            <Card
                title="Forgot Password"
                subtitle="We'll email you a link to reset it"
                class="auth-card"
            >
                <CardContent>
                    <FeedbackBanner error=error notice=notice />
                    <form method="post" action="/forgot-password" class="auth-form">
                        <Field label="Email" error=email_error>
                            <Input
                                input_type="email"
                                name="email"
                                placeholder="Email"
                                value=email
                                required=true
                                autocomplete="email"
                                invalid=email_error.is_some()
                            />
                        </Field>
                        <Button button_type="submit" class="btn-block">"Send reset link"</Button>
                    </form>
                </CardContent>
                <CardFooter>
                    <a href="/login">"Back to login"</a>
                </CardFooter>
            </Card>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RegisterForm;

    #[test]
    fn test_login_page_shows_backend_error() {
        let html = view! {
            <LoginPage email="ada@example.com" feedback=FormFeedback::error("Invalid credentials") />
        }
        .to_html();
        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains(r#"value="ada@example.com""#));
        assert!(html.contains("Invalid credentials"));
        assert!(html.contains(r#"role="alert""#));
    }

    #[test]
    fn test_register_page_shows_field_errors() {
        let errors = RegisterForm::default().validate().unwrap_err();
        let html = view! {
            <RegisterPage name="" email="" feedback=FormFeedback::invalid(errors) />
        }
        .to_html();
        assert!(html.contains("<h2>Create Account</h2>"));
        assert!(html.contains("Join us to start chatting"));
        assert!(html.contains("Name is required."));
        assert!(html.contains("Email is required."));
        assert!(html.contains("Password is required."));
        assert!(html.contains(r#"aria-invalid="true""#));
    }

    #[test]
    fn test_forgot_password_notice() {
        let html = view! {
            <ForgotPasswordPage email="" feedback=FormFeedback::notice("Check your inbox") />
        }
        .to_html();
        assert!(html.contains("Check your inbox"));
        assert!(html.contains(r#"role="status""#));
        assert!(html.contains(r#"action="/forgot-password""#));
    }
}
