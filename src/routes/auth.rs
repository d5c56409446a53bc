//! Login, registration, password reset and logout.

use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use super::{failure_status, page};
use crate::AppState;
use crate::api::{LoginResponse, User};
use crate::session::{Credentials, clear_credentials};
use crate::ui::NavState;
use crate::ui::auth::{ForgotPasswordPage, FormFeedback, LoginPage, RegisterPage};
use crate::validation::{ForgotPasswordForm, LoginForm, RegisterForm};

const REGISTERED_NOTICE: &str = "Registration successful! Please log in.";
const RESET_SENT_NOTICE: &str = "If an account exists for that email, a reset link is on its way.";

#[derive(Debug, Default, Deserialize)]
pub(super) struct LoginQuery {
    #[serde(default)]
    registered: Option<String>,
}

fn logged_in(jar: &CookieJar) -> bool {
    Credentials::from_jar(jar).is_some()
}

fn login_form(status: StatusCode, email: String, feedback: FormFeedback) -> Response {
    page(
        status,
        "Login",
        NavState::Anonymous,
        view! { <LoginPage email=email feedback=feedback /> },
    )
}

fn register_form(
    status: StatusCode,
    name: String,
    email: String,
    feedback: FormFeedback,
) -> Response {
    page(
        status,
        "Register",
        NavState::Anonymous,
        view! { <RegisterPage name=name email=email feedback=feedback /> },
    )
}

/// Reachable with or without a session, so the navbar follows the cookies.
fn forgot_password_form(
    status: StatusCode,
    jar: &CookieJar,
    email: String,
    feedback: FormFeedback,
) -> Response {
    page(
        status,
        "Forgot Password",
        NavState::from_credentials(Credentials::from_jar(jar).as_ref()),
        view! { <ForgotPasswordPage email=email feedback=feedback /> },
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Login
// ─────────────────────────────────────────────────────────────────────────────

pub(super) async fn login_page(jar: CookieJar, Query(query): Query<LoginQuery>) -> Response {
    if logged_in(&jar) {
        return Redirect::to("/").into_response();
    }
    let feedback = if query.registered.is_some() {
        FormFeedback::notice(REGISTERED_NOTICE)
    } else {
        FormFeedback::default()
    };
    login_form(StatusCode::OK, String::new(), feedback)
}

pub(super) async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        return login_form(
            StatusCode::UNPROCESSABLE_ENTITY,
            form.email,
            FormFeedback::invalid(errors),
        );
    }

    let email = form.email.trim();
    match state.api.auth().login(email, &form.password).await {
        Ok(LoginResponse { token, .. }) if token.trim().is_empty() => {
            warn!(name: "auth.login.failed", reason = "empty token", "Backend returned no token");
            login_form(
                StatusCode::BAD_GATEWAY,
                email.to_string(),
                FormFeedback::error("Login failed"),
            )
        }
        Ok(LoginResponse { token, user }) => {
            // Keep something to greet the visitor with.
            let user = user.unwrap_or_else(|| User {
                email: Some(email.to_string()),
                ..User::default()
            });
            let credentials = Credentials::new(token, Some(user));
            info!(name: "auth.login.ok", "Visitor logged in");
            let jar = credentials.store(jar, state.secure_cookies());
            (jar, Redirect::to("/")).into_response()
        }
        Err(err) => {
            warn!(name: "auth.login.failed", error = %err, "Login rejected");
            login_form(
                failure_status(&err),
                email.to_string(),
                FormFeedback::error(err.user_message("Login failed")),
            )
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────────────────────────

pub(super) async fn register_page(jar: CookieJar) -> Response {
    if logged_in(&jar) {
        return Redirect::to("/").into_response();
    }
    register_form(
        StatusCode::OK,
        String::new(),
        String::new(),
        FormFeedback::default(),
    )
}

pub(super) async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        return register_form(
            StatusCode::UNPROCESSABLE_ENTITY,
            form.name,
            form.email,
            FormFeedback::invalid(errors),
        );
    }

    let name = form.name.trim();
    let email = form.email.trim();
    match state.api.auth().register(name, email, &form.password).await {
        Ok(_) => {
            info!(name: "auth.register.ok", "Account created");
            Redirect::to("/login?registered=1").into_response()
        }
        Err(err) => {
            warn!(name: "auth.register.failed", error = %err, "Registration rejected");
            register_form(
                StatusCode::UNPROCESSABLE_ENTITY,
                name.to_string(),
                email.to_string(),
                FormFeedback::error(err.user_message("Registration failed")),
            )
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Password reset
// ─────────────────────────────────────────────────────────────────────────────

pub(super) async fn forgot_password_page(jar: CookieJar) -> Response {
    forgot_password_form(StatusCode::OK, &jar, String::new(), FormFeedback::default())
}

pub(super) async fn forgot_password_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ForgotPasswordForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        return forgot_password_form(
            StatusCode::UNPROCESSABLE_ENTITY,
            &jar,
            form.email,
            FormFeedback::invalid(errors),
        );
    }

    let email = form.email.trim();
    match state.api.auth().forgot_password(email).await {
        Ok(message) => {
            info!(name: "auth.reset.requested", "Password reset requested");
            let notice = message.unwrap_or_else(|| RESET_SENT_NOTICE.to_string());
            forgot_password_form(
                StatusCode::OK,
                &jar,
                String::new(),
                FormFeedback::notice(notice),
            )
        }
        Err(err) => {
            warn!(name: "auth.reset.failed", error = %err, "Password reset request failed");
            forgot_password_form(
                failure_status(&err),
                &jar,
                email.to_string(),
                FormFeedback::error(err.user_message("Could not send reset link")),
            )
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logout
// ─────────────────────────────────────────────────────────────────────────────

pub(super) async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(credentials) = Credentials::from_jar(&jar) {
        state.transcripts.remove(&credentials.token);
    }
    info!(name: "auth.logout", "Visitor logged out");
    (clear_credentials(jar), Redirect::to("/login")).into_response()
}
