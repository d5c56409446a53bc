//! Page and form handlers.
//!
//! Every page is rendered on the server; forms post back and either
//! redirect (303) on success or re-render with inline errors.

mod auth;
mod chat;

use axum::{
    Router,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::IntoView;

use crate::AppState;
use crate::api::ApiError;
use crate::session::Credentials;
use crate::ui::{NavState, render_page};

/// All page routes. Static files and middleware are added by the server.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::chat_page))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route(
            "/register",
            get(auth::register_page).post(auth::register_submit),
        )
        .route(
            "/forgot-password",
            get(auth::forgot_password_page).post(auth::forgot_password_submit),
        )
        .route("/logout", post(auth::logout))
        .route("/chats", post(chat::send_chat))
        .route("/chats/{id}/delete", post(chat::delete_chat))
        .route("/healthz", get(health))
}

async fn health() -> &'static str {
    "ok"
}

/// Credentials of a logged-in visitor; anonymous visitors go to `/login`.
#[derive(Debug, Clone)]
pub struct RequireSession(pub Credentials);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Credentials::from_jar(&jar)
            .map(Self)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Render a full page with the given status.
fn page(
    status: StatusCode,
    title: &str,
    nav: NavState,
    content: impl IntoView + 'static,
) -> Response {
    (status, Html(render_page(title, nav, content))).into_response()
}

/// Status for a page re-rendered after a failed backend call.
///
/// Client errors keep the backend's status; anything else is a gateway
/// failure.
fn failure_status(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        ApiError::Api { status, .. } => StatusCode::from_u16(*status)
            .ok()
            .filter(StatusCode::is_client_error)
            .unwrap_or(StatusCode::BAD_GATEWAY),
        ApiError::Http(_) | ApiError::InvalidUrl(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_status() {
        assert_eq!(
            failure_status(&ApiError::Unauthorized { message: None }),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            failure_status(&ApiError::Api {
                status: 400,
                message: None
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            failure_status(&ApiError::Api {
                status: 503,
                message: None
            }),
            StatusCode::BAD_GATEWAY
        );
    }
}
