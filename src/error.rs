//! Handler-level errors and how they turn into responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;
use tracing::{error, info};

use crate::api::ApiError;
use crate::session::clear_credentials;

/// Errors a page handler can bail out with.
#[derive(Error, Debug)]
pub enum AppError {
    /// The stored credentials were rejected; the visitor must log in again.
    #[error("session expired")]
    Unauthorized,

    /// The backend failed in a way the page cannot render around.
    #[error(transparent)]
    Backend(ApiError),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        if err.is_unauthorized() {
            Self::Unauthorized
        } else {
            Self::Backend(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => {
                info!(name: "auth.session.cleared", "Credentials rejected, redirecting to login");
                logout_response()
            }
            Self::Backend(err) => {
                error!(name: "api.request.unhandled", error = %err, "Backend call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "The chat service is unavailable. Please try again later.",
                )
                    .into_response()
            }
        }
    }
}

/// Clear both credential cookies and send the visitor to the login page.
pub fn logout_response() -> Response {
    (clear_credentials(CookieJar::new()), Redirect::to("/login")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_unauthorized_clears_cookies_and_redirects() {
        let response = AppError::from(ApiError::Unauthorized { message: None }).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");

        let cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|value| value.to_str().unwrap().to_string())
            .collect();
        assert!(cookies.iter().any(|c| c.starts_with("token=") && c.contains("Max-Age=0")));
        assert!(cookies.iter().any(|c| c.starts_with("user=") && c.contains("Max-Age=0")));
    }

    #[test]
    fn test_backend_error_is_bad_gateway() {
        let err = ApiError::Api {
            status: 500,
            message: None,
        };
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
