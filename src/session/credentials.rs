//! Credentials persisted in the visitor's browser.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::api::User;

/// Cookie holding the raw bearer token.
pub const TOKEN_COOKIE: &str = "token";
/// Cookie holding the logged-in user as URL-safe base64 JSON.
pub const USER_COOKIE: &str = "user";

/// The token/user pair that marks a visitor as logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user: Option<User>,
}

impl Credentials {
    pub fn new(token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Read credentials from request cookies.
    ///
    /// Returns `None` without a non-empty `token` cookie. A `user` cookie
    /// that fails to decode is ignored rather than invalidating the token.
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        let token = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().trim().to_string())
            .filter(|token| !token.is_empty())?;
        let user = jar.get(USER_COOKIE).and_then(|cookie| decode_user(cookie.value()));
        Some(Self { token, user })
    }

    /// Write both cookies into `jar`.
    #[must_use]
    pub fn store(&self, jar: CookieJar, secure: bool) -> CookieJar {
        let jar = jar.add(session_cookie(TOKEN_COOKIE, self.token.clone(), secure));
        match self.user.as_ref().and_then(encode_user) {
            Some(user) => jar.add(session_cookie(USER_COOKIE, user, secure)),
            None => jar.add(removal_cookie(USER_COOKIE)),
        }
    }

    /// Name to greet the user with: their name, else their email.
    pub fn display_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        user.name
            .as_deref()
            .or(user.email.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}

/// Emit removal cookies for both credential keys.
///
/// The removal cookies are added outright so they are sent even when the
/// request carried no credentials to begin with.
#[must_use]
pub fn clear_credentials(jar: CookieJar) -> CookieJar {
    jar.add(removal_cookie(TOKEN_COOKIE))
        .add(removal_cookie(USER_COOKIE))
}

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .permanent()
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, "")).path("/").build();
    cookie.make_removal();
    cookie
}

fn encode_user(user: &User) -> Option<String> {
    let json = serde_json::to_vec(user).ok()?;
    Some(URL_SAFE_NO_PAD.encode(json))
}

fn decode_user(value: &str) -> Option<User> {
    let bytes = URL_SAFE_NO_PAD.decode(value.trim()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> User {
        User {
            id: Some("u1".into()),
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
        }
    }

    #[test]
    fn test_store_then_read() {
        let credentials = Credentials::new("tok", Some(ada()));
        let jar = credentials.store(CookieJar::new(), false);

        let token = jar.get(TOKEN_COOKIE).unwrap();
        assert_eq!(token.value(), "tok");
        assert_eq!(token.http_only(), Some(true));
        assert_eq!(token.path(), Some("/"));

        assert_eq!(Credentials::from_jar(&jar), Some(credentials));
    }

    #[test]
    fn test_missing_or_blank_token_means_logged_out() {
        assert!(Credentials::from_jar(&CookieJar::new()).is_none());

        let jar = CookieJar::new().add(Cookie::new(TOKEN_COOKIE, "  "));
        assert!(Credentials::from_jar(&jar).is_none());
    }

    #[test]
    fn test_garbled_user_cookie_is_ignored() {
        let jar = CookieJar::new()
            .add(Cookie::new(TOKEN_COOKIE, "tok"))
            .add(Cookie::new(USER_COOKIE, "%%%not-base64"));
        let credentials = Credentials::from_jar(&jar).unwrap();
        assert_eq!(credentials.token, "tok");
        assert!(credentials.user.is_none());
    }

    #[test]
    fn test_clear_removes_both_cookies() {
        let jar = Credentials::new("tok", Some(ada())).store(CookieJar::new(), true);
        let jar = clear_credentials(jar);
        for name in [TOKEN_COOKIE, USER_COOKIE] {
            let removed = jar.get(name).unwrap();
            assert_eq!(removed.value(), "");
            assert!(removed.to_string().contains("Max-Age=0"));
        }
        assert!(Credentials::from_jar(&jar).is_none());

        // Clearing works without any prior cookies in the jar.
        let jar = clear_credentials(CookieJar::new());
        assert!(jar.get(TOKEN_COOKIE).is_some());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut credentials = Credentials::new("tok", Some(ada()));
        assert_eq!(credentials.display_name(), Some("Ada"));

        credentials.user = Some(User {
            name: None,
            ..ada()
        });
        assert_eq!(credentials.display_name(), Some("ada@example.com"));

        credentials.user = None;
        assert_eq!(credentials.display_name(), None);
    }
}
