//! Wire types exchanged with the chat backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth
// =============================================================================

/// Body of `POST auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls.
    pub token: String,
    /// The authenticated user, when the backend includes it.
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of `POST auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST auth/forgot-password`.
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

/// A backend user as returned alongside a login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// =============================================================================
// Chats
// =============================================================================

/// One prompt/response exchange persisted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub response: String,
    #[serde(
        default,
        rename = "createdAt",
        alias = "created_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST chats`.
#[derive(Debug, Clone, Serialize)]
pub struct NewChat<'a> {
    pub prompt: &'a str,
}

/// Generic `{ "msg": ... }` body the backend uses for errors and notices.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageBody {
    /// The human-readable text, preferring `msg`.
    pub fn text(self) -> Option<String> {
        self.msg
            .or(self.message)
            .filter(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_accepts_mongo_ids() {
        let chat: Chat = serde_json::from_str(
            r#"{"_id":"65f0","prompt":"hi","response":"**hello**","createdAt":"2024-03-01T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(chat.id, "65f0");
        assert_eq!(chat.response, "**hello**");
        assert!(chat.created_at.is_some());
    }

    #[test]
    fn test_chat_without_timestamp_or_response() {
        let chat: Chat = serde_json::from_str(r#"{"id":"1","prompt":"hi"}"#).unwrap();
        assert_eq!(chat.id, "1");
        assert!(chat.response.is_empty());
        assert!(chat.created_at.is_none());
    }

    #[test]
    fn test_login_response_user_is_optional() {
        let login: LoginResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(login.token, "abc");
        assert!(login.user.is_none());

        let login: LoginResponse = serde_json::from_str(
            r#"{"token":"abc","user":{"_id":"u1","name":"Ada","email":"ada@example.com"}}"#,
        )
        .unwrap();
        let user = login.user.unwrap();
        assert_eq!(user.id.as_deref(), Some("u1"));
        assert_eq!(user.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_message_body_prefers_msg() {
        let body: MessageBody =
            serde_json::from_str(r#"{"msg":"Invalid credentials","message":"other"}"#).unwrap();
        assert_eq!(body.text().as_deref(), Some("Invalid credentials"));

        let body: MessageBody = serde_json::from_str(r#"{"message":"   "}"#).unwrap();
        assert!(body.text().is_none());
    }
}
