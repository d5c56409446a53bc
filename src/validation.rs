//! Form payloads and the rules they must satisfy before reaching the backend.

use std::fmt;

use serde::Deserialize;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// One failed rule, tied to the form field it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every rule a submitted form broke, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// First message for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    /// All messages joined for a single inline alert.
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|error| error.message)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Login form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.push("password", "Password is required.");
        }
        errors.into_result()
    }
}

/// Registration form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.name.trim().is_empty() {
            errors.push("name", "Name is required.");
        }
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.push("password", "Password is required.");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push("password", "Password must be at least 6 characters.");
        }
        errors.into_result()
    }
}

/// Forgot-password form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgotPasswordForm {
    #[serde(default)]
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&mut errors, &self.email);
        errors.into_result()
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        errors.push("email", "Email is required.");
    } else if !is_valid_email(email) {
        errors.push("email", "Please enter a valid email address.");
    }
}

/// Structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+tag@mail.example.co.uk"));

        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@.com"));
        assert!(!is_valid_email("ada@example."));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email("ada @example.com"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.for_field("email"), Some("Email is required."));
        assert_eq!(errors.for_field("password"), Some("Password is required."));
        assert_eq!(errors.errors().len(), 2);

        let ok = LoginForm {
            email: " ada@example.com ".into(),
            password: "x".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_register_rules() {
        let form = RegisterForm {
            name: "   ".into(),
            email: "not-an-email".into(),
            password: "12345".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.for_field("name"), Some("Name is required."));
        assert_eq!(
            errors.for_field("email"),
            Some("Please enter a valid email address.")
        );
        assert_eq!(
            errors.for_field("password"),
            Some("Password must be at least 6 characters.")
        );
        assert_eq!(
            errors.summary(),
            "Name is required. Please enter a valid email address. Password must be at least 6 characters."
        );

        let form = RegisterForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "123456".into(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_forgot_password_needs_email() {
        assert!(ForgotPasswordForm::default().validate().is_err());
        let form = ForgotPasswordForm {
            email: "ada@example.com".into(),
        };
        assert!(form.validate().is_ok());
    }
}
