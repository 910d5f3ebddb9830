//! Client-side form validation.
//!
//! Forms are checked before any request is issued. Every failing field is
//! reported at once so a form can show all inline errors together.

use std::fmt;

use serde::Serialize;

/// Minimum length of a display name, in characters.
pub const MIN_NAME_CHARS: usize = 2;

/// Minimum length of a password, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// A validation failure attached to one form field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All field errors produced by one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub(crate) fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Returns true if `s` looks like `local@domain.tld`.
///
/// Equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`: no whitespace, exactly one
/// `@` with a non-empty local part, and a dot in the domain with at least one
/// character on either side.
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let last = domain.len().saturating_sub(1);
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < last)
}

pub(crate) fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.is_empty() {
        errors.push(FieldError::new("email", "email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new("email", "enter a valid email address"));
    }
}

/// The registration form as entered.
#[derive(Clone)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Validate every field, trimming surrounding whitespace first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "name is required"));
        } else if name.chars().count() < MIN_NAME_CHARS {
            errors.push(FieldError::new(
                "name",
                format!("name must be at least {MIN_NAME_CHARS} characters"),
            ));
        }

        check_email(&mut errors, self.email.trim());

        let password = self.password.trim();
        if password.is_empty() {
            errors.push(FieldError::new("password", "password is required"));
        } else if password.chars().count() < MIN_PASSWORD_CHARS {
            errors.push(FieldError::new(
                "password",
                format!("password must be at least {MIN_PASSWORD_CHARS} characters"),
            ));
        }

        if self.confirm_password.trim() != password {
            errors.push(FieldError::new("confirm_password", "passwords do not match"));
        }

        errors.into_result()
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn valid_form_passes() {
        let form = RegistrationForm::new("Ann", "ann@example.com", "secret1", "secret1");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn mismatched_confirmation() {
        let form = RegistrationForm::new("Ann", "ann@example.com", "secret1", "secret2");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirm_password"), Some("passwords do not match"));
        assert_eq!(errors.iter().count(), 1);
    }

    #[test]
    fn reports_every_field() {
        let form = RegistrationForm::new("A", "nope", "123", "");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("name must be at least 2 characters"));
        assert_eq!(errors.get("email"), Some("enter a valid email address"));
        assert_eq!(errors.get("password"), Some("password must be at least 6 characters"));
        assert_eq!(errors.get("confirm_password"), Some("passwords do not match"));
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let form = RegistrationForm::new("张三", "z@example.cn", "密码密码密码", "密码密码密码");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn debug_redacts_passwords() {
        let form = RegistrationForm::new("Ann", "ann@example.com", "secret1", "secret1");
        assert!(!format!("{:?}", form).contains("secret1"));
    }
}
