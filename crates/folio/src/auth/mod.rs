//! Authentication types and client-side form validation.
//!
//! Session state itself lives in [`crate::session`]; this module holds the
//! values that flow into it.

mod credentials;
mod token;
mod validation;

pub use credentials::Credentials;
pub use token::Token;
pub use validation::{
    FieldError, MIN_NAME_CHARS, MIN_PASSWORD_CHARS, RegistrationForm, ValidationErrors,
    is_valid_email,
};
pub(crate) use validation::check_email;
