//! Validated value types shared across the crate.

mod api_url;
mod id;
mod user;

pub use api_url::ApiUrl;
pub use id::ResourceId;
pub(crate) use id::IdFields;
pub use user::User;
