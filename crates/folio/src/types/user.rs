//! Authenticated user identity.

use serde::{Deserialize, Serialize};

use super::{IdFields, ResourceId};

/// The identity behind the current token, as returned by the API.
///
/// A `User` is never persisted locally; it is re-derived from the API on
/// every start so stale or forged identity data cannot survive a reload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UserWire")]
pub struct User {
    pub id: ResourceId,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "isAdmin")]
    pub admin: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    #[serde(flatten)]
    ids: IdFields,
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    is_admin: bool,
}

impl TryFrom<UserWire> for User {
    type Error = &'static str;

    fn try_from(wire: UserWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.ids.require()?,
            name: wire.name,
            email: wire.email,
            role: wire.role,
            admin: wire.is_admin,
        })
    }
}

impl User {
    /// Returns true if this user may use the admin panel.
    pub fn is_admin(&self) -> bool {
        self.admin || self.role.as_deref() == Some("admin")
    }
}
