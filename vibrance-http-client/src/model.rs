//! Credentials and the records scraped from the profile page

use serde::Serialize;
use std::fmt;
use zeroize::Zeroizing;

/// Login credentials for the upstream site
///
/// The password is wiped from memory when the value is dropped and never
/// shows up in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Create credentials from a username and password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// The login name
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Personal details from the profile page
///
/// Every field is optional: the upstream omits rows it has no value for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
}

/// One event registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Upstream order number, `None` when it could not be read
    pub order_id: Option<i64>,
    pub title: String,
    pub location: String,
    pub date: String,
    pub time: String,
    /// True when the payment column mentions "paid" (this includes "Unpaid")
    pub is_paid: bool,
}

/// One merchandise order line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchandiseRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absolute image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Ordered quantity, 0 when the cell is not a number
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
