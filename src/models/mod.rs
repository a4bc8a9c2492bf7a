//! Data model shared by the api clients and the stores.
//!
//! The backend owns every entity; these are cached copies. Payload types
//! (`New*`, `*Patch`) carry only the fields a client may send.

pub mod customer;
pub mod dashboard;
pub mod lead;
pub mod user;

pub use customer::{Customer, CustomerPage, CustomerPatch, NewCustomer};
pub use dashboard::DashboardStats;
pub use lead::{Lead, LeadPatch, LeadQuery, LeadStatus, NewLead, StatusFilter};
pub use user::{AuthSession, Role, User};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The resource kinds mirrored by the entity stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Customer,
    Lead,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Customer => write!(f, "customer"),
            EntityKind::Lead => write!(f, "lead"),
        }
    }
}

/// A backend-owned record identified by a string id.
pub trait Entity: Clone {
    fn id(&self) -> &str;
}

/// Accept ids sent either as JSON strings or as numbers.
///
/// Mock REST servers commonly auto-increment numeric ids while clients
/// treat ids as opaque strings.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
