//! Customer records and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Case-insensitive match on name, email or company.
    ///
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.name, &self.email, &self.company]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

impl Entity for Customer {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Creation payload: every field except the id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
}

/// Partial update payload; `None` fields are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.company.is_none()
    }
}

impl From<NewCustomer> for CustomerPatch {
    fn from(form: NewCustomer) -> Self {
        Self {
            name: Some(form.name),
            email: Some(form.email),
            phone: Some(form.phone),
            company: Some(form.company),
        }
    }
}

/// One page of the customer collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerPage {
    pub customers: Vec<Customer>,
    /// Value of the backend's total-count signal (0 when absent).
    pub total_count: u64,
    pub has_more: bool,
}

impl CustomerPage {
    /// Build a page, deriving `has_more` as `page * limit < total_count`.
    pub fn new(customers: Vec<Customer>, page: u32, limit: u32, total_count: u64) -> Self {
        let seen = u64::from(page) * u64::from(limit);
        Self {
            customers,
            total_count,
            has_more: seen < total_count,
        }
    }
}
