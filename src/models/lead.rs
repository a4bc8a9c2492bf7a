//! Leads: sales opportunities attached to a customer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{deserialize_id, Customer, Entity};

/// Pipeline stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Contacted,
    Converted,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Converted => "Converted",
            LeadStatus::Lost => "Lost",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown lead status: {}", s))
    }
}

/// Status filter for lead views. `All` never reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LeadStatus),
}

impl StatusFilter {
    /// The status to send as a query parameter; `None` for `All`.
    pub fn as_status(&self) -> Option<LeadStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }

    pub fn accepts(&self, lead: &Lead) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => lead.status == *status,
        }
    }
}

impl From<LeadStatus> for StatusFilter {
    fn from(status: LeadStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Reference to a customer; not reconciled if that customer is deleted.
    #[serde(deserialize_with = "deserialize_id")]
    pub customer_id: String,
    pub title: String,
    pub description: String,
    pub status: LeadStatus,
    pub value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Display-only join, filled from the customer cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

impl Entity for Lead {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLead {
    pub customer_id: String,
    pub title: String,
    pub description: String,
    pub status: LeadStatus,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl From<NewLead> for LeadPatch {
    fn from(form: NewLead) -> Self {
        Self {
            customer_id: Some(form.customer_id),
            title: Some(form.title),
            description: Some(form.description),
            status: Some(form.status),
            value: Some(form.value),
        }
    }
}

/// Server-side filters for the lead list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadQuery {
    pub customer_id: Option<String>,
    pub status: Option<LeadStatus>,
}

impl LeadQuery {
    /// An empty customer id means no customer filter.
    pub fn new(customer_id: Option<&str>, status: StatusFilter) -> Self {
        Self {
            customer_id: customer_id
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            status: status.as_status(),
        }
    }

    /// Query-string pairs, omitting absent filters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(customer_id) = &self.customer_id {
            params.push(("customer_id", customer_id.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("converted".parse::<LeadStatus>(), Ok(LeadStatus::Converted));
        assert!("Won".parse::<LeadStatus>().is_err());
        assert_eq!("All".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "Lost".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(LeadStatus::Lost))
        );
    }

    #[test]
    fn test_all_filter_omits_status_param() {
        let query = LeadQuery::new(None, StatusFilter::All);
        assert!(query.to_params().is_empty());
        assert!(LeadQuery::new(Some(""), StatusFilter::All).customer_id.is_none());

        let query = LeadQuery::new(Some("c1"), StatusFilter::Only(LeadStatus::Converted));
        assert_eq!(
            query.to_params(),
            vec![
                ("customer_id", "c1".to_string()),
                ("status", "Converted".to_string())
            ]
        );
    }

    #[test]
    fn test_lead_decodes_numeric_customer_id() {
        let json = r#"{
            "id": 3, "customer_id": 1, "title": "Renewal", "description": "Q3",
            "status": "Contacted", "value": 1200.5,
            "created_at": "2024-02-01T00:00:00Z", "updated_at": "2024-02-02T00:00:00Z"
        }"#;
        let lead: Lead = serde_json::from_str(json).unwrap();
        assert_eq!(lead.id, "3");
        assert_eq!(lead.customer_id, "1");
        assert_eq!(lead.status, LeadStatus::Contacted);
        assert!(lead.customer.is_none());

        let back = serde_json::to_value(&lead).unwrap();
        assert!(back.get("customer").is_none());
    }
}
