//! `/leads` resource client. Leads are not paginated.

use super::{ApiClient, Stamped};
use crate::error::RemoteError;
use crate::models::{Lead, LeadPatch, LeadQuery, NewLead};

#[derive(Debug, Clone)]
pub struct LeadClient {
    api: ApiClient,
}

impl LeadClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /leads[?customer_id={id}][&status={status}]`
    pub async fn list(&self, query: &LeadQuery) -> Result<Vec<Lead>, RemoteError> {
        self.api.get_json("/leads", &query.to_params()).await
    }

    /// `GET /leads/{id}`
    pub async fn get(&self, id: &str) -> Result<Lead, RemoteError> {
        self.api.get_json(&Self::item_path(id), &[]).await
    }

    /// `POST /leads`
    pub async fn create(&self, data: &NewLead) -> Result<Lead, RemoteError> {
        self.api.post_json("/leads", &Stamped::created(data)).await
    }

    /// `PATCH /leads/{id}`
    pub async fn update(&self, id: &str, patch: &LeadPatch) -> Result<Lead, RemoteError> {
        self.api
            .patch_json(&Self::item_path(id), &Stamped::updated(patch))
            .await
    }

    /// `DELETE /leads/{id}`
    pub async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.api.delete(&Self::item_path(id)).await
    }

    fn item_path(id: &str) -> String {
        format!("/leads/{}", urlencoding::encode(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::models::{LeadStatus, StatusFilter};
    use std::sync::Arc;

    fn client(mock: &MockHttpClient) -> LeadClient {
        LeadClient::new(ApiClient::new("http://api.test", Arc::new(mock.clone())))
    }

    #[tokio::test]
    async fn test_list_builds_filters() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, serde_json::json!([])));

        let leads = client(&mock)
            .list(&LeadQuery::new(
                Some("c1"),
                StatusFilter::Only(LeadStatus::Converted),
            ))
            .await
            .unwrap();
        assert!(leads.is_empty());
        assert_eq!(
            mock.last_request().unwrap().url,
            "http://api.test/leads?customer_id=c1&status=Converted"
        );

        client(&mock).list(&LeadQuery::default()).await.unwrap();
        assert_eq!(mock.last_request().unwrap().url, "http://api.test/leads");
    }

    #[tokio::test]
    async fn test_create_stamps_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(
            201,
            serde_json::json!({
                "id": "l9", "customer_id": "c1", "title": "Upsell", "description": "d",
                "status": "New", "value": 10.0,
                "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
            }),
        ));

        let lead = client(&mock)
            .create(&NewLead {
                customer_id: "c1".to_string(),
                title: "Upsell".to_string(),
                description: "d".to_string(),
                status: LeadStatus::New,
                value: 10.0,
            })
            .await
            .unwrap();
        assert_eq!(lead.id, "l9");

        let body = mock.last_request().unwrap().json_body().unwrap();
        assert_eq!(body["status"], "New");
        assert!(body.get("created_at").is_some());
        assert!(body.get("id").is_none());
    }
}
