//! `/customers` resource client.

use tracing::warn;

use super::{ApiClient, Stamped};
use crate::error::RemoteError;
use crate::models::{Customer, CustomerPage, CustomerPatch, NewCustomer};

/// Header carrying the unpaginated collection size.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

#[derive(Debug, Clone)]
pub struct CustomerClient {
    api: ApiClient,
    page_size: u32,
}

impl CustomerClient {
    pub fn new(api: ApiClient, page_size: u32) -> Self {
        Self { api, page_size }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// `GET /customers?_page={page}&_limit={size}[&q={search}]`
    ///
    /// `page` is 1-indexed; an empty search term is omitted. A missing or
    /// unparseable total-count header counts as zero, so `has_more` is false.
    pub async fn list(&self, page: u32, search: &str) -> Result<CustomerPage, RemoteError> {
        let mut params = vec![
            ("_page", page.to_string()),
            ("_limit", self.page_size.to_string()),
        ];
        let search = search.trim();
        if !search.is_empty() {
            params.push(("q", search.to_string()));
        }

        let response = self.api.get("/customers", &params).await?;
        let total_count = match response.header(TOTAL_COUNT_HEADER) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                warn!(value = raw, "Unparseable total count header");
                0
            }),
            None => 0,
        };
        let customers: Vec<Customer> = response.json()?;

        Ok(CustomerPage::new(customers, page, self.page_size, total_count))
    }

    /// `GET /customers/{id}`
    pub async fn get(&self, id: &str) -> Result<Customer, RemoteError> {
        self.api.get_json(&Self::item_path(id), &[]).await
    }

    /// `POST /customers`; the server assigns the id.
    pub async fn create(&self, data: &NewCustomer) -> Result<Customer, RemoteError> {
        self.api
            .post_json("/customers", &Stamped::created(data))
            .await
    }

    /// `PATCH /customers/{id}` with only the fields present in `patch`.
    pub async fn update(&self, id: &str, patch: &CustomerPatch) -> Result<Customer, RemoteError> {
        self.api
            .patch_json(&Self::item_path(id), &Stamped::updated(patch))
            .await
    }

    /// `DELETE /customers/{id}`
    pub async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.api.delete(&Self::item_path(id)).await
    }

    fn item_path(id: &str) -> String {
        format!("/customers/{}", urlencoding::encode(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::Response;
    use bytes::Bytes;
    use std::sync::Arc;

    fn client(mock: &MockHttpClient) -> CustomerClient {
        CustomerClient::new(ApiClient::new("http://api.test", Arc::new(mock.clone())), 10)
    }

    fn customer_json(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id, "name": "Acme", "email": "hi@acme.test", "phone": "1",
            "company": "Acme", "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_query_and_total_count() {
        let mock = MockHttpClient::new();
        let body = serde_json::json!([customer_json("1")]).to_string();
        mock.set_default_response(MockResponse::Success(
            Response::new(200, Bytes::from(body)).header_value("x-total-count", "15"),
        ));

        let page = client(&mock).list(2, " acme ").await.unwrap();
        assert_eq!(page.customers.len(), 1);
        assert_eq!(page.total_count, 15);
        assert!(!page.has_more);

        assert_eq!(
            mock.last_request().unwrap().url,
            "http://api.test/customers?_page=2&_limit=10&q=acme"
        );
    }

    #[tokio::test]
    async fn test_list_without_header_has_no_more() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, serde_json::json!([])));

        let page = client(&mock).list(1, "").await.unwrap();
        assert!(!page.has_more);
        assert_eq!(
            mock.last_request().unwrap().url,
            "http://api.test/customers?_page=1&_limit=10"
        );
    }

    #[tokio::test]
    async fn test_update_sends_partial_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, customer_json("1")));

        let patch = CustomerPatch {
            phone: Some("555".to_string()),
            ..Default::default()
        };
        client(&mock).update("1", &patch).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, "PATCH");
        let body = request.json_body().unwrap();
        assert_eq!(body["phone"], "555");
        assert!(body.get("name").is_none());
        assert!(body.get("updated_at").is_some());
    }

    #[tokio::test]
    async fn test_delete_failure() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::status(404));

        let err = client(&mock).delete("1").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
