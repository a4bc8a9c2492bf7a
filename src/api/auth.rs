//! Auth client against the `/users` resource.
//!
//! The backend is a plain REST collection with no credential endpoint, so
//! login is a filtered lookup and the token is synthesized locally. Callers
//! only see [`AuthSession`]; swapping in a real verification endpoint is
//! confined to this file.

use chrono::Utc;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::ApiClient;
use crate::error::RemoteError;
use crate::models::{AuthSession, Role, User};

const USERS_PATH: &str = "/users";

#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

#[derive(Serialize)]
struct Registration<'a> {
    id: String,
    email: &'a str,
    password: &'a str,
    name: &'a str,
    role: Role,
    created_at: chrono::DateTime<Utc>,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Look up a user by credentials.
    ///
    /// `Ok(None)` means no user matched. The first match wins.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<AuthSession>, RemoteError> {
        let params = [
            ("email", email.to_string()),
            ("password", password.to_string()),
        ];
        let users: Vec<User> = self.api.get_json(USERS_PATH, &params).await?;
        debug!(matches = users.len(), "Credential lookup finished");

        Ok(users.into_iter().next().map(Self::session_for))
    }

    /// Create an account with the default `user` role.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthSession, RemoteError> {
        let body = Registration {
            id: Uuid::new_v4().to_string(),
            email,
            password,
            name,
            role: Role::User,
            created_at: Utc::now(),
        };
        let user: User = self.api.post_json(USERS_PATH, &body).await?;
        Ok(Self::session_for(user))
    }

    fn session_for(user: User) -> AuthSession {
        let token = format!("mock-jwt-token-{}", user.id);
        AuthSession { user, token }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use std::sync::Arc;

    fn client(mock: &MockHttpClient) -> AuthClient {
        AuthClient::new(ApiClient::new("http://auth.test", Arc::new(mock.clone())))
    }

    fn demo_user() -> serde_json::Value {
        serde_json::json!({
            "id": 1, "email": "demo@example.com", "password": "password",
            "name": "Demo", "role": "admin", "created_at": "2024-01-15T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_login_match() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, serde_json::json!([demo_user()])));

        let session = client(&mock)
            .login("demo@example.com", "password")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.user.email, "demo@example.com");
        assert_eq!(session.token, "mock-jwt-token-1");
        assert_eq!(
            mock.last_request().unwrap().url,
            "http://auth.test/users?email=demo%40example.com&password=password"
        );
    }

    #[tokio::test]
    async fn test_login_no_match() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, serde_json::json!([])));

        let session = client(&mock).login("x@y.zz", "nope").await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_register_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(
            201,
            serde_json::json!({
                "id": "u-7", "email": "new@example.com", "password": "secret1",
                "name": "New", "role": "user", "created_at": "2024-03-01T00:00:00Z"
            }),
        ));

        let session = client(&mock)
            .register("new@example.com", "secret1", "New")
            .await
            .unwrap();
        assert_eq!(session.token, "mock-jwt-token-u-7");
        assert_eq!(session.user.role, Role::User);

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, "POST");
        let body = request.json_body().unwrap();
        assert_eq!(body["role"], "user");
        assert_eq!(body["email"], "new@example.com");
        assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::status(409));

        let err = client(&mock).register("a@b.co", "secret1", "A").await.unwrap_err();
        assert_eq!(err.status(), Some(409));
    }
}
