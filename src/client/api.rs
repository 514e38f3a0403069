use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::client::session::{Session, UserInfo};
use crate::models::{EngineerProfile, JoinNetworkRequest};

/// Errors the UI turns into a toast: either the backend's own `{message}`
/// payload, or a transport failure before a response arrived.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JoinResponse {
    pub message: String,
    pub profile: EngineerProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    token: String,
    #[serde(rename = "_id")]
    id: String,
    full_name: String,
    email: String,
    user_type: String,
}

impl AuthResponse {
    fn into_session(self) -> Session {
        Session {
            token: self.token,
            user: UserInfo {
                id: self.id,
                full_name: self.full_name,
                email: self.email,
                user_type: self.user_type,
            },
        }
    }
}

/// HTTP client for the backend API. Every view goes through here; nothing
/// talks to the store directly.
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(ApiClient { base_url, http })
    }

    /// Base URL from `API_URL`; one backend for every environment.
    pub fn from_env() -> Result<Self, reqwest::Error> {
        let base_url =
            std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:5001/api".to_string());
        ApiClient::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn join_network(&self, form: &JoinNetworkRequest) -> Result<JoinResponse, ClientError> {
        let res = self
            .http
            .post(format!("{}/engineers/join", self.base_url))
            .json(form)
            .send()
            .await?;
        Self::decode(res).await
    }

    pub async fn engineer_profile(&self, id: &str) -> Result<EngineerProfile, ClientError> {
        let res = self
            .http
            .get(format!("{}/engineers/profile/{id}", self.base_url))
            .send()
            .await?;
        Self::decode(res).await
    }

    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        user_type: &str,
    ) -> Result<Session, ClientError> {
        let res = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(&json!({
                "fullName": full_name,
                "email": email,
                "password": password,
                "userType": user_type
            }))
            .send()
            .await?;
        let auth: AuthResponse = Self::decode(res).await?;
        Ok(auth.into_session())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let res = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let auth: AuthResponse = Self::decode(res).await?;
        Ok(auth.into_session())
    }

    async fn decode<T: serde::de::DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res.json::<T>().await?);
        }
        let message = res
            .json::<ApiMessage>()
            .await
            .ok()
            .and_then(|m| m.message)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        Err(ClientError::Api { status, message })
    }
}
