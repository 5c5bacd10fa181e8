//! Remote authentication API client

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::config::ClientConfig;
use crate::http;
use crate::{Error, Result};

const SIGNUP_PATH: &str = "/api/auth/signup";
const LOGIN_PATH: &str = "/api/auth/login";

/// Authentication endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signup(&self, req: &SignupRequest) -> Result<SignupResponse>;

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse>;
}

#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: http::build_client(None),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            client: http::build_client(config.request_timeout),
            base_url: config.api_url.clone(),
        }
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn signup(&self, req: &SignupRequest) -> Result<SignupResponse> {
        req.validate()?;
        let url = http::join(&self.base_url, SIGNUP_PATH);
        debug!("POST {}", url);

        let res = self.client.post(&url).json(req).send().await?;
        let res = http::check(res, "Signup failed.").await?;
        // Any 2xx body counts as success; pick up a message if there is one.
        let text = res.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse> {
        req.validate()?;
        let url = http::join(&self.base_url, LOGIN_PATH);
        debug!("POST {}", url);

        let res = self.client.post(&url).json(req).send().await?;
        let res = http::check(res, "Login failed.").await?;
        let body: LoginResponse = res
            .json()
            .await
            .map_err(|e| Error::UnexpectedResponse(format!("invalid login response: {}", e)))?;
        if body.token.is_empty() {
            return Err(Error::UnexpectedResponse(
                "login response carried an empty token".to_string(),
            ));
        }
        Ok(body)
    }
}
