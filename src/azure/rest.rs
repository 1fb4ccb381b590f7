//! Authenticated JSON requests against Azure Resource Manager.

use colored::Colorize;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Status code and JSON body of an ARM call.
///
/// Empty bodies (typical for `202 Accepted`) are [`Value::Null`]; bodies that
/// are not JSON are kept as [`Value::String`].
#[derive(Debug, Clone)]
pub struct ArmResponse {
    pub status: u16,
    pub body: Value,
}

impl ArmResponse {
    /// Fail unless the status is `expected`.
    pub fn expect_status(self, expected: u16, what: &str) -> Result<ArmResponse, Box<dyn Error>> {
        self.expect_any(&[expected], what)
    }

    /// Fail unless the status is one of `expected`.
    pub fn expect_any(self, expected: &[u16], what: &str) -> Result<ArmResponse, Box<dyn Error>> {
        if expected.contains(&self.status) {
            return Ok(self);
        }
        let wanted = expected
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        Err(format!(
            "{what}: expected HTTP {wanted}, got {}: {}",
            self.status, self.body
        )
        .into())
    }

    /// Deserialize the body, naming the JSON path on failure.
    pub fn parse<T: DeserializeOwned>(&self, what: &str) -> Result<T, Box<dyn Error>> {
        serde_path_to_error::deserialize(&self.body).map_err(|e| {
            log::error!("BODY START:\n\n{}\n\nBODY END\n", self.body);
            format!("Error parsing {what} response: path={} error={}", e.path(), e).into()
        })
    }

    /// String at a JSON pointer, e.g. `"/properties/subnets/0/id"`.
    pub fn str_at(&self, pointer: &str) -> Option<&str> {
        self.body.pointer(pointer).and_then(Value::as_str)
    }
}

/// Client bound to one ARM endpoint, subscription and bearer token.
#[derive(Clone)]
pub struct ArmClient {
    endpoint: String,
    subscription_id: String,
    access_token: String,
    http: reqwest::Client,
}

impl fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArmClient")
            .field("endpoint", &self.endpoint)
            .field("subscription_id", &self.subscription_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl ArmClient {
    pub fn new(
        endpoint: &str,
        subscription_id: &str,
        access_token: &str,
    ) -> Result<ArmClient, Box<dyn Error>> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
        Ok(ArmClient {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription_id: subscription_id.to_string(),
            access_token: access_token.to_string(),
            http,
        })
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    fn url(&self, path: &str, api_version: &str) -> String {
        format!("{}{path}?api-version={api_version}", self.endpoint)
    }

    pub async fn put_json<T: Serialize>(
        &self,
        path: &str,
        api_version: &str,
        body: &T,
    ) -> Result<ArmResponse, Box<dyn Error>> {
        let url = self.url(path, api_version);
        let request = self.http.request(Method::PUT, &url).json(body);
        self.send(request, "PUT", &url).await
    }

    pub async fn patch_json<T: Serialize>(
        &self,
        path: &str,
        api_version: &str,
        body: &T,
    ) -> Result<ArmResponse, Box<dyn Error>> {
        let url = self.url(path, api_version);
        let request = self.http.request(Method::PATCH, &url).json(body);
        self.send(request, "PATCH", &url).await
    }

    pub async fn get_json(
        &self,
        path: &str,
        api_version: &str,
    ) -> Result<ArmResponse, Box<dyn Error>> {
        let url = self.url(path, api_version);
        let request = self.http.request(Method::GET, &url);
        self.send(request, "GET", &url).await
    }

    pub async fn delete(&self, path: &str, api_version: &str) -> Result<ArmResponse, Box<dyn Error>> {
        let url = self.url(path, api_version);
        let request = self.http.request(Method::DELETE, &url);
        self.send(request, "DELETE", &url).await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: &str,
        url: &str,
    ) -> Result<ArmResponse, Box<dyn Error>> {
        log::debug!("{method} {url}", url = url.on_blue());

        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                log::error!("Request failed: {method} {url}: {e}");
                format!("Failed to send {method} {url}: {e}")
            })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| format!("Failed to read response body of {method} {url}: {e}"))?;
        log::debug!("{method} {url} -> {status} ({} bytes)", text.len());

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if status >= 400 {
            log::warn!(
                "{failed} {method} {url} status={status}",
                failed = "failed".on_red()
            );
        }
        Ok(ArmResponse { status, body })
    }
}
