//! HTTP client for the `/Employees` resource of the system under test.
//!
//! Every call returns the status and body as observed. Non-2xx statuses are
//! not errors here; the contract suite decides which statuses are acceptable.

use std::time::{Duration, Instant};

use reqwest::{Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Endpoints;
use crate::error::{OracleError, OracleResult};

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A response from the system under test.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The HTTP method of the request.
    pub method: Method,
    /// The requested URL.
    pub url: String,
    /// The returned status.
    pub status: StatusCode,
    /// The decoded body: `null` when empty, a string when not JSON.
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Fails with [`OracleError::UnexpectedStatus`] unless the status is `expected`.
    pub fn expect_status(self, expected: StatusCode) -> OracleResult<Self> {
        if self.status != expected {
            return Err(OracleError::UnexpectedStatus {
                method: self.method.to_string(),
                url: self.url,
                expected: expected.as_u16(),
                actual: self.status.as_u16(),
            });
        }
        Ok(self)
    }

    /// Decodes the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> OracleResult<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

/// Client for `{api_url}/Employees`.
///
/// # Example
///
/// ```no_run
/// use benefits_oracle::client::EmployeesClient;
///
/// # async fn run() -> benefits_oracle::error::OracleResult<()> {
/// let client = EmployeesClient::new("http://localhost:5000/api", Some("Basic dGVzdA==".into()))?;
/// let response = client.list().await?;
/// println!("{} employees", response.body.as_array().map_or(0, |a| a.len()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EmployeesClient {
    http: reqwest::Client,
    api_url: String,
    authorization: Option<String>,
}

impl EmployeesClient {
    /// Creates a client. `authorization` is sent verbatim as the `Authorization` header.
    pub fn new(api_url: impl Into<String>, authorization: Option<String>) -> OracleResult<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let api_url = api_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            api_url,
            authorization,
        })
    }

    /// Creates an authenticated client for the configured endpoints.
    pub fn from_endpoints(endpoints: &Endpoints) -> OracleResult<Self> {
        Self::new(endpoints.api_url.clone(), Some(endpoints.basic_token.clone()))
    }

    /// Returns a copy of this client that sends no `Authorization` header.
    pub fn unauthenticated(&self) -> Self {
        Self {
            http: self.http.clone(),
            api_url: self.api_url.clone(),
            authorization: None,
        }
    }

    /// Returns the URL of the collection.
    pub fn collection_url(&self) -> String {
        format!("{}/Employees", self.api_url)
    }

    /// Returns the URL of a single employee.
    pub fn item_url(&self, id: &str) -> String {
        format!("{}/Employees/{}", self.api_url, id)
    }

    /// `GET /Employees`
    pub async fn list(&self) -> OracleResult<ApiResponse> {
        self.send::<()>(Method::GET, self.collection_url(), None).await
    }

    /// `GET /Employees/{id}`
    pub async fn get(&self, id: &str) -> OracleResult<ApiResponse> {
        self.send::<()>(Method::GET, self.item_url(id), None).await
    }

    /// `POST /Employees`
    ///
    /// The body is generic so malformed bodies can be sent on purpose.
    pub async fn create<T: Serialize + ?Sized>(&self, body: &T) -> OracleResult<ApiResponse> {
        self.send(Method::POST, self.collection_url(), Some(body)).await
    }

    /// `PUT /Employees`
    pub async fn update<T: Serialize + ?Sized>(&self, body: &T) -> OracleResult<ApiResponse> {
        self.send(Method::PUT, self.collection_url(), Some(body)).await
    }

    /// `DELETE /Employees/{id}`
    pub async fn delete(&self, id: &str) -> OracleResult<ApiResponse> {
        self.send::<()>(Method::DELETE, self.item_url(id), None).await
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        body: Option<&T>,
    ) -> OracleResult<ApiResponse> {
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(authorization) = &self.authorization {
            request = request.header(header::AUTHORIZATION, authorization);
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            authenticated = self.authorization.is_some(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        Ok(ApiResponse {
            method,
            url,
            status,
            body: decode_body(&text),
        })
    }
}

fn decode_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}
