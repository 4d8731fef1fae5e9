use std::{collections::HashMap, time::Duration};

use log::{debug, warn};
use reqwest::{header, Client, Method, StatusCode};
use serde::Serialize;

use crate::config::HttpSettings;
use crate::error::DocError;
use crate::Result;

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub user_agent: String,
    pub default_headers: HashMap<String, String>,
}

impl From<&HttpSettings> for HttpClientConfig {
    fn from(settings: &HttpSettings) -> Self {
        Self {
            timeout: Duration::from_secs(settings.timeout_secs),
            max_retries: settings.max_retries,
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
            user_agent: settings.user_agent.clone(),
            default_headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub query_params: Vec<(String, String)>,
    pub bearer_token: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post_json(url: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        let mut request = Self::new(Method::POST, url);
        request.body = Some(serde_json::to_value(body)?);
        Ok(request)
    }

    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query_params: Vec::new(),
            bearer_token: None,
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer_token = token.map(str::to_string);
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// `reqwest` wrapper shared by the remote collaborators.
///
/// Transport failures and 5xx responses are retried up to `max_retries`
/// times; any other status is handed back for the caller to classify.
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(Self::convert_headers(&config.default_headers))
            .build()
            .map_err(|e| DocError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let outcome = self.execute_request(request).await;
            let retryable = match &outcome {
                Ok(response) => response.status.is_server_error(),
                Err(_) => true,
            };

            if !retryable || attempts > self.config.max_retries {
                return outcome.map_err(|e| DocError::service(e.to_string()));
            }

            warn!(
                "{} {} failed (attempt {}), retrying",
                request.method, request.url, attempts
            );
            tokio::time::sleep(self.config.retry_delay).await;
        }
    }

    async fn execute_request(
        &self,
        request: &HttpRequest,
    ) -> std::result::Result<HttpResponse, reqwest::Error> {
        debug!("{} {}", request.method, request.url);
        let mut req = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(Self::convert_headers(&request.headers));

        if !request.query_params.is_empty() {
            req = req.query(&request.query_params);
        }

        if let Some(token) = &request.bearer_token {
            req = req.bearer_auth(token);
        }

        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let headers = Self::extract_headers(response.headers());
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn convert_headers(headers: &HashMap<String, String>) -> header::HeaderMap {
        let mut header_map = header::HeaderMap::new();
        for (key, value) in headers {
            if let (Ok(name), Ok(val)) = (
                header::HeaderName::from_bytes(key.as_bytes()),
                header::HeaderValue::from_str(value),
            ) {
                header_map.insert(name, val);
            }
        }
        header_map
    }

    fn extract_headers(headers: &header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_settings() {
        let config = HttpClientConfig::from(&HttpSettings::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry_delay, Duration::from_millis(500));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::get("https://api.github.com/repos/a/b")
            .header("Accept", "application/vnd.github.raw")
            .query("ref", "main")
            .bearer(Some("token"));
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.query_params, vec![("ref".to_string(), "main".to_string())]);
        assert_eq!(request.bearer_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_convert_headers_skips_invalid() {
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("Bad Header".to_string(), "x".to_string());
        let map = HttpClient::convert_headers(&headers);
        assert_eq!(map.len(), 1);
        assert_eq!(map["accept"].to_str().unwrap(), "application/json");
    }

    #[test]
    fn test_response_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("x-ratelimit-remaining".to_string(), "0".to_string());
        let response = HttpResponse {
            status: StatusCode::FORBIDDEN,
            headers,
            body: String::new(),
        };
        assert_eq!(response.header("X-RateLimit-Remaining"), Some("0"));
        assert!(!response.is_success());
    }
}
