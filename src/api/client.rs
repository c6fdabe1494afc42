use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::api::{ensure_supported, Operation, PortfolioBackend, Section};
use crate::config::Config;
use crate::error::RemoteError;
use crate::logging::{log_remote_error, log_request, log_response};

/// reqwest-backed client for the portfolio REST backend.
pub struct PortfolioApi {
    client: Client,
    base: String,
    user_id: String,
}

/// Error bodies the backend is known to send.
#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    detail: Option<Value>,
    message: Option<String>,
    error: Option<String>,
}

impl PortfolioApi {
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(cfg.request_timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base: cfg.api_base(),
            user_id: cfg.user_id.clone(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, RemoteError> {
        let url = format!("{}{}", self.base, path);
        log_request(method.as_str(), &url);

        let mut req = self.client.request(method, &url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                log_remote_error(None, path, &e.to_string());
                return Err(RemoteError::Network {
                    endpoint: path.to_string(),
                    message: e.to_string(),
                });
            }
        };

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            log_remote_error(Some(status.as_u16()), path, &e.to_string());
            RemoteError::Network {
                endpoint: path.to_string(),
                message: e.to_string(),
            }
        })?;

        if !status.is_success() {
            log_remote_error(Some(status.as_u16()), path, &text);
            return Err(RemoteError::Http {
                status: status.as_u16(),
                endpoint: path.to_string(),
                message: error_message(status, &text),
            });
        }

        log_response(status.as_u16(), path);
        decode_body(path, &text).map_err(|e| {
            log_remote_error(Some(status.as_u16()), path, &e.to_string());
            e
        })
    }
}

fn decode_body(path: &str, text: &str) -> Result<Value, RemoteError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| RemoteError::Decode {
        endpoint: path.to_string(),
        message: e.to_string(),
    })
}

fn error_message(status: StatusCode, text: &str) -> String {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();
    let from_body = match body.detail {
        Some(Value::String(s)) => Some(s),
        Some(other) if !other.is_null() => Some(other.to_string()),
        _ => body.message.or(body.error),
    };
    from_body
        .filter(|m| !m.is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()))
}

fn portfolio_path(user_id: &str) -> String {
    format!("/portfolio/{}", user_id)
}

fn section_path(user_id: &str, section: Section) -> String {
    format!("/portfolio/{}/{}", user_id, section.path())
}

fn item_path(user_id: &str, section: Section, id: &str) -> String {
    format!("/portfolio/{}/{}/{}", user_id, section.path(), id)
}

#[async_trait]
impl PortfolioBackend for PortfolioApi {
    fn default_user(&self) -> &str {
        &self.user_id
    }

    async fn seed(&self) -> Result<Value, RemoteError> {
        self.send(Method::POST, "/seed-data", None).await
    }

    async fn portfolio(&self, user_id: &str) -> Result<Value, RemoteError> {
        self.send(Method::GET, &portfolio_path(user_id), None).await
    }

    async fn update_portfolio(&self, user_id: &str, payload: &Value) -> Result<Value, RemoteError> {
        self.send(Method::PUT, &portfolio_path(user_id), Some(payload)).await
    }

    async fn list(&self, user_id: &str, section: Section) -> Result<Value, RemoteError> {
        self.send(Method::GET, &section_path(user_id, section), None).await
    }

    async fn create(&self, user_id: &str, section: Section, payload: &Value) -> Result<Value, RemoteError> {
        self.send(Method::POST, &section_path(user_id, section), Some(payload)).await
    }

    async fn update(
        &self,
        user_id: &str,
        section: Section,
        id: &str,
        payload: &Value,
    ) -> Result<Value, RemoteError> {
        ensure_supported(section, Operation::Update)?;
        self.send(Method::PUT, &item_path(user_id, section, id), Some(payload)).await
    }

    async fn delete(&self, user_id: &str, section: Section, id: &str) -> Result<Value, RemoteError> {
        ensure_supported(section, Operation::Delete)?;
        self.send(Method::DELETE, &item_path(user_id, section, id), None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(portfolio_path("akshaj"), "/portfolio/akshaj");
        assert_eq!(section_path("akshaj", Section::Skills), "/portfolio/akshaj/skills");
        assert_eq!(
            item_path("akshaj", Section::Projects, "p1"),
            "/portfolio/akshaj/projects/p1"
        );
    }

    #[test]
    fn test_error_message_prefers_body() {
        let msg = error_message(StatusCode::NOT_FOUND, r#"{"detail":"Portfolio not found"}"#);
        assert_eq!(msg, "Portfolio not found");
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"message":"bad payload"}"#);
        assert_eq!(msg, "bad payload");
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>"), "Internal Server Error");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body("/seed-data", "  "), Ok(Value::Null));
        assert!(matches!(
            decode_body("/portfolio/akshaj", "{not json"),
            Err(RemoteError::Decode { .. })
        ));
    }

    #[test]
    fn test_client_uses_api_base() {
        let cfg = Config::with_backend("http://127.0.0.1:9000/").unwrap();
        let api = PortfolioApi::new(&cfg).unwrap();
        assert_eq!(api.base(), "http://127.0.0.1:9000/api");
        assert_eq!(api.default_user(), "akshaj");
    }
}
