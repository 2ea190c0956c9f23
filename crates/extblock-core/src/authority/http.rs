//! HTTP client for the blocklist backend

use super::RemoteAuthority;
use crate::config::AuthorityConfig;
use crate::error::{Error, Result, NETWORK_FAILURE_MESSAGE};
use crate::extension::normalize;
use crate::model::{CustomExtensionRule, ExtensionType, FixedExtensionRule, RuleId};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

/// Success envelope: `{success, data, message}`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: Option<bool>,
    data: Option<T>,
    message: Option<String>,
}

/// Error body: `{status, message}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FixedRuleDto {
    id: RuleId,
    extension: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "isBlocked")]
    blocked: bool,
}

impl From<FixedRuleDto> for FixedExtensionRule {
    fn from(dto: FixedRuleDto) -> Self {
        Self {
            id: dto.id,
            extension: normalize(&dto.extension),
            description: dto.description.unwrap_or_default(),
            is_blocked: dto.blocked,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CustomRuleDto {
    id: RuleId,
    extension: String,
}

impl From<CustomRuleDto> for CustomExtensionRule {
    fn from(dto: CustomRuleDto) -> Self {
        Self {
            id: dto.id,
            extension: normalize(&dto.extension),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExtensionBody<'a> {
    extension: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleBody<'a> {
    extension: &'a str,
    is_blocked: bool,
}

/// [`RemoteAuthority`] speaking JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    client: Client,
    base_url: Url,
}

impl HttpAuthority {
    /// Create a client for `base_url` with default timeouts
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&AuthorityConfig::with_base_url(base_url))
    }

    /// Create a client from configuration
    pub fn from_config(config: &AuthorityConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.url()?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/extensions/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                Error::config_value("authority.base_url", "Cannot be used as a base URL")
            })?;
            path.pop_if_empty().extend(["api", "extensions"]).extend(segments);
        }
        Ok(url)
    }

    /// Send a request and unwrap the response envelope
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request to authority failed");
            Error::transport(e)
        })?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await.map_err(Error::transport)?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "Authority responded");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| NETWORK_FAILURE_MESSAGE.to_string());
            return Err(Error::from_status(status.as_u16(), message));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body)
            .map_err(|e| Error::transport(format!("Invalid response body from {url}: {e}")))?;

        if envelope.success == Some(false) {
            return Err(Error::Authority {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "The server rejected the request".to_string()),
            });
        }

        Ok(envelope.data)
    }

    /// Execute a request whose payload is irrelevant
    async fn execute_ack(&self, request: RequestBuilder) -> Result<()> {
        self.execute::<JsonValue>(request).await.map(|_| ())
    }

    /// Execute a request whose `data` must be present
    async fn execute_data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.execute(request)
            .await?
            .ok_or_else(|| Error::transport("Response carried no data"))
    }
}

#[async_trait]
impl RemoteAuthority for HttpAuthority {
    async fn list_fixed(&self) -> Result<Vec<FixedExtensionRule>> {
        let url = self.endpoint(&["fixed"])?;
        let rules: Vec<FixedRuleDto> = self.execute_data(self.client.get(url)).await?;
        Ok(rules.into_iter().map(Into::into).collect())
    }

    async fn set_fixed_blocked(&self, extension: &str, is_blocked: bool) -> Result<()> {
        let url = self.endpoint(&["fixed"])?;
        let body = ToggleBody {
            extension,
            is_blocked,
        };
        self.execute_ack(self.client.put(url).json(&body)).await
    }

    async fn add_fixed(&self, extension: &str) -> Result<FixedExtensionRule> {
        let url = self.endpoint(&["fixed"])?;
        let rule: FixedRuleDto = self
            .execute_data(self.client.post(url).json(&ExtensionBody { extension }))
            .await?;
        Ok(rule.into())
    }

    async fn delete_fixed(&self, id: RuleId) -> Result<()> {
        let url = self.endpoint(&["fixed", &id.to_string()])?;
        self.execute_ack(self.client.delete(url)).await
    }

    async fn reset_fixed(&self) -> Result<()> {
        let url = self.endpoint(&["fixed", "reset"])?;
        self.execute_ack(self.client.post(url)).await
    }

    async fn list_custom(&self) -> Result<Vec<CustomExtensionRule>> {
        let url = self.endpoint(&["custom"])?;
        let rules: Vec<CustomRuleDto> = self.execute_data(self.client.get(url)).await?;
        Ok(rules.into_iter().map(Into::into).collect())
    }

    async fn add_custom(&self, extension: &str) -> Result<CustomExtensionRule> {
        let url = self.endpoint(&["custom"])?;
        let rule: CustomRuleDto = self
            .execute_data(self.client.post(url).json(&ExtensionBody { extension }))
            .await?;
        Ok(rule.into())
    }

    async fn delete_custom(&self, id: RuleId) -> Result<()> {
        let url = self.endpoint(&["custom", &id.to_string()])?;
        self.execute_ack(self.client.delete(url)).await
    }

    async fn delete_all_custom(&self) -> Result<()> {
        let url = self.endpoint(&["custom", "all"])?;
        self.execute_ack(self.client.delete(url)).await
    }

    async fn delete_custom_by_extension(&self, extension: &str) -> Result<()> {
        let url = self.endpoint(&["custom", "extension", extension])?;
        self.execute_ack(self.client.delete(url)).await
    }

    async fn is_blocked(&self, extension: &str) -> Result<bool> {
        let url = self.endpoint(&["check", extension])?;
        self.execute_data(self.client.get(url)).await
    }

    async fn extension_type(&self, extension: &str) -> Result<Option<ExtensionType>> {
        let url = self.endpoint(&["type", extension])?;
        let raw: Option<String> = match self.execute(self.client.get(url)).await {
            Ok(raw) => raw,
            Err(Error::NotFound { .. }) => None,
            Err(e) => return Err(e),
        };

        raw.map(|t| t.parse().map_err(Error::transport)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let authority = HttpAuthority::new("http://localhost:8080").unwrap();
        let url = authority.endpoint(&["fixed", "reset"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/extensions/fixed/reset");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let authority = HttpAuthority::new("https://admin.example.com/upload/").unwrap();
        let url = authority.endpoint(&["custom", "all"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://admin.example.com/upload/api/extensions/custom/all"
        );
    }

    #[test]
    fn test_endpoint_encodes_extension() {
        let authority = HttpAuthority::new("http://localhost:8080").unwrap();
        let url = authority.endpoint(&["check", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/extensions/check/a%2Fb%20c");
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(HttpAuthority::new("ftp://localhost").is_err());
    }

    #[test]
    fn test_rejects_zero_timeouts() {
        let mut config = AuthorityConfig::with_base_url("http://localhost:8080");
        config.timeout_secs = 0;
        assert!(HttpAuthority::from_config(&config).is_err());

        let mut config = AuthorityConfig::with_base_url("http://localhost:8080");
        config.connect_timeout_secs = 0;
        assert!(HttpAuthority::from_config(&config).is_err());
    }

    #[test]
    fn test_fixed_dto_normalizes() {
        let dto: FixedRuleDto = serde_json::from_str(
            r#"{"id": 1, "extension": " EXE ", "description": "실행 파일", "blocked": true}"#,
        )
        .unwrap();
        let rule = FixedExtensionRule::from(dto);
        assert_eq!(rule.extension, "exe");
        assert!(rule.is_blocked);
        assert_eq!(rule.description, "실행 파일");
    }

    #[test]
    fn test_fixed_dto_accepts_is_blocked_alias() {
        let dto: FixedRuleDto =
            serde_json::from_str(r#"{"id": 2, "extension": "bat", "isBlocked": true}"#).unwrap();
        let rule = FixedExtensionRule::from(dto);
        assert!(rule.is_blocked);
        assert!(rule.description.is_empty());
    }

    #[test]
    fn test_toggle_body_shape() {
        let body = ToggleBody {
            extension: "exe",
            is_blocked: false,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"extension": "exe", "isBlocked": false})
        );
    }
}
