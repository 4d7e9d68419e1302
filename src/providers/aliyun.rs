/*!
 * Aliyun machine translation client.
 *
 * Thin reqwest client for the general-text translation endpoint. One
 * request translates one unit of text; retry and rate limiting are
 * deliberately out of scope, the dispatcher treats every failure as a
 * failed unit.
 */

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::TranslationClient;

/// Client for the Aliyun general-text translation API
#[derive(Debug)]
pub struct AliyunTranslate {
    /// Endpoint URL of the translation service
    endpoint: String,
    /// Access key id credential
    access_key_id: String,
    /// Access key secret credential
    access_key_secret: String,
    /// HTTP client for making requests
    client: Client,
}

/// Request body for the general-text translation endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateGeneralRequest<'a> {
    /// Payload format, always plain text
    format_type: &'a str,
    /// Source language code
    source_language: &'a str,
    /// Target language code
    target_language: &'a str,
    /// Text to translate
    source_text: &'a str,
    /// Translation scene
    scene: &'a str,
}

/// Response body from the general-text translation endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateGeneralResponse {
    /// Response code, "200" on success
    #[serde(default)]
    code: Option<String>,
    /// Error message, populated on failure
    #[serde(default)]
    message: Option<String>,
    /// Translation payload
    #[serde(default)]
    data: Option<TranslateData>,
}

/// Payload of a successful translation response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TranslateData {
    /// The translated text
    translated: String,
}

impl AliyunTranslate {
    /// Create a new client against `endpoint` with access-key credentials.
    ///
    /// The endpoint must be a valid http(s) URL; credentials must be
    /// non-empty since the service rejects anonymous requests.
    pub fn new(
        endpoint: impl Into<String>,
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint URL: {}", e)))?;

        let access_key_id = access_key_id.into();
        let access_key_secret = access_key_secret.into();
        if access_key_id.is_empty() || access_key_secret.is_empty() {
            return Err(ProviderError::AuthenticationError(
                "Access key id and secret must be configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            access_key_id,
            access_key_secret,
            client,
        })
    }
}

#[async_trait]
impl TranslationClient for AliyunTranslate {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let request = TranslateGeneralRequest {
            format_type: "text",
            source_language,
            target_language,
            source_text: text,
            scene: "general",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-acs-accesskey-id", &self.access_key_id)
            .header("x-acs-accesskey-secret", &self.access_key_secret)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::AuthenticationError(format!(
                "Service rejected credentials ({})",
                status
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let body: TranslateGeneralResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        // The service reports failures inside a 200 body as well
        if let Some(code) = body.code.as_deref() {
            if code != "200" {
                return Err(ProviderError::ApiError {
                    status_code: code.parse().unwrap_or(0),
                    message: body
                        .message
                        .unwrap_or_else(|| "Service reported an error".to_string()),
                });
            }
        }

        body.data
            .map(|d| d.translated)
            .ok_or_else(|| {
                ProviderError::ParseError("Response is missing the translated payload".to_string())
            })
    }
}
