use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest, Usage};

/// DeepL client for interacting with the DeepL REST API
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL, e.g. https://api-free.deepl.com
    endpoint: String,
}

/// Body of a /v2/translate request
#[derive(Debug, Serialize)]
pub struct DeepLTranslateRequest {
    /// Texts to translate; this client always sends exactly one
    text: Vec<String>,

    /// Source language; variants are not accepted here
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,

    /// Target language, variants allowed
    target_lang: String,

    /// "xml" or "html"
    #[serde(skip_serializing_if = "Option::is_none")]
    tag_handling: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    formality: Option<String>,
}

impl DeepLTranslateRequest {
    /// Build the wire request from a provider-neutral request
    pub fn from_request(request: &TranslationRequest) -> Self {
        let source = request.source_language.trim();
        let source_lang = if source.is_empty() {
            None
        } else {
            // "EN-US" is valid as a target only
            Some(source.split('-').next().unwrap_or(source).to_uppercase())
        };

        Self {
            text: vec![request.text.clone()],
            source_lang,
            target_lang: request.target_language.trim().to_uppercase(),
            tag_handling: request.tag_handling.clone(),
            formality: request.formality.clone(),
        }
    }
}

/// Body of a /v2/translate response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslateResponse {
    pub translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    #[serde(default)]
    pub detected_source_language: Option<String>,
    pub text: String,
}

/// Body of a /v2/usage response
#[derive(Debug, Deserialize)]
pub struct DeepLUsageResponse {
    #[serde(default)]
    pub character_count: Option<u64>,
    #[serde(default)]
    pub character_limit: Option<u64>,
}

impl From<DeepLUsageResponse> for Usage {
    fn from(response: DeepLUsageResponse) -> Self {
        Usage {
            character_count: response.character_count.unwrap_or(0),
            // No reported limit means the plan is not character-bound
            character_limit: response.character_limit.unwrap_or(u64::MAX),
        }
    }
}

/// Error body returned by DeepL on failures
#[derive(Debug, Deserialize)]
struct DeepLErrorBody {
    message: String,
}

/// Map a non-success HTTP status to a provider error
pub fn error_for_status(status_code: u16, message: String) -> ProviderError {
    match status_code {
        401 | 403 => ProviderError::AuthenticationError(message),
        429 => ProviderError::RateLimitExceeded(message),
        456 => ProviderError::QuotaExceeded(message),
        _ => ProviderError::ApiError { status_code, message },
    }
}

impl DeepL {
    /// Create a new DeepL client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        })
    }

    /// Create a client from the translation section of the config
    pub fn from_config(config: &TranslationConfig) -> Result<Self, ProviderError> {
        Self::new(config.api_key.trim(), config.get_endpoint(), config.timeout_secs)
    }

    /// Base URL this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolve an API path against the endpoint
    pub fn api_url(&self, path: &str) -> Result<Url, ProviderError> {
        let mut base = self.endpoint.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Url::parse(&base)
            .and_then(|url| url.join(path))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", self.endpoint, e)))
    }

    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.api_key)
    }

    /// Turn a failed response into a provider error
    async fn error_from_response(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());

        let message = serde_json::from_str::<DeepLErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    body
                }
            });

        error!("DeepL API error ({}): {}", status, message);
        error_for_status(status.as_u16(), message)
    }

    fn transport_error(e: reqwest::Error) -> ProviderError {
        if e.is_timeout() || e.is_connect() {
            ProviderError::ConnectionError(e.to_string())
        } else {
            ProviderError::RequestFailed(e.to_string())
        }
    }

    /// Send a translate request and return the raw response body
    pub async fn translate_raw(&self, request: &DeepLTranslateRequest) -> Result<DeepLTranslateResponse, ProviderError> {
        let url = self.api_url("v2/translate")?;

        let response = self.client.post(url)
            .header(header::AUTHORIZATION, self.auth_header())
            .json(request)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response.json::<DeepLTranslateResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse DeepL translate response: {}", e)))
    }
}

#[async_trait]
impl Provider for DeepL {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let wire = DeepLTranslateRequest::from_request(request);
        let response = self.translate_raw(&wire).await?;

        let translation = response.translations.into_iter().next()
            .ok_or_else(|| ProviderError::ParseError("DeepL returned no translations".to_string()))?;

        if let Some(detected) = &translation.detected_source_language {
            debug!("DeepL detected source language {}", detected);
        }

        Ok(translation.text)
    }

    async fn usage(&self) -> Result<Usage, ProviderError> {
        let url = self.api_url("v2/usage")?;

        let response = self.client.get(url)
            .header(header::AUTHORIZATION, self.auth_header())
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let usage = response.json::<DeepLUsageResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse DeepL usage response: {}", e)))?;

        Ok(usage.into())
    }

    fn name(&self) -> &str {
        "DeepL"
    }
}
