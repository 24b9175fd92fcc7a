//! Yandex Translate API client.
//!
//! Uses API-key authentication rather than an OAuth token; the request is a
//! single-element batch because that is all the aggregator ever needs.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::TranslateError;

const TRANSLATE_API_BASE: &str = "https://translate.api.cloud.yandex.net/translate/v2";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    target_language_code: &'a str,
    texts: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

pub struct TranslateClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TranslateClient {
    pub fn new(api_key: &str) -> Result<Self, TranslateError> {
        Self::with_base_url(api_key, TRANSLATE_API_BASE)
    }

    /// Client against a non-default endpoint (tests, mirrors).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn auth_header(&self) -> String {
        format!("Api-Key {}", self.api_key)
    }

    /// Translate text into the target language.
    #[instrument(skip(self, text), level = "info")]
    pub async fn translate(
        &self,
        text: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let url = format!("{}/translate", self.base_url);
        let body = TranslateRequest {
            target_language_code: target_lang,
            texts: vec![text],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 401 {
                return Err(TranslateError::Unauthorized);
            }
            let text = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let resp: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

        resp.translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| TranslateError::InvalidResponse("empty translations".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_translate() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(header("Authorization", "Api-Key test_key"))
            .and(body_json(serde_json::json!({
                "targetLanguageCode": "en",
                "texts": ["Привет, мир!"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translations": [{"text": "Hello, world!"}]
            })))
            .mount(&mock_server)
            .await;

        let client = TranslateClient::with_base_url("test_key", &mock_server.uri()).unwrap();
        let translated = client.translate("Привет, мир!", "en").await.unwrap();

        assert_eq!(translated, "Hello, world!");
    }

    #[tokio::test]
    async fn test_empty_translations_is_invalid() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translations": []
            })))
            .mount(&mock_server)
            .await;

        let client = TranslateClient::with_base_url("test_key", &mock_server.uri()).unwrap();
        let result = client.translate("hello", "ru").await;

        assert!(matches!(result, Err(TranslateError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = TranslateClient::with_base_url("bad_key", &mock_server.uri()).unwrap();
        let result = client.translate("hello", "en").await;

        assert!(matches!(result, Err(TranslateError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = TranslateClient::with_base_url("test_key", &mock_server.uri()).unwrap();
        let result = client.translate("hello", "en").await;

        assert!(matches!(
            result,
            Err(TranslateError::Api { status: 500, .. })
        ));
    }
}
