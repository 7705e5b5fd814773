use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::{TranslateError, TranslateResult};
use crate::language::Language;

pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

#[derive(Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: MyMemoryData,
}

#[derive(Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// One user-initiated translation, built fresh for every action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub source_language: Language,
    pub target_language: Language,
}

impl TranslationRequest {
    pub fn new(source_text: &str, source_language: Language, target_language: Language) -> Self {
        Self {
            source_text: source_text.to_string(),
            source_language,
            target_language,
        }
    }
}

/// Client for the MyMemory `get` endpoint
#[derive(Clone)]
pub struct TranslationClient {
    client: Client,
    endpoint: String,
    contact_email: Option<String>,
}

impl TranslationClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            contact_email: None,
        }
    }

    /// Sent as `de=`; MyMemory raises the anonymous daily quota for it
    pub fn with_contact_email(mut self, email: Option<String>) -> Self {
        self.contact_email = email.filter(|e| !e.trim().is_empty());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the GET URL for a request without sending anything
    pub fn request_url(&self, request: &TranslationRequest) -> TranslateResult<Url> {
        if request.source_text.is_empty() {
            return Err(TranslateError::InvalidInput("source text is empty".to_string()));
        }

        let encoded = urlencoding::encode(&request.source_text);
        if encoded.is_empty() {
            return Err(TranslateError::InvalidInput(
                "source text could not be encoded".to_string(),
            ));
        }

        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| TranslateError::InvalidUrl(format!("{}: {}", self.endpoint, e)))?;

        let mut query = format!(
            "q={}&langpair={}|{}",
            encoded,
            request.source_language.code(),
            request.target_language.code()
        );
        if let Some(email) = &self.contact_email {
            query.push_str("&de=");
            query.push_str(&urlencoding::encode(email));
        }

        // Keep any parameters the configured endpoint already carries
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", existing, query),
            _ => query,
        };
        url.set_query(Some(&query));

        Ok(url)
    }

    pub async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> TranslateResult<String> {
        self.send(&TranslationRequest::new(text, from, to)).await
    }

    pub async fn send(&self, request: &TranslationRequest) -> TranslateResult<String> {
        let url = self.request_url(request)?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TranslateError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranslateError::RequestFailed(format!(
                "translation service returned status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TranslateError::InvalidResponse(format!("unreadable body: {}", e)))?;

        parse_translated_text(&body)
    }
}

impl Default for TranslationClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Pull `responseData.translatedText` out of a MyMemory response body
pub fn parse_translated_text(body: &str) -> TranslateResult<String> {
    let parsed: MyMemoryResponse = serde_json::from_str(body)
        .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;
    Ok(parsed.response_data.translated_text)
}
