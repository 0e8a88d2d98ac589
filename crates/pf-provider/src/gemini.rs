//! Google Gemini `generateContent`.

use serde::{Deserialize, Serialize};

use crate::{CompletionRequest, ProviderClient, error::ProviderError, http::check_response};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl ProviderClient {
    /// POST `{base_url}/models/{model}:generateContent`. The key travels in
    /// the `x-goog-api-key` header rather than the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the request fails, the provider returns a
    /// non-success status, or no candidate text is present.
    pub(crate) async fn complete_gemini(
        &self,
        request: &CompletionRequest,
        model: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: &request.system,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                response_mime_type: "application/json",
            },
        };
        let resp = check_response(
            self.http
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?,
        )
        .await?;

        let data: GenerateResponse = resp.json().await?;
        candidate_text(data)
    }
}

/// Concatenated text parts of the first candidate.
fn candidate_text(data: GenerateResponse) -> Result<String, ProviderError> {
    let text: String = data
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(ProviderError::Malformed(
            "no candidates[0].content.parts text".to_string(),
        ));
    }
    Ok(text)
}
