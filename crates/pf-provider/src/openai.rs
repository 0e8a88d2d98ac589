//! `OpenAI`-compatible chat completions (`OpenAI`, `OpenRouter`).

use serde::{Deserialize, Serialize};

use crate::{CompletionRequest, ProviderClient, error::ProviderError, http::check_response};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ProviderClient {
    /// POST `{base_url}/chat/completions` with a system and a user message.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the request fails, the provider returns a
    /// non-success status, or the response carries no message content.
    pub(crate) async fn complete_chat(
        &self,
        request: &CompletionRequest,
        model: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: 0.2,
        };
        let resp = check_response(
            self.http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?,
        )
        .await?;

        let data: ChatResponse = resp.json().await?;
        first_content(data)
    }
}

fn first_content(data: ChatResponse) -> Result<String, ProviderError> {
    data.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::Malformed("no choices[0].message.content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": "```json\n{\"role\": \"Assistant\"}\n```"},
                "finish_reason": "stop"
            }
        ],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }"#;

    #[test]
    fn parse_chat_fixture() {
        let data: ChatResponse = serde_json::from_str(FIXTURE).unwrap();
        let content = first_content(data).unwrap();
        assert!(content.starts_with("```json"));
    }

    #[test]
    fn empty_choices_is_malformed() {
        let data: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(first_content(data), Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn request_body_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            temperature: 0.2,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }
}
