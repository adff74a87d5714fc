//! Chat completion client for the puzzle generator.
//!
//! OpenAI goes through `async-openai`. Gemini and Anthropic are spoken over
//! plain HTTPS JSON with reqwest.

use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::Display as StrumDisplay;
use tracing::{debug, error, info, instrument};

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Vendor hosting the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini.
    Gemini,
    /// Anthropic (Claude models).
    Anthropic,
    /// OpenAI (GPT models).
    OpenAI,
}

impl LlmProvider {
    /// Environment variable holding the API key for this provider.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }
}

/// Credentials and limits for one model.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl LlmConfig {
    /// Creates a new LLM configuration.
    #[instrument(skip(api_key), fields(provider = %provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
        }
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

/// Single-turn chat client.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a client for `config`.
    #[instrument(skip(config), fields(provider = %config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Sends one system + user turn and returns the reply text.
    ///
    /// Gemini is asked for a JSON reply directly; the others are told so in
    /// the prompt.
    #[instrument(
        skip(self, system_prompt, user_message),
        fields(provider = %self.config.provider, model = %self.config.model)
    )]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let vendor = self.config.provider;
        let content = match vendor {
            LlmProvider::Gemini => {
                let body = self
                    .send_json(self.gemini_request(system_prompt, user_message))
                    .await?;
                gemini_reply(&body).map(str::to_string)
            }
            LlmProvider::Anthropic => {
                let body = self
                    .send_json(self.anthropic_request(system_prompt, user_message))
                    .await?;
                anthropic_reply(&body).map(str::to_string)
            }
            LlmProvider::OpenAI => {
                let response = self.generate_openai(system_prompt, user_message).await?;
                openai_reply(&response)
            }
        }
        .ok_or_else(|| LlmError::new(format!("No text content in {} response", vendor)))?;

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    fn gemini_request(&self, system_prompt: &str, user_message: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!(
                "{}/{}:generateContent",
                GEMINI_ENDPOINT, self.config.model
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&json!({
                "systemInstruction": { "parts": [{ "text": system_prompt }] },
                "contents": [{ "role": "user", "parts": [{ "text": user_message }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "maxOutputTokens": self.config.max_tokens
                }
            }))
    }

    fn anthropic_request(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> reqwest::RequestBuilder {
        self.http
            .post(ANTHROPIC_ENDPOINT)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": self.config.model,
                "max_tokens": self.config.max_tokens,
                "system": system_prompt,
                "messages": [{ "role": "user", "content": user_message }]
            }))
    }

    /// Sends a raw JSON request, failing on non-success status or invalid JSON.
    #[instrument(skip_all, fields(provider = %self.config.provider))]
    async fn send_json(&self, request: reqwest::RequestBuilder) -> Result<Value, LlmError> {
        let vendor = self.config.provider;
        let response = request
            .send()
            .await
            .map_err(|e| LlmError::new(format!("{} request failed: {}", vendor, e)))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| LlmError::new(format!("Failed to read {} response: {}", vendor, e)))?;
        if !status.is_success() {
            return Err(LlmError::new(format!(
                "{} returned {}: {}",
                vendor, status, raw
            )));
        }

        debug!(response_length = raw.len(), "Parsing response");
        serde_json::from_str(&raw)
            .map_err(|e| LlmError::new(format!("Failed to parse {} response: {}", vendor, e)))
    }

    /// Builds the typed chat completion request.
    fn openai_request(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<CreateChatCompletionRequest, LlmError> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| {
                        LlmError::new(format!("Failed to build system message: {}", e))
                    })?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()
                    .map_err(|e| LlmError::new(format!("Failed to build user message: {}", e)))?,
            ),
        ];

        CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .max_tokens(self.config.max_tokens)
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build request: {}", e)))
    }

    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_openai(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<CreateChatCompletionResponse, LlmError> {
        let client = OpenAIClient::with_config(
            OpenAIConfig::new().with_api_key(self.config.api_key.clone()),
        );
        let request = self.openai_request(system_prompt, user_message)?;

        debug!("Sending request to OpenAI");
        client
            .chat()
            .create(request)
            .await
            .map_err(|e| LlmError::new(format!("OpenAI API error: {}", e)))
    }
}

fn gemini_reply(body: &Value) -> Option<&str> {
    body["candidates"][0]["content"]["parts"][0]["text"].as_str()
}

fn anthropic_reply(body: &Value) -> Option<&str> {
    body["content"][0]["text"].as_str()
}

fn openai_reply(response: &CreateChatCompletionResponse) -> Option<String> {
    response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(provider: LlmProvider) -> LlmClient {
        LlmClient::new(LlmConfig::new(
            provider,
            "test-key".to_string(),
            "test-model".to_string(),
            256,
        ))
    }

    fn json_body(request: &reqwest::Request) -> Value {
        let bytes = request
            .body()
            .and_then(|b| b.as_bytes())
            .expect("Request has no buffered body");
        serde_json::from_slice(bytes).expect("Body is not JSON")
    }

    #[test]
    fn test_gemini_reply_text() {
        let body = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "[{\"id\":\"1\"}]" }] }
            }]
        });
        assert_eq!(gemini_reply(&body), Some("[{\"id\":\"1\"}]"));
    }

    #[test]
    fn test_anthropic_reply_text() {
        let body = json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "text", "text": "مرحبا" }]
        });
        assert_eq!(anthropic_reply(&body), Some("مرحبا"));
    }

    #[test]
    fn test_openai_reply_text() {
        let response: CreateChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Hello, world!" },
                "finish_reason": "stop",
                "logprobs": null
            }]
        }))
        .expect("Canned response did not deserialize");
        assert_eq!(openai_reply(&response).as_deref(), Some("Hello, world!"));
    }

    #[test]
    fn test_missing_reply_text_is_none() {
        let error_body = json!({ "error": { "message": "quota exceeded" } });
        assert_eq!(gemini_reply(&error_body), None);
        assert_eq!(anthropic_reply(&error_body), None);

        let blocked = json!({ "candidates": [{ "finishReason": "SAFETY" }] });
        assert_eq!(gemini_reply(&blocked), None);

        let tool_only = json!({ "content": [{ "type": "tool_use", "id": "t1" }] });
        assert_eq!(anthropic_reply(&tool_only), None);

        let no_choices: CreateChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-2",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": []
        }))
        .expect("Canned response did not deserialize");
        assert_eq!(openai_reply(&no_choices), None);
    }

    #[tokio::test]
    async fn test_gemini_request_shape() {
        let request = client(LlmProvider::Gemini)
            .gemini_request("system", "user")
            .build()
            .expect("Request did not build");

        assert!(request.url().as_str().ends_with("/test-model:generateContent"));
        assert_eq!(
            request.headers().get("x-goog-api-key").map(|v| v.as_bytes()),
            Some(b"test-key".as_slice())
        );
        let body = json_body(&request);
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "system");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "user");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
    }

    #[tokio::test]
    async fn test_anthropic_request_shape() {
        let request = client(LlmProvider::Anthropic)
            .anthropic_request("system", "user")
            .build()
            .expect("Request did not build");

        assert_eq!(request.url().as_str(), ANTHROPIC_ENDPOINT);
        assert!(request.headers().contains_key("x-api-key"));
        assert!(request.headers().contains_key("anthropic-version"));
        let body = json_body(&request);
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["system"], "system");
        assert_eq!(body["messages"][0]["content"], "user");
        assert_eq!(body["max_tokens"], 256);
    }

    #[test]
    fn test_openai_request_shape() {
        let request = client(LlmProvider::OpenAI)
            .openai_request("system", "user")
            .expect("Request did not build");

        assert_eq!(request.model, "test-model");
        assert_eq!(request.messages.len(), 2);
        assert!(matches!(
            request.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            request.messages[1],
            ChatCompletionRequestMessage::User(_)
        ));
    }
}
