use crate::generator::GeneratorError;
use crate::llm::config::LlmConfig;
use crate::llm::response::preview;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur while talking to the text generation API
#[derive(Debug, Error)]
pub enum LlmServiceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("No text in response: {0}")]
    EmptyResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Something that turns a prompt into a text reply.
///
/// Implementations perform exactly one request per call and return the reply
/// unmodified.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmServiceError>;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}

/// Client for the Gemini `generateContent` REST endpoint
pub struct GeminiService {
    client: Client,
    config: LlmConfig,
}

impl GeminiService {
    /// Create a service from a resolved configuration.
    ///
    /// Fails with [`GeneratorError::MissingCredential`] when the key is empty.
    pub fn new(config: LlmConfig) -> Result<Self, GeneratorError> {
        if !config.has_api_key() {
            tracing::error!("API key not provided");
            return Err(GeneratorError::MissingCredential);
        }
        debug!("API key found");

        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    /// Resolve configuration from the process environment, then create the service
    pub fn from_env(explicit_key: Option<String>) -> Result<Self, GeneratorError> {
        Self::new(LlmConfig::from_env(explicit_key))
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiService {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmServiceError> {
        trace!("Sending prompt to AI service: {}...", preview(prompt, 100));

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        debug!(
            "Making API request to Gemini: model={}, prompt_chars={}",
            self.config.model,
            prompt.len()
        );
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(match status.as_u16() {
                401 | 403 => LlmServiceError::Authentication(error_text),
                429 => LlmServiceError::RateLimitExceeded(error_text),
                code => LlmServiceError::Api {
                    status: code,
                    message: error_text,
                },
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmServiceError::Other(format!("Invalid response body: {}", e)))?;
        let text = body.text().ok_or_else(|| {
            let reason = body
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .unwrap_or_else(|| "no candidates returned".to_string());
            LlmServiceError::EmptyResponse(reason)
        })?;

        debug!("Received response from AI service");
        trace!("Raw response: {}...", preview(&text, 100));

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let parts: Vec<&str> = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.concat())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    #[test]
    fn test_new_without_key_fails() {
        let result = GeminiService::new(LlmConfig::default());
        assert!(matches!(result, Err(GeneratorError::MissingCredential)));
    }

    #[test]
    fn test_new_with_key() {
        let service = GeminiService::new(LlmConfig::with_api_key("parameter_api_key")).unwrap();
        assert_eq!(service.config().api_key, "parameter_api_key");
        assert_eq!(service.model(), "gemini-pro");
    }

    #[test]
    fn test_endpoint() {
        let config = LlmConfig {
            api_base: "http://localhost:9000/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            ..LlmConfig::with_api_key("k")
        };
        let service = GeminiService::new(config).unwrap();
        assert_eq!(
            service.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some("hello".to_string()),
                }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "repos:"}, {"text": " []"}]}, "finishReason": "STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(body.text().as_deref(), Some("repos: []"));
    }

    #[test]
    fn test_response_without_candidates() {
        let body: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(body.text().is_none());
        assert_eq!(
            body.prompt_feedback.and_then(|f| f.block_reason).as_deref(),
            Some("SAFETY")
        );
    }

    /// Accept one connection, answer it with a canned response and return the raw request
    async fn serve_once(status: &str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let status = status.to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}/v1beta", addr), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&data);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&data).into_owned()
    }

    fn service_at(api_base: String) -> GeminiService {
        GeminiService::new(LlmConfig {
            api_base,
            ..LlmConfig::with_api_key("test_api_key")
        })
        .unwrap()
    }

    async fn invoke_against(status: &str, body: &str) -> Result<String, LlmServiceError> {
        let (api_base, server) = serve_once(status, body.to_string()).await;
        let result = service_at(api_base).invoke("test prompt").await;
        server.await.unwrap();
        result
    }

    #[tokio::test]
    async fn test_invoke_returns_reply_unmodified() {
        let reply = "  ```yaml\nrepos:\n- repo: x\n```\n\n";
        let body = serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": reply}]}, "finishReason": "STOP"}]
        })
        .to_string();
        let (api_base, server) = serve_once("200 OK", body).await;

        let text = service_at(api_base).invoke("test prompt").await.unwrap();
        assert_eq!(text, reply);

        let request = server.await.unwrap();
        let lowered = request.to_lowercase();
        assert!(lowered.starts_with("post /v1beta/models/gemini-pro:generatecontent "));
        assert!(lowered.contains("x-goog-api-key: test_api_key"));
        assert!(request.contains(r#"{"contents":[{"role":"user","parts":[{"text":"test prompt"}]}]}"#));
    }

    #[tokio::test]
    async fn test_invoke_unauthorized() {
        let result = invoke_against("401 Unauthorized", r#"{"error": "API key not valid"}"#).await;
        match result {
            Err(LlmServiceError::Authentication(message)) => assert!(message.contains("API key not valid")),
            other => panic!("expected authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_forbidden() {
        let result = invoke_against("403 Forbidden", r#"{"error": "permission denied"}"#).await;
        assert!(matches!(result, Err(LlmServiceError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_invoke_rate_limited() {
        let result = invoke_against("429 Too Many Requests", r#"{"error": "quota exceeded"}"#).await;
        match result {
            Err(LlmServiceError::RateLimitExceeded(message)) => assert!(message.contains("quota exceeded")),
            other => panic!("expected rate limit error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_server_error_keeps_status_and_body() {
        let result = invoke_against("500 Internal Server Error", r#"{"error": "backend unavailable"}"#).await;
        match result {
            Err(LlmServiceError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("backend unavailable"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_blocked_prompt() {
        let result = invoke_against("200 OK", r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).await;
        match result {
            Err(LlmServiceError::EmptyResponse(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected empty response error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_invalid_body() {
        let result = invoke_against("200 OK", "this is not json").await;
        match result {
            Err(LlmServiceError::Other(message)) => assert!(message.contains("Invalid response body")),
            other => panic!("expected invalid body error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_transport_failure() {
        // Bind then release a port so nothing is listening on it
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = service_at(format!("http://{}/v1beta", addr)).invoke("test prompt").await;
        assert!(matches!(result, Err(LlmServiceError::Network(_))));
    }
}
