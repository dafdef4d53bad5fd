use super::RewriteProvider;
use super::prompt::refinement_prompt;
use crate::error::ProviderError;
use crate::style::Style;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const MAX_TOKENS: u32 = 1000;
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages-API client for the rewrite endpoint.
///
/// Auth is optional: when no key is configured the request goes out
/// without auth headers and the host environment is expected to supply
/// them (a rejection then lands in the refiner's fallback path).
pub struct AnthropicClient {
    /// Pre-computed auth: `("Authorization", "Bearer <token>")` or `("x-api-key", "<key>")`.
    cached_auth: Option<(&'static str, String)>,
    cached_messages_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    content: Vec<ResponseContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Unsupported,
}

impl AnthropicClient {
    pub fn new(api_key: Option<&str>, model: Option<&str>) -> Self {
        Self::with_base_url(api_key, model, None)
    }

    pub fn with_base_url(api_key: Option<&str>, model: Option<&str>, base_url: Option<&str>) -> Self {
        let base = base_url
            .map_or("https://api.anthropic.com", |url| url.trim_end_matches('/'))
            .to_string();
        let cached_messages_url = format!("{base}/v1/messages");
        let cached_auth = api_key.map(str::trim).filter(|key| !key.is_empty()).map(|key| {
            if Self::is_setup_token(key) {
                ("Authorization", format!("Bearer {key}"))
            } else {
                ("x-api-key", key.to_string())
            }
        });
        Self {
            cached_auth,
            cached_messages_url,
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn is_setup_token(token: &str) -> bool {
        token.starts_with("sk-ant-oat01-")
    }

    fn request_error(message: impl Into<String>) -> ProviderError {
        ProviderError::Request {
            provider: "anthropic".to_string(),
            message: message.into(),
        }
    }

    /// Extract the joined text of the response content blocks.
    fn extract_text(chat_response: &ChatResponse) -> String {
        chat_response
            .content
            .iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text.as_str()),
                ResponseContentBlock::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let mut builder = self
            .client
            .post(&self.cached_messages_url)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json");
        if let Some((auth_name, auth_value)) = self.cached_auth.as_ref() {
            builder = builder.header(*auth_name, auth_value);
        }

        let response = builder
            .json(&request)
            .send()
            .await
            .map_err(|err| Self::request_error(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            return Err(Self::request_error(format!("{status}: {body}")));
        }

        let chat_response: ChatResponse =
            response.json().await.map_err(|err| ProviderError::Malformed {
                provider: "anthropic".to_string(),
                message: err.to_string(),
            })?;

        Ok(Self::extract_text(&chat_response))
    }
}

#[async_trait]
impl RewriteProvider for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn rewrite(&self, original: &str, style: Style) -> Result<String, ProviderError> {
        self.complete(&refinement_prompt(original, style)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn creates_with_key() {
        let client = AnthropicClient::new(Some("sk-ant-test123"), None);
        let (name, value) = client.cached_auth.as_ref().unwrap();
        assert_eq!(*name, "x-api-key");
        assert_eq!(value, "sk-ant-test123");
        assert_eq!(
            client.cached_messages_url,
            "https://api.anthropic.com/v1/messages"
        );
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn creates_without_key() {
        let client = AnthropicClient::new(None, Some("claude-x"));
        assert!(client.cached_auth.is_none());
        assert_eq!(client.model, "claude-x");
    }

    #[test]
    fn empty_or_whitespace_key_is_treated_as_absent() {
        assert!(AnthropicClient::new(Some(""), None).cached_auth.is_none());
        assert!(AnthropicClient::new(Some("   "), None).cached_auth.is_none());
    }

    #[test]
    fn setup_token_uses_bearer_auth() {
        let client = AnthropicClient::new(Some("sk-ant-oat01-abc123"), None);
        let (name, value) = client.cached_auth.as_ref().unwrap();
        assert_eq!(*name, "Authorization");
        assert_eq!(value, "Bearer sk-ant-oat01-abc123");
    }

    #[test]
    fn custom_base_url_trims_trailing_slash() {
        let client =
            AnthropicClient::with_base_url(None, None, Some("https://api.example.com/"));
        assert_eq!(
            client.cached_messages_url,
            "https://api.example.com/v1/messages"
        );
    }

    #[test]
    fn chat_request_serializes_single_user_message() {
        let request = ChatRequest {
            model: "claude-x".to_string(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: "hello".to_string(),
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "claude-x");
        assert_eq!(value["max_tokens"], 1000);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn chat_response_joins_text_blocks_and_skips_unknown() {
        let json = r#"{"content":[
            {"type":"text","text":"First"},
            {"type":"thinking","thinking":"..."},
            {"type":"text","text":"Second"}
        ]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(AnthropicClient::extract_text(&response), "First\nSecond");
    }

    #[tokio::test]
    async fn rewrite_posts_to_messages_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "  A sharper prompt.  "}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnthropicClient::with_base_url(Some("test-key"), None, Some(&server.uri()));
        let refined = client.rewrite("Write a blog post", Style::Concise).await.unwrap();
        assert_eq!(refined, "A sharper prompt.");
    }

    #[tokio::test]
    async fn rewrite_without_key_sends_no_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "ok"}]
            })))
            .mount(&server)
            .await;

        let client = AnthropicClient::with_base_url(None, None, Some(&server.uri()));
        assert_eq!(
            client.rewrite("x", Style::Detailed).await.unwrap(),
            "ok"
        );

        let received = server.received_requests().await.unwrap();
        assert!(received[0].headers.get("x-api-key").is_none());
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_a_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = AnthropicClient::with_base_url(Some("k"), None, Some(&server.uri()));
        let err = client.rewrite("x", Style::Creative).await.unwrap_err();
        assert!(matches!(err, ProviderError::Request { .. }));
        assert!(err.to_string().contains("529"));
    }

    #[tokio::test]
    async fn invalid_body_is_a_malformed_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = AnthropicClient::with_base_url(Some("k"), None, Some(&server.uri()));
        let err = client.rewrite("x", Style::Analytical).await.unwrap_err();
        assert!(matches!(err, ProviderError::Malformed { .. }));
    }
}
