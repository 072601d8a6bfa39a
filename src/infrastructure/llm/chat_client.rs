//! OpenAI-compatible chat completion client.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::dto::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::sse::content_stream;
use crate::domain::entities::ApiKey;
use crate::domain::errors::UpstreamError;
use crate::domain::ports::{ChatPort, ChatRequest, TextStream};

const SERVICE: &str = "chat";

/// Chat client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// The timeout bounds a whole completion but only the wait for response
/// headers of a stream. A streamed body may take longer as long as chunks
/// keep arriving within the timeout of each other.
pub struct OpenAiChatClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<ApiKey>,
    timeout: Duration,
}

impl std::fmt::Debug for OpenAiChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("configured", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl OpenAiChatClient {
    /// Creates a client.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<ApiKey>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Transport {
                service: SERVICE,
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            timeout,
        })
    }

    async fn send(
        &self,
        request: &ChatRequest,
        stream: bool,
    ) -> Result<reqwest::Response, UpstreamError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(UpstreamError::NotConfigured { service: SERVICE })?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream,
        };

        debug!(model = %self.model, stream, "Sending chat completion request");

        let pending = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key.as_str()))
            .json(&body)
            .send();

        let response = tokio::time::timeout(self.timeout, pending)
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| {
                warn!(error = %e, "Failed to reach chat API");
                UpstreamError::from_reqwest(SERVICE, &e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }
        Ok(response)
    }

    fn timed_out(&self) -> UpstreamError {
        warn!(timeout_secs = self.timeout.as_secs_f64(), "Chat API timed out");
        UpstreamError::Timeout { service: SERVICE }
    }

    async fn complete_within(&self, request: ChatRequest) -> Result<String, UpstreamError> {
        let response = self.send(&request, false).await?;

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to read chat completion");
            if e.is_decode() {
                UpstreamError::malformed(SERVICE, e.to_string())
            } else {
                UpstreamError::from_reqwest(SERVICE, &e)
            }
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| UpstreamError::malformed(SERVICE, "completion has no content"))
    }

    async fn handle_error_response(
        status: StatusCode,
        response: reqwest::Response,
    ) -> UpstreamError {
        let message = match response.json::<ApiErrorResponse>().await {
            Ok(error) => error.error.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };

        warn!(status = status.as_u16(), message = %message, "Chat API returned an error");
        UpstreamError::Status {
            service: SERVICE,
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ChatPort for OpenAiChatClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, UpstreamError> {
        tokio::time::timeout(self.timeout, self.complete_within(request))
            .await
            .map_err(|_| self.timed_out())?
    }

    async fn stream(&self, request: ChatRequest) -> Result<TextStream, UpstreamError> {
        let response = self.send(&request, true).await?;
        Ok(content_stream(response.bytes_stream().boxed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn client(base_url: &str, key: Option<&str>) -> OpenAiChatClient {
        OpenAiChatClient::new(
            base_url,
            "gpt-test",
            key.and_then(ApiKey::new),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_unconfigured_client_makes_no_request() {
        let chat = client("http://127.0.0.1:9", None);

        assert!(!chat.is_configured());
        let result = chat.complete(ChatRequest::new("sys", "hi")).await;
        assert_eq!(result, Err(UpstreamError::NotConfigured { service: SERVICE }));
    }

    #[tokio::test]
    async fn test_complete() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-test",
                "messages": [
                    { "role": "system", "content": "be a wisp" },
                    { "role": "user", "content": "hello" }
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"  Boo!  "}}]}"#)
            .create_async()
            .await;

        let chat = client(&format!("{}/v1/", server.url()), Some("sk-test"));
        let reply = chat.complete(ChatRequest::new("be a wisp", "hello")).await;

        assert_eq!(reply, Ok("Boo!".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_envelope_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let chat = client(&server.url(), Some("sk-wrong"));
        let result = chat.complete(ChatRequest::new("s", "u")).await;

        assert_eq!(
            result,
            Err(UpstreamError::Status {
                service: SERVICE,
                status: 401,
                message: "Incorrect API key provided".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_empty_completion_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let chat = client(&server.url(), Some("sk-test"));
        let result = chat.complete(ChatRequest::new("s", "u")).await;

        assert!(matches!(result, Err(UpstreamError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_stream_outlives_timeout_while_chunks_arrive() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_chunked_body(|w| {
                for word in ["one ", "two ", "three ", "four"] {
                    write!(
                        w,
                        "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{word}\"}}}}]}}\n\n"
                    )?;
                    w.flush()?;
                    std::thread::sleep(Duration::from_millis(400));
                }
                w.write_all(b"data: [DONE]\n\n")
            })
            .create_async()
            .await;

        let chat = OpenAiChatClient::new(
            server.url(),
            "gpt-test",
            ApiKey::new("sk-test"),
            Duration::from_secs(1),
        )
        .unwrap();
        let items: Vec<Result<String, UpstreamError>> = chat
            .stream(ChatRequest::new("s", "u"))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(
            items,
            vec![
                Ok("one ".to_string()),
                Ok("two ".to_string()),
                Ok("three ".to_string()),
                Ok("four".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_slow_completion_times_out() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(|w| {
                w.write_all(b"{\"choices\":")?;
                w.flush()?;
                std::thread::sleep(Duration::from_millis(250));
                w.write_all(b"[")?;
                w.flush()?;
                std::thread::sleep(Duration::from_millis(250));
                w.write_all(br#"{"message":{"content":"late"}}]}"#)
            })
            .create_async()
            .await;

        let chat = OpenAiChatClient::new(
            server.url(),
            "gpt-test",
            ApiKey::new("sk-test"),
            Duration::from_millis(300),
        )
        .unwrap();
        let result = chat.complete(ChatRequest::new("s", "u")).await;

        assert_eq!(result, Err(UpstreamError::Timeout { service: SERVICE }));
    }

    #[tokio::test]
    async fn test_stream() {
        let mut server = mockito::Server::new_async().await;
        let body = [
            r#"data: {"choices":[{"delta":{"content":"Glow"}}]}"#,
            r#"data: {"choices":[{"delta":{"content":"ing"}}]}"#,
            "data: [DONE]",
        ]
        .map(|line| format!("{line}\n\n"))
        .concat();
        server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({ "stream": true })))
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(body)
            .create_async()
            .await;

        let chat = client(&server.url(), Some("sk-test"));
        let fragments: Vec<String> = chat
            .stream(ChatRequest::new("s", "u"))
            .await
            .unwrap()
            .map(Result::unwrap)
            .collect()
            .await;

        assert_eq!(fragments.concat(), "Glowing");
    }
}
