//! Decoding of streamed chat completions (server-sent events).

use std::collections::VecDeque;

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::{self, BoxStream};
use tracing::warn;

use super::dto::ChatCompletionResponse;
use crate::domain::errors::UpstreamError;
use crate::domain::ports::TextStream;

const DONE_SIGNAL: &str = "[DONE]";

/// One decoded SSE payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// A `data:` payload.
    Data(String),
    /// The `[DONE]` terminator.
    Done,
}

/// Incrementally splits a byte stream into `data:` payloads.
///
/// Lines may be split across chunks, including inside multi-byte characters.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    buf: Vec<u8>,
}

impl SseLineBuffer {
    /// Feeds a chunk and returns every frame completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buf.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Some(idx) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=idx).collect();
            if let Some(frame) = parse_line(&String::from_utf8_lossy(&line)) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Flushes a trailing line without newline at end of stream.
    pub fn finish(&mut self) -> Option<SseFrame> {
        let rest = std::mem::take(&mut self.buf);
        parse_line(&String::from_utf8_lossy(&rest))
    }
}

fn parse_line(line: &str) -> Option<SseFrame> {
    let line = line.trim();
    // Only `data:` fields carry payloads.
    let payload = line.strip_prefix("data:")?.trim_start();
    if payload == DONE_SIGNAL {
        Some(SseFrame::Done)
    } else if payload.is_empty() {
        None
    } else {
        Some(SseFrame::Data(payload.to_string()))
    }
}

/// Extracts the text delta from one streamed chunk.
///
/// Chunks without content (role announcements, finish markers) yield `None`.
fn delta_content(payload: &str) -> Result<Option<String>, UpstreamError> {
    let chunk: ChatCompletionResponse = serde_json::from_str(payload)
        .map_err(|e| UpstreamError::malformed("chat", format!("invalid stream chunk: {e}")))?;
    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .filter(|content| !content.is_empty()))
}

struct DecodeState {
    input: BoxStream<'static, reqwest::Result<Bytes>>,
    lines: SseLineBuffer,
    ready: VecDeque<SseFrame>,
    finished: bool,
}

/// Turns a streamed completion body into text fragments.
///
/// The stream ends at `[DONE]` or end of body. Transport failures and
/// undecodable chunks are yielded once as errors and end the stream.
pub fn content_stream(input: BoxStream<'static, reqwest::Result<Bytes>>) -> TextStream {
    let state = DecodeState {
        input,
        lines: SseLineBuffer::default(),
        ready: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(frame) = state.ready.pop_front() {
                match frame {
                    SseFrame::Done => return None,
                    SseFrame::Data(payload) => match delta_content(&payload) {
                        Ok(Some(content)) => return Some((Ok(content), state)),
                        Ok(None) => continue,
                        Err(e) => {
                            warn!(error = %e, "Dropping chat stream");
                            state.ready.clear();
                            state.finished = true;
                            return Some((Err(e), state));
                        }
                    },
                }
            }

            if state.finished {
                return None;
            }

            match state.input.next().await {
                Some(Ok(bytes)) => {
                    let frames = state.lines.push(&bytes);
                    state.ready.extend(frames);
                }
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((Err(UpstreamError::from_reqwest("chat", &e)), state));
                }
                None => {
                    state.finished = true;
                    state.ready.extend(state.lines.finish());
                }
            }
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_split_across_chunks() {
        let mut lines = SseLineBuffer::default();

        assert!(lines.push(b"data: {\"a\"").is_empty());
        assert_eq!(
            lines.push(b":1}\n\ndata: [DONE]\n"),
            vec![SseFrame::Data("{\"a\":1}".to_string()), SseFrame::Done]
        );
    }

    #[test]
    fn test_multibyte_character_split() {
        let text = "data: {\"c\":\"✨\"}\n".as_bytes();
        let (head, tail) = text.split_at(13);
        let mut lines = SseLineBuffer::default();

        assert!(lines.push(head).is_empty());
        assert_eq!(
            lines.push(tail),
            vec![SseFrame::Data("{\"c\":\"✨\"}".to_string())]
        );
    }

    #[test]
    fn test_ignores_comments_and_other_fields() {
        let mut lines = SseLineBuffer::default();
        let frames = lines.push(b": keep-alive\nevent: message\nid: 3\n\ndata:x\n");
        assert_eq!(frames, vec![SseFrame::Data("x".to_string())]);
    }

    #[test]
    fn test_finish_flushes_trailing_line() {
        let mut lines = SseLineBuffer::default();
        assert!(lines.push(b"data: [DONE]").is_empty());
        assert_eq!(lines.finish(), Some(SseFrame::Done));
        assert_eq!(lines.finish(), None);
    }

    #[test]
    fn test_delta_content() {
        let chunk = r#"{"choices":[{"delta":{"content":"Hi"}}]}"#;
        assert_eq!(delta_content(chunk).unwrap(), Some("Hi".to_string()));

        let role_only = r#"{"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(delta_content(role_only).unwrap(), None);

        assert!(delta_content("nope").is_err());
    }

    #[tokio::test]
    async fn test_content_stream_stops_at_done() {
        let chunks: Vec<reqwest::Result<Bytes>> = vec![
            Ok(Bytes::from_static(
                b"data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            )),
            Ok(Bytes::from_static(
                b"data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"}}]}\n\ndata: {\"choi",
            )),
            Ok(Bytes::from_static(
                b"ces\":[{\"delta\":{\"content\":\" wisp\"}}]}\n\ndata: [DONE]\n\n",
            )),
            Ok(Bytes::from_static(
                b"data: {\"choices\":[{\"delta\":{\"content\":\"ignored\"}}]}\n\n",
            )),
        ];

        let fragments: Vec<String> = content_stream(stream::iter(chunks).boxed())
            .map(Result::unwrap)
            .collect()
            .await;

        assert_eq!(fragments, vec!["Hello", " wisp"]);
    }

    #[tokio::test]
    async fn test_content_stream_reports_bad_chunk_once() {
        let chunks: Vec<reqwest::Result<Bytes>> = vec![Ok(Bytes::from_static(
            b"data: {broken\n\ndata: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n\n",
        ))];

        let items: Vec<Result<String, UpstreamError>> =
            content_stream(stream::iter(chunks).boxed()).collect().await;

        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(UpstreamError::Malformed { .. })));
    }
}
