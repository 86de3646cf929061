//! Server-Sent Events (SSE) streaming parser.
//!
//! Gemini's `streamGenerateContent?alt=sse` endpoint delivers the reply as
//! a sequence of SSE events, each carrying a partial JSON response. The
//! parser works on any buffered async reader so it can be driven by a
//! reqwest body or by an in-memory buffer.

use futures_util::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;

use crate::AiError;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The event type, when the server sent an `event:` field.
    pub event: Option<String>,
    /// The event data (JSON string).
    pub data: String,
}

/// Parse an SSE stream from a reqwest response, calling `on_event` for each event.
pub async fn parse_sse_stream(
    response: reqwest::Response,
    on_event: impl FnMut(SseEvent),
) -> Result<(), AiError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    parse_sse_lines(reader, on_event).await
}

/// Parse SSE events line by line from `reader`.
pub async fn parse_sse_lines<R>(reader: R, mut on_event: impl FnMut(SseEvent)) -> Result<(), AiError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    let mut current_event: Option<String> = None;
    let mut current_data = String::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| AiError::NetworkError(e.to_string()))?
    {
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if line.is_empty() {
            // Empty line = end of event
            if !current_data.is_empty() {
                on_event(SseEvent {
                    event: current_event.take(),
                    data: std::mem::take(&mut current_data),
                });
            }
            current_event = None;
            continue;
        }

        if let Some(event_type) = line.strip_prefix("event:") {
            current_event = Some(event_type.trim_start().to_string());
        } else if let Some(data) = line.strip_prefix("data:") {
            if !current_data.is_empty() {
                current_data.push('\n');
            }
            current_data.push_str(data.strip_prefix(' ').unwrap_or(data));
        }
        // Ignore other fields (id:, retry:, comments)
    }

    // Flush any remaining event
    if !current_data.is_empty() {
        on_event(SseEvent {
            event: current_event,
            data: current_data,
        });
    }

    Ok(())
}
