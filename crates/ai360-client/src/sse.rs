//! Server-sent event decoding for streamed chat replies.
//!
//! Gemini's `streamGenerateContent?alt=sse` answers with `data: {json}`
//! events separated by blank lines. [`SseDecoder`] turns arbitrary byte
//! chunks into complete `data` payloads; [`fragment_stream`] maps those to
//! text fragments.

use std::collections::VecDeque;

use futures_util::{Stream, StreamExt};

use crate::FragmentStream;
use crate::error::ClientError;
use crate::gemini::GenerateContentResponse;

/// Incremental SSE parser. Only `data` fields are kept; multi-line data is
/// joined with `\n` as the SSE format requires.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
}

impl SseDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every event completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(event) = self.accept_line(line) {
                events.push(event);
            }
        }
        events
    }

    /// Flush a trailing event that was not followed by a blank line.
    pub fn finish(&mut self) -> Vec<String> {
        let rest = std::mem::take(&mut self.buffer);
        let mut events = Vec::new();
        if !rest.is_empty() {
            let line = String::from_utf8_lossy(&rest);
            if let Some(event) = self.accept_line(line.trim_end_matches('\r')) {
                events.push(event);
            }
        }
        if let Some(event) = self.dispatch() {
            events.push(event);
        }
        events
    }

    fn accept_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = line.split_once(':').unwrap_or((line, ""));
        if field == "data" {
            self.data
                .push(value.strip_prefix(' ').unwrap_or(value).to_string());
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.data).join("\n"))
    }
}

/// Text carried by one streamed chunk, or `None` for chunks without text
/// (safety ratings, usage metadata).
fn chunk_text(payload: &str) -> Result<Option<String>, ClientError> {
    let chunk: GenerateContentResponse =
        serde_json::from_str(payload).map_err(|e| ClientError::Parse(e.to_string()))?;
    chunk.check()?;
    let text = chunk.text();
    Ok((!text.is_empty()).then_some(text))
}

struct State<B> {
    body: B,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    done: bool,
}

/// Turn a streamed HTTP body into text fragments.
///
/// The stream ends after the first error.
pub fn fragment_stream<B, T, E>(body: B) -> FragmentStream
where
    B: Stream<Item = Result<T, E>> + Send + 'static,
    T: AsRef<[u8]> + Send + 'static,
    E: Into<ClientError> + Send + 'static,
{
    let state = State {
        body: Box::pin(body),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        done: false,
    };

    Box::pin(futures_util::stream::unfold(state, |mut st| async move {
        loop {
            if let Some(payload) = st.pending.pop_front() {
                match chunk_text(&payload) {
                    Ok(Some(text)) => return Some((Ok(text), st)),
                    Ok(None) => continue,
                    Err(e) => {
                        st.pending.clear();
                        st.done = true;
                        return Some((Err(e), st));
                    }
                }
            }
            if st.done {
                return None;
            }
            match st.body.next().await {
                Some(Ok(bytes)) => {
                    let events = st.decoder.push(bytes.as_ref());
                    st.pending.extend(events);
                }
                Some(Err(e)) => {
                    st.done = true;
                    return Some((Err(e.into()), st));
                }
                None => {
                    st.done = true;
                    let events = st.decoder.finish();
                    st.pending.extend(events);
                }
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::TryStreamExt;
    use pretty_assertions::assert_eq;

    fn chunk(text: &str) -> String {
        format!(
            "data: {{\"candidates\": [{{\"content\": {{\"role\": \"model\", \"parts\": [{{\"text\": {}}}]}}}}]}}\r\n\r\n",
            serde_json::to_string(text).unwrap()
        )
    }

    #[test]
    fn events_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: {\"a\"").is_empty());
        assert!(decoder.push(b": 1}\n").is_empty());
        assert_eq!(decoder.push(b"\n"), vec![r#"{"a": 1}"#.to_string()]);
    }

    #[test]
    fn multi_line_data_and_comments() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b": keep-alive\nevent: message\ndata: one\ndata: two\n\n");
        assert_eq!(events, vec!["one\ntwo".to_string()]);
    }

    #[test]
    fn trailing_event_is_flushed() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: last").is_empty());
        assert_eq!(decoder.finish(), vec!["last".to_string()]);
        assert!(decoder.finish().is_empty());
    }

    #[tokio::test]
    async fn fragments_arrive_in_order() {
        let body = format!("{}{}", chunk("**Hydration**"), chunk(" matters."));
        let (a, b) = body.split_at(17);
        let parts: Vec<Result<Vec<u8>, ClientError>> =
            vec![Ok(a.as_bytes().to_vec()), Ok(b.as_bytes().to_vec())];

        let fragments: Vec<String> = fragment_stream(futures_util::stream::iter(parts))
            .try_collect()
            .await
            .unwrap();
        assert_eq!(fragments, vec!["**Hydration**", " matters."]);
    }

    #[tokio::test]
    async fn chunks_without_text_are_skipped() {
        let body = format!(
            "data: {{\"usageMetadata\": {{\"totalTokenCount\": 3}}}}\n\n{}",
            chunk("hi")
        );
        let parts: Vec<Result<Vec<u8>, ClientError>> = vec![Ok(body.into_bytes())];
        let fragments: Vec<String> = fragment_stream(futures_util::stream::iter(parts))
            .try_collect()
            .await
            .unwrap();
        assert_eq!(fragments, vec!["hi"]);
    }

    #[tokio::test]
    async fn error_chunk_ends_the_stream() {
        let body = format!(
            "{}data: {{\"error\": {{\"code\": 503, \"message\": \"overloaded\"}}}}\n\n{}",
            chunk("partial"),
            chunk("never")
        );
        let parts: Vec<Result<Vec<u8>, ClientError>> = vec![Ok(body.into_bytes())];
        let mut stream = fragment_stream(futures_util::stream::iter(parts));

        assert_eq!(stream.next().await.unwrap().unwrap(), "partial");
        let err = stream.next().await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "overloaded");
        assert!(stream.next().await.is_none());
    }
}
