// WebSocket session handler

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::sync::Arc;
use uuid::Uuid;
use warp::ws::{Message, WebSocket};

use crate::models::{AnalysisRequest, AnalysisResponse};
use crate::pipeline::{AnalysisPipeline, MessageParseError};

/// Entry point for an upgraded connection
pub async fn run_session(socket: WebSocket, pipeline: Arc<AnalysisPipeline>) {
    let (outbound, inbound) = socket.split();
    Session::new(pipeline).serve(inbound, outbound).await;
}

/// State for one live connection: an id for the logs and the shared pipeline
pub struct Session {
    id: Uuid,
    pipeline: Arc<AnalysisPipeline>,
}

impl Session {
    pub fn new(pipeline: Arc<AnalysisPipeline>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pipeline,
        }
    }

    /// Read frames until the client goes away, answering each in turn
    ///
    /// The next frame is read only after the current reply is sent, so
    /// replies leave in request order. Frames that arrive meanwhile wait in
    /// the transport buffer.
    pub async fn serve<R, W, E>(self, mut inbound: R, mut outbound: W)
    where
        R: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
        W: Sink<Message> + Unpin,
        W::Error: Display,
    {
        tracing::info!(session = %self.id, "client connected");

        while let Some(frame) = inbound.next().await {
            let message = match frame {
                Ok(message) => message,
                Err(e) => {
                    tracing::warn!(session = %self.id, error = %e, "websocket receive failed");
                    break;
                }
            };

            if message.is_close() {
                break;
            }
            if !message.is_text() && !message.is_binary() {
                continue;
            }

            let Some(reply) = self.handle(parse_request(message.as_bytes())).await else {
                continue;
            };

            let payload = match serde_json::to_string(&reply) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!(session = %self.id, error = %e, "failed to encode reply");
                    continue;
                }
            };

            if let Err(e) = outbound.send(Message::text(payload)).await {
                tracing::debug!(session = %self.id, error = %e, "client gone before reply was sent");
                break;
            }
        }

        tracing::info!(session = %self.id, "client disconnected");
    }

    /// Answer one text payload; `None` means nothing is sent back
    pub async fn handle_text(&self, text: &str) -> Option<AnalysisResponse> {
        self.handle(parse_request(text.as_bytes())).await
    }

    async fn handle(
        &self,
        request: Result<AnalysisRequest, MessageParseError>,
    ) -> Option<AnalysisResponse> {
        let result = match request {
            Ok(request) => self.pipeline.run(&request).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(Some(answer)) => Some(AnalysisResponse::answer(answer)),
            Ok(None) => {
                tracing::debug!(session = %self.id, "no spreadsheet id, not replying");
                None
            }
            Err(e) => {
                tracing::error!(session = %self.id, code = e.code(), error = %e, "request failed");
                Some(AnalysisResponse::failure(e.code(), &e))
            }
        }
    }
}

fn parse_request(bytes: &[u8]) -> Result<AnalysisRequest, MessageParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| MessageParseError::InvalidEncoding)?;
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CompletionError, CompletionProvider, CompletionRequest, GenerationConfig};
    use crate::models::ERROR_PREFIX;
    use crate::prompt::PromptComposer;
    use crate::sheets::{SheetTable, SpreadsheetAccessError, SpreadsheetDocument, SpreadsheetSource};
    use async_trait::async_trait;
    use futures::channel::mpsc;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct OneSheet;

    #[async_trait]
    impl SpreadsheetSource for OneSheet {
        async fn fetch(&self, id: &str) -> Result<SpreadsheetDocument, SpreadsheetAccessError> {
            Ok(SpreadsheetDocument::new(
                id,
                vec![SheetTable::from_values("Sheet1", 2, 2, vec![vec!["Q".into(), "1".into()]])],
            ))
        }
    }

    /// Fails the first call, succeeds afterwards
    #[derive(Default)]
    struct FlakyProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionProvider for FlakyProvider {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
            match self.calls.fetch_add(1, Ordering::SeqCst) {
                0 => Err(CompletionError::Provider {
                    code: "insufficient_quota".to_string(),
                    message: "You exceeded your current quota".to_string(),
                }),
                n => Ok(format!("answer {}", n)),
            }
        }
    }

    fn session() -> Session {
        let pipeline = AnalysisPipeline::new(
            Arc::new(OneSheet),
            Arc::new(FlakyProvider::default()),
            PromptComposer::general(),
            GenerationConfig::default(),
        );
        Session::new(Arc::new(pipeline))
    }

    async fn exchange(frames: Vec<Message>) -> Vec<AnalysisResponse> {
        let inbound = futures::stream::iter(frames.into_iter().map(Ok::<_, Infallible>));
        let (outbound, received) = mpsc::unbounded();

        session().serve(inbound, outbound).await;

        received
            .map(|message: Message| {
                serde_json::from_slice::<AnalysisResponse>(message.as_bytes()).unwrap()
            })
            .collect::<Vec<_>>()
            .await
    }

    #[tokio::test]
    async fn test_malformed_json_gets_one_error_reply() {
        let reply = session().handle_text("{not json").await.unwrap();
        assert!(reply.content.starts_with(ERROR_PREFIX));
        assert_eq!(reply.error.as_deref(), Some("message_parse"));
    }

    #[tokio::test]
    async fn test_missing_id_gets_no_reply() {
        assert!(session().handle_text(r#"{"content":"Hi"}"#).await.is_none());
    }

    #[tokio::test]
    async fn test_error_then_recovery_in_order() {
        let replies = exchange(vec![
            Message::text(r#"{"spreadsheetId":"X","content":"first"}"#),
            Message::text(r#"{"content":"skipped"}"#),
            Message::text("garbage"),
            Message::text(r#"{"spreadsheetId":"X","content":"second"}"#),
        ])
        .await;

        assert_eq!(replies.len(), 3);
        assert!(replies[0].content.starts_with(ERROR_PREFIX));
        assert!(replies[0].content.contains("You exceeded your current quota"));
        assert_eq!(replies[0].error.as_deref(), Some("completion"));
        assert_eq!(replies[1].error.as_deref(), Some("message_parse"));
        assert_eq!(replies[2], AnalysisResponse::answer("answer 1"));
    }

    #[tokio::test]
    async fn test_binary_frames_are_parsed() {
        let replies = exchange(vec![
            Message::binary(vec![0xff, 0xfe]),
            Message::binary(br#"{"spreadsheetId":"X","content":"q"}"#.to_vec()),
        ])
        .await;

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].error.as_deref(), Some("message_parse"));
        assert!(replies[0].content.ends_with("Message is not valid UTF-8"));
        // the provider fails its first call
        assert_eq!(replies[1].error.as_deref(), Some("completion"));
    }

    #[tokio::test]
    async fn test_close_ends_session() {
        let replies = exchange(vec![
            Message::close(),
            Message::text(r#"{"spreadsheetId":"X","content":"late"}"#),
        ])
        .await;

        assert!(replies.is_empty());
    }
}
