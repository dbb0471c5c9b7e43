//! Chunked output between an encoder and whoever collects its bytes.
//!
//! Encoders write into a [`ChunkSink`]. During async generation the sink is
//! a [`ChannelSink`] feeding a bounded tokio channel; a dropped receiver
//! turns the next emit into an error, which is how a timed-out producer
//! stops.

use log::debug;
use tokio::sync::mpsc;

use crate::errors::{ReportError, ReportResult};
use crate::layout::RenderedDocument;

/// Default size of one emitted chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Chunks buffered between producer and consumer.
pub const CHANNEL_DEPTH: usize = 8;

/// Destination for encoded bytes.
pub trait ChunkSink {
    fn emit(&mut self, bytes: &[u8]) -> ReportResult<()>;
}

/// Turns a finished document into bytes.
pub trait DocumentEncoder: Send + Sync {
    fn encode(&self, document: &RenderedDocument, sink: &mut dyn ChunkSink) -> ReportResult<()>;
}

/// In-memory sink.
#[derive(Debug, Default)]
pub struct VecSink {
    buffer: Vec<u8>,
}

impl VecSink {
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

impl ChunkSink for VecSink {
    fn emit(&mut self, bytes: &[u8]) -> ReportResult<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }
}

/// Splits emitted bytes into chunks and sends them over a bounded channel.
///
/// Must be driven from a blocking context (`spawn_blocking`).
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<Vec<u8>>,
    chunk_size: usize,
    sent: usize,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Vec<u8>>, chunk_size: usize) -> Self {
        ChannelSink {
            tx,
            chunk_size: chunk_size.max(1),
            sent: 0,
        }
    }

    /// Bytes handed to the channel so far.
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl ChunkSink for ChannelSink {
    fn emit(&mut self, bytes: &[u8]) -> ReportResult<()> {
        for chunk in bytes.chunks(self.chunk_size) {
            self.tx
                .blocking_send(chunk.to_vec())
                .map_err(|_| ReportError::stream_failure("output receiver closed"))?;
            self.sent += chunk.len();
        }
        Ok(())
    }
}

/// A bounded chunk channel.
pub fn chunk_channel() -> (mpsc::Sender<Vec<u8>>, mpsc::Receiver<Vec<u8>>) {
    mpsc::channel(CHANNEL_DEPTH)
}

/// Accumulate chunks until every sender is gone.
pub async fn collect(rx: &mut mpsc::Receiver<Vec<u8>>) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut chunks = 0usize;
    while let Some(chunk) = rx.recv().await {
        buffer.extend_from_slice(&chunk);
        chunks += 1;
    }
    debug!("collected {} bytes in {} chunk(s)", buffer.len(), chunks);
    buffer
}

/// Encodes the layout itself as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutJsonEncoder;

impl DocumentEncoder for LayoutJsonEncoder {
    fn encode(&self, document: &RenderedDocument, sink: &mut dyn ChunkSink) -> ReportResult<()> {
        let json = serde_json::to_vec_pretty(document)?;
        sink.emit(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Canvas, PageSetup, TextStyle};

    #[tokio::test]
    async fn test_channel_sink_chunks_and_collects() {
        let (tx, mut rx) = chunk_channel();
        let producer = tokio::task::spawn_blocking(move || {
            let mut sink = ChannelSink::new(tx, 4);
            sink.emit(b"0123456789").map(|_| sink.sent())
        });
        let bytes = collect(&mut rx).await;
        assert_eq!(bytes, b"0123456789");
        assert_eq!(producer.await.unwrap(), Ok(10));
    }

    #[tokio::test]
    async fn test_emit_fails_after_receiver_dropped() {
        let (tx, rx) = chunk_channel();
        drop(rx);
        let result = tokio::task::spawn_blocking(move || ChannelSink::new(tx, 4).emit(b"abc"))
            .await
            .unwrap();
        assert!(matches!(result, Err(ReportError::StreamFailure { .. })));
    }

    #[test]
    fn test_layout_json_encoder() {
        let mut canvas = Canvas::new(PageSetup::letter());
        canvas.text_line("hello", TextStyle::body());
        let document = canvas.finish("t");

        let mut sink = VecSink::default();
        LayoutJsonEncoder.encode(&document, &mut sink).unwrap();
        let parsed: RenderedDocument = serde_json::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(parsed, document);
    }
}
