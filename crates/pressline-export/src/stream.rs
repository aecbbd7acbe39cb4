//! Chunked PDF output.
//!
//! Rendering runs on a blocking worker and reports back over a bounded
//! channel: zero or more [`RenderEvent::Data`] chunks, then exactly one of
//! [`RenderEvent::End`] or [`RenderEvent::Error`].

use std::io::{self, BufWriter, Write};

use jiff::Zoned;
use pressline_core::models::document::DocumentSpec;
use tokio::sync::mpsc;

use crate::error::ExportError;
use crate::pdf::compose;
use crate::page::PdfSummary;
use crate::styles::DocumentStyles;

/// Chunks in flight before the worker waits for the consumer.
const CHANNEL_DEPTH: usize = 16;

/// Smallest chunk the worker will emit, except for the final one.
pub const MIN_CHUNK_SIZE: usize = 512;

#[derive(Debug)]
pub enum RenderEvent {
    Data(Vec<u8>),
    End,
    Error(ExportError),
}

/// A finished document assembled from the stream.
#[derive(Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub chunks: usize,
}

/// Receiving side of a render.
pub struct RenderStream {
    rx: mpsc::Receiver<RenderEvent>,
}

impl RenderStream {
    pub fn from_receiver(rx: mpsc::Receiver<RenderEvent>) -> Self {
        Self { rx }
    }

    /// Next event, or `None` once the worker is gone.
    pub async fn next_event(&mut self) -> Option<RenderEvent> {
        self.rx.recv().await
    }

    /// Concatenate every data chunk in arrival order until the terminal event.
    pub async fn collect(mut self) -> Result<RenderedPdf, ExportError> {
        let mut bytes = Vec::new();
        let mut chunks = 0;

        loop {
            match self.next_event().await {
                Some(RenderEvent::Data(chunk)) => {
                    bytes.extend_from_slice(&chunk);
                    chunks += 1;
                }
                Some(RenderEvent::End) => return Ok(RenderedPdf { bytes, chunks }),
                Some(RenderEvent::Error(e)) => return Err(e),
                None => return Err(ExportError::Interrupted),
            }
        }
    }
}

/// Render `spec` on a blocking worker and stream the output back.
///
/// Must be called from within a Tokio runtime. The worker always runs to
/// completion; dropping the returned stream only makes its sends fail.
pub fn render_stream(
    spec: DocumentSpec,
    styles: DocumentStyles,
    generated_at: Zoned,
    chunk_size: usize,
) -> RenderStream {
    let (tx, rx) = mpsc::channel(CHANNEL_DEPTH);
    let chunk_size = chunk_size.max(MIN_CHUNK_SIZE);

    tokio::task::spawn_blocking(move || {
        let terminal = match write_chunks(&spec, &styles, &generated_at, chunk_size, &tx) {
            Ok(summary) => {
                tracing::debug!(pages = summary.pages, "render finished");
                RenderEvent::End
            }
            Err(e) => RenderEvent::Error(e),
        };

        if tx.blocking_send(terminal).is_err() {
            tracing::debug!("render stream dropped before the terminal event");
        }
    });

    RenderStream::from_receiver(rx)
}

fn write_chunks(
    spec: &DocumentSpec,
    styles: &DocumentStyles,
    generated_at: &Zoned,
    chunk_size: usize,
    tx: &mpsc::Sender<RenderEvent>,
) -> Result<PdfSummary, ExportError> {
    let page = compose(spec, styles, generated_at)?;
    let mut out = BufWriter::with_capacity(chunk_size, ChunkWriter { tx });
    let summary = page.finish(&mut out)?;
    out.flush()?;
    Ok(summary)
}

/// Forwards every write as one [`RenderEvent::Data`] chunk.
struct ChunkWriter<'a> {
    tx: &'a mpsc::Sender<RenderEvent>,
}

impl Write for ChunkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.tx
            .blocking_send(RenderEvent::Data(buf.to_vec()))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "render stream dropped"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
