//! Input loop
//!
//! Reads newline-delimited chunks, hands each one to the [`Bridge`], and
//! writes one JSON line per chunk. Blank lines are skipped. Input is decoded
//! as UTF-8 with invalid sequences replaced.
//!
//! Ordering depends on [`DispatchMode`]:
//! - `Sequential`: chunk N is fully answered before chunk N+1 is read.
//! - `Concurrent`: each chunk runs on its own task and answers are written as
//!   they complete, so output order may differ from input order. A single
//!   writer task owns the output, so lines never interleave.
//!
//! On end of input, in-flight requests are finished and the output flushed
//! before [`Dispatcher::run`] returns.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinError;

use crate::config::DispatchMode;
use crate::error::{BridgeError, Result};
use crate::handler::Bridge;
use crate::protocol::BridgeOutput;

/// Drives a [`Bridge`] from a line-oriented reader to a writer
#[derive(Clone)]
pub struct Dispatcher {
    bridge: Bridge,
    mode: DispatchMode,
}

impl Dispatcher {
    /// Create a dispatcher using the bridge's configured mode
    pub fn new(bridge: Bridge) -> Self {
        let mode = bridge.config().dispatch;
        Self { bridge, mode }
    }

    /// Override the dispatch mode
    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Active dispatch mode
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Process `input` until end of stream.
    ///
    /// # Errors
    ///
    /// Only I/O failures on `input` or `output` end the loop; per-request
    /// failures are written as error lines.
    pub async fn run<R, W>(&self, input: R, output: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        tracing::debug!(mode = %self.mode, "dispatcher started");
        let result = match self.mode {
            DispatchMode::Sequential => self.run_sequential(input, output).await,
            DispatchMode::Concurrent => self.run_concurrent(input, output).await,
        };
        tracing::debug!("end of input, dispatcher stopped");
        result
    }

    async fn run_sequential<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = ChunkReader::new(input);
        while let Some(chunk) = lines.next_chunk().await? {
            let reply = self.bridge.handle_chunk(&chunk).await;
            write_line(&mut output, &reply).await?;
        }
        Ok(())
    }

    async fn run_concurrent<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<BridgeOutput>();

        let mut writer = tokio::spawn(async move {
            while let Some(reply) = rx.recv().await {
                write_line(&mut output, &reply).await?;
            }
            Ok::<_, BridgeError>(())
        });

        let mut lines = ChunkReader::new(input);
        let read_result = loop {
            tokio::select! {
                // The writer holds the receiver open while we hold `tx`, so it
                // only finishes here when the output has failed
                joined = &mut writer => {
                    tracing::debug!("output closed, abandoning input");
                    return join_writer(joined);
                }
                chunk = lines.next_chunk() => match chunk {
                    Ok(Some(chunk)) => {
                        let bridge = self.bridge.clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let reply = bridge.handle_chunk(&chunk).await;
                            // Receiver only goes away if the writer already failed
                            let _ = tx.send(reply);
                        });
                    }
                    Ok(None) => break Ok(()),
                    Err(err) => break Err(err),
                },
            }
        };

        // Writer drains until every spawned task has dropped its sender
        drop(tx);
        let write_result = join_writer(writer.await);

        read_result.and(write_result)
    }
}

fn join_writer(joined: std::result::Result<Result<()>, JoinError>) -> Result<()> {
    joined.map_err(|e| BridgeError::Io(io::Error::other(e)))?
}

/// Newline-delimited reader yielding non-blank chunks
struct ChunkReader<R> {
    reader: BufReader<R>,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> ChunkReader<R> {
    fn new(input: R) -> Self {
        Self {
            reader: BufReader::new(input),
            buf: Vec::new(),
        }
    }

    async fn next_chunk(&mut self) -> Result<Option<String>> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
                return Ok(None);
            }
            let chunk = String::from_utf8_lossy(&self.buf);
            if !chunk.trim().is_empty() {
                return Ok(Some(chunk.into_owned()));
            }
        }
    }
}

async fn write_line<W>(output: &mut W, reply: &BridgeOutput) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(reply)?;
    line.push(b'\n');
    output.write_all(&line).await?;
    output.flush().await?;
    Ok(())
}
