// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Transports for outbound wire lines.

use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;

use crate::observability::messages::dispatch::WireLinesLagged;
use crate::observability::messages::StructuredLog;

/// Destination for encoded wire lines.
#[async_trait]
pub trait WireSink: Send {
    async fn send(&mut self, line: &str) -> io::Result<()>;

    async fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes each line followed by `\n` to an async writer.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W> WireSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        // One line per message; flush so readers see it immediately.
        self.writer.flush().await
    }

    async fn flush(&mut self) -> io::Result<()> {
        self.writer.flush().await
    }
}

/// Copy lines from `lines` into `sink` until cancelled or the channel closes.
///
/// Returns the number of lines written. A lagging receiver skips ahead.
pub async fn forward<S: WireSink>(
    mut lines: broadcast::Receiver<String>,
    sink: &mut S,
    token: CancellationToken,
) -> io::Result<u64> {
    let mut written = 0u64;
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            next = lines.recv() => match next {
                Ok(line) => {
                    sink.send(&line).await?;
                    written += 1;
                }
                Err(RecvError::Lagged(skipped)) => WireLinesLagged { skipped }.log(),
                Err(RecvError::Closed) => break,
            },
        }
    }
    // Anything already queued when cancelled still goes out.
    while let Ok(line) = lines.try_recv() {
        sink.send(&line).await?;
        written += 1;
    }
    sink.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OutboundChannel;

    #[tokio::test]
    async fn writer_sink_terminates_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.send("a,b").await.unwrap();
        sink.send("c").await.unwrap();
        assert_eq!(sink.into_inner(), b"a,b\nc\n".to_vec());
    }

    #[tokio::test]
    async fn forward_drains_queued_lines_on_cancel() {
        let channel = OutboundChannel::new();
        let receiver = channel.subscribe();
        channel.emit("first".to_string());
        channel.emit("second".to_string());

        let token = CancellationToken::new();
        token.cancel();
        let mut sink = WriterSink::new(Vec::new());
        let written = forward(receiver, &mut sink, token).await.unwrap();

        assert_eq!(written, 2);
        assert_eq!(sink.into_inner(), b"first\nsecond\n".to_vec());
    }

    #[tokio::test]
    async fn forward_stops_when_channel_closes() {
        let (sender, receiver) = broadcast::channel(8);
        sender.send("only".to_string()).unwrap();
        drop(sender);

        let mut sink = WriterSink::new(Vec::new());
        let written = forward(receiver, &mut sink, CancellationToken::new()).await.unwrap();
        assert_eq!(written, 1);
    }
}
