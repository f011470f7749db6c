#![cfg(feature = "std")]

use tokio::sync::mpsc;

use crate::transport::LineTransport;

/// Lines a peer may have in flight before its sends wait for the reader.
/// A full game transcript is tiny, so the cap only matters for a peer that
/// floods commands without reading replies.
const CHANNEL_DEPTH: usize = 64;

/// Paired in-process transport for tests and the local demo: each end owns
/// the send half of one bounded line channel and the receive half of the
/// other. Dropping an end closes its channels, which the peer observes as a
/// hangup.
pub struct InMemoryLineTransport {
    tx: mpsc::Sender<String>,
    rx: mpsc::Receiver<String>,
}

impl InMemoryLineTransport {
    pub fn pair() -> (Self, Self) {
        let (tx_a, rx_b) = mpsc::channel(CHANNEL_DEPTH);
        let (tx_b, rx_a) = mpsc::channel(CHANNEL_DEPTH);
        (
            Self { tx: tx_a, rx: rx_a },
            Self { tx: tx_b, rx: rx_b },
        )
    }
}

#[async_trait::async_trait]
impl LineTransport for InMemoryLineTransport {
    async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.tx
            .send(line.to_string())
            .await
            .map_err(|_| anyhow::anyhow!("peer hung up"))
    }

    async fn recv_line(&mut self) -> anyhow::Result<Option<String>> {
        // recv is cancellation safe, so no line is lost when this future
        // loses a select race.
        Ok(self.rx.recv().await)
    }
}
