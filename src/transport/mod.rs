//! Line-oriented peer channels: one protocol command or response per line.

#[async_trait::async_trait]
pub trait LineTransport: Send + Sync {
    /// Write one protocol line to the peer.
    async fn send_line(&mut self, line: &str) -> anyhow::Result<()>;
    /// Read the next line, or `None` once the peer hangs up.
    async fn recv_line(&mut self) -> anyhow::Result<Option<String>>;
}

pub mod in_memory;
pub mod tcp;
