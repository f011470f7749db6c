#![cfg(feature = "std")]

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::transport::LineTransport;

/// Longest line an honest peer can produce; anything longer is a protocol
/// breach and tears the connection down.
const MAX_LINE_BYTES: usize = 1024;

/// Newline-framed transport over one TCP stream.
pub struct TcpLineTransport {
    reader: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TcpLineTransport {
    pub fn new(stream: TcpStream) -> Self {
        let (read, write) = stream.into_split();
        Self {
            reader: BufReader::new(read).lines(),
            writer: write,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

#[async_trait::async_trait]
impl LineTransport for TcpLineTransport {
    async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        Ok(())
    }

    async fn recv_line(&mut self) -> anyhow::Result<Option<String>> {
        // next_line is cancellation safe, so a partial line survives losing
        // the race in the server's select loop.
        match self.reader.next_line().await? {
            Some(line) if line.len() > MAX_LINE_BYTES => Err(anyhow::anyhow!(
                "line too long: {} bytes (max {})",
                line.len(),
                MAX_LINE_BYTES
            )),
            other => Ok(other),
        }
    }
}
