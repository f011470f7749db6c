#![cfg(feature = "std")]

//! Transport glue: accept exactly two peers and pump one session.
//!
//! The loop below is the only place both command streams meet. The session
//! is owned by this single task, so every command is decoded, validated,
//! applied and answered before the next one is looked at, from either peer.

use anyhow::Context;
use log::{info, warn};
use tokio::net::TcpListener;

use crate::protocol::PlayerId;
use crate::session::GameSession;
use crate::transport::tcp::TcpLineTransport;
use crate::transport::LineTransport;

/// Accept exactly two peers in order. The first connection becomes player 1
/// and with it the dimension authority.
pub async fn accept_pair(
    listener: &TcpListener,
) -> anyhow::Result<(TcpLineTransport, TcpLineTransport)> {
    let (s1, addr1) = listener.accept().await.context("accepting player 1")?;
    info!("player 1 connected from {}", addr1);
    let (s2, addr2) = listener.accept().await.context("accepting player 2")?;
    info!("player 2 connected from {}", addr2);
    Ok((TcpLineTransport::new(s1), TcpLineTransport::new(s2)))
}

/// Drive one session over two line channels until the game ends or a peer
/// goes away. A vanished peer simply tears the session down; every in-game
/// failure is already answered by the session itself.
pub async fn run_session<A, B>(session: &mut GameSession, mut p1: A, mut p2: B) -> anyhow::Result<()>
where
    A: LineTransport,
    B: LineTransport,
{
    while !session.is_terminal() {
        let (from, line) = tokio::select! {
            line = p1.recv_line() => (PlayerId::P1, line?),
            line = p2.recv_line() => (PlayerId::P2, line?),
        };
        let line = match line {
            Some(line) => line,
            None => {
                warn!("{} disconnected; ending session", from);
                break;
            }
        };
        for (to, reply) in session.handle_line(from, &line) {
            match to {
                PlayerId::P1 => p1.send_line(&reply).await?,
                PlayerId::P2 => p2.send_line(&reply).await?,
            }
        }
    }
    Ok(())
}

/// Bind, accept two peers and referee a single game to completion.
pub async fn serve(bind: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {}", bind))?;
    info!("listening on {}", bind);

    let (p1, p2) = accept_pair(&listener).await?;
    let mut session = GameSession::new();
    run_session(&mut session, p1, p2).await?;
    info!("session over");
    Ok(())
}
