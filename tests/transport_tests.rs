use tetroship::transport::in_memory::InMemoryLineTransport;
use tetroship::transport::tcp::TcpLineTransport;
use tetroship::transport::LineTransport;
use tetroship::{accept_pair, run_session, GameSession};
use tokio::net::TcpListener;

const FLEET_LINE: &str = "I 1 0 0 0 2 0 0 2 3 0 0 5 4 0 4 7 5 0 9 0";

async fn expect_line<T: LineTransport>(transport: &mut T, want: &str) {
    let got = transport.recv_line().await.unwrap();
    assert_eq!(got.as_deref(), Some(want));
}

#[tokio::test]
async fn in_memory_pair_delivers_in_order_and_hangs_up() {
    let (mut a, mut b) = InMemoryLineTransport::pair();
    a.send_line("B 10 10").await.unwrap();
    a.send_line("Q").await.unwrap();
    expect_line(&mut b, "B 10 10").await;
    expect_line(&mut b, "Q").await;
    drop(a);
    assert_eq!(b.recv_line().await.unwrap(), None);
}

#[tokio::test]
async fn full_session_over_in_memory_channels() {
    let (server1, mut p1) = InMemoryLineTransport::pair();
    let (server2, mut p2) = InMemoryLineTransport::pair();
    let server = tokio::spawn(async move {
        let mut session = GameSession::new();
        run_session(&mut session, server1, server2).await.unwrap();
    });

    p1.send_line("B 10 10").await.unwrap();
    expect_line(&mut p1, "A").await;
    p2.send_line("B").await.unwrap();
    expect_line(&mut p2, "A").await;
    p1.send_line(FLEET_LINE).await.unwrap();
    expect_line(&mut p1, "A").await;
    p2.send_line(FLEET_LINE).await.unwrap();
    expect_line(&mut p2, "A").await;

    p1.send_line("S 0 0").await.unwrap();
    expect_line(&mut p1, "R 5 H").await;
    p2.send_line("S 4 4").await.unwrap();
    expect_line(&mut p2, "R 5 M").await;
    p1.send_line("Q").await.unwrap();
    expect_line(&mut p1, "G 5 H 0 0").await;

    // replies cross to the right peer on game over
    p2.send_line("F").await.unwrap();
    expect_line(&mut p2, "H 0").await;
    expect_line(&mut p1, "H 1").await;
    server.await.unwrap();
}

#[tokio::test]
async fn tcp_session_smoke() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (p1, p2) = accept_pair(&listener).await.unwrap();
        let mut session = GameSession::new();
        run_session(&mut session, p1, p2).await.unwrap();
    });

    // first to connect becomes player 1, the dimension authority
    let mut c1 = TcpLineTransport::connect(addr).await.unwrap();
    let mut c2 = TcpLineTransport::connect(addr).await.unwrap();

    c1.send_line("B 12 15").await.unwrap();
    expect_line(&mut c1, "A").await;
    c2.send_line("B").await.unwrap();
    expect_line(&mut c2, "A").await;
    c2.send_line("B").await.unwrap();
    expect_line(&mut c2, "E 101").await;

    c2.send_line("F").await.unwrap();
    expect_line(&mut c2, "H 0").await;
    expect_line(&mut c1, "H 1").await;
    server.await.unwrap();
}
