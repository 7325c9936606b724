//! End-to-end tests: real TCP clients against a running server

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use backend::server::MAX_LINE_BYTES;
use backend::{serve, SessionRegistry};
use shared::protocol::{decode_line, encode_line, ClientMessage, Outcome, ServerMessage, Side};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

struct TestClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, writer) = stream.into_split();
        TestClient {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    /// Connect and say hello, asserting the name was accepted
    async fn join(addr: SocketAddr, name: &str) -> Self {
        let mut client = Self::connect(addr).await;
        client.hello(name).await;
        assert_eq!(client.recv().await, ServerMessage::Welcome { ok: true });
        client
    }

    async fn send(&mut self, message: &ClientMessage) {
        let line = encode_line(message).unwrap();
        self.writer.write_all(line.as_bytes()).await.unwrap();
    }

    async fn send_raw(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).await.unwrap();
    }

    async fn hello(&mut self, name: &str) {
        self.send(&ClientMessage::Hello {
            name: name.to_string(),
        })
        .await;
    }

    async fn play(&mut self, uci: &str) {
        self.send(&ClientMessage::Move {
            uci: uci.to_string(),
        })
        .await;
    }

    async fn recv(&mut self) -> ServerMessage {
        let line = timeout(WAIT, self.lines.next_line())
            .await
            .expect("timed out waiting for server")
            .unwrap()
            .expect("connection closed");
        decode_line(&line).unwrap()
    }

    /// Expect the server to close the connection
    async fn expect_eof(&mut self) {
        let line = timeout(WAIT, self.lines.next_line())
            .await
            .expect("timed out waiting for close")
            .unwrap();
        assert_eq!(line, None);
    }
}

async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, Arc::new(SessionRegistry::new())));
    addr
}

/// Pair two players and consume the greeting messages
async fn start_game(addr: SocketAddr) -> (TestClient, TestClient) {
    let mut white = TestClient::join(addr, "alice").await;
    assert_eq!(white.recv().await, ServerMessage::Queued { pos: 1 });

    let mut black = TestClient::join(addr, "bob").await;

    assert_eq!(
        white.recv().await,
        ServerMessage::Start {
            color: Side::White,
            opponent: "bob".to_string()
        }
    );
    assert_eq!(
        black.recv().await,
        ServerMessage::Start {
            color: Side::Black,
            opponent: "alice".to_string()
        }
    );
    for client in [&mut white, &mut black] {
        assert!(matches!(
            client.recv().await,
            ServerMessage::State {
                turn: Side::White,
                check: false,
                ..
            }
        ));
    }
    (white, black)
}

/// Play one accepted move and check both seats see it
async fn exchange(mover: &mut TestClient, other: &mut TestClient, uci: &str, by: Side) {
    mover.play(uci).await;
    let expected = ServerMessage::MoveOk {
        uci: uci.to_string(),
        by,
    };
    assert_eq!(mover.recv().await, expected);
    assert_eq!(other.recv().await, expected);
}

#[tokio::test]
async fn test_fools_mate_over_tcp() {
    let addr = start_server().await;
    let (mut white, mut black) = start_game(addr).await;

    // Illegal pawn leap: only the submitter hears about it
    white.play("e2e5").await;
    assert_eq!(
        white.recv().await,
        ServerMessage::Illegal {
            reason: "illegal_pattern".to_string()
        }
    );

    exchange(&mut white, &mut black, "f2f3", Side::White).await;
    // The next thing black sees is the state after f2f3, not the rejection
    assert!(matches!(white.recv().await, ServerMessage::State { turn: Side::Black, .. }));
    assert!(matches!(black.recv().await, ServerMessage::State { turn: Side::Black, .. }));

    exchange(&mut black, &mut white, "e7e5", Side::Black).await;
    white.recv().await;
    black.recv().await;

    exchange(&mut white, &mut black, "g2g4", Side::White).await;
    white.recv().await;
    black.recv().await;

    exchange(&mut black, &mut white, "d8h4", Side::Black).await;
    let result = ServerMessage::Result {
        outcome: Outcome::Checkmate,
        winner: Some(Side::Black),
    };
    assert_eq!(white.recv().await, result);
    assert_eq!(black.recv().await, result);

    white.expect_eof().await;
    black.expect_eof().await;
}

#[tokio::test]
async fn test_out_of_turn_move_rejected() {
    let addr = start_server().await;
    let (mut white, mut black) = start_game(addr).await;

    black.play("e7e5").await;
    assert_eq!(
        black.recv().await,
        ServerMessage::Illegal {
            reason: "not_your_turn".to_string()
        }
    );

    exchange(&mut white, &mut black, "e2e4", Side::White).await;
}

#[tokio::test]
async fn test_duplicate_name_refused() {
    let addr = start_server().await;
    let _alice = TestClient::join(addr, "alice").await;

    let mut impostor = TestClient::connect(addr).await;
    impostor.hello("ALICE").await;
    assert_eq!(impostor.recv().await, ServerMessage::Welcome { ok: false });
    impostor.expect_eof().await;
}

#[tokio::test]
async fn test_first_message_must_be_hello() {
    let addr = start_server().await;
    let mut client = TestClient::connect(addr).await;

    client.play("e2e4").await;
    assert!(matches!(client.recv().await, ServerMessage::Error { .. }));
    client.expect_eof().await;
}

#[tokio::test]
async fn test_resign_notifies_opponent() {
    let addr = start_server().await;
    let (mut white, mut black) = start_game(addr).await;

    white.send(&ClientMessage::Resign).await;
    assert_eq!(black.recv().await, ServerMessage::OpponentLeft);

    white.expect_eof().await;
    black.expect_eof().await;
}

#[tokio::test]
async fn test_disconnect_notifies_opponent() {
    let addr = start_server().await;
    let (white, mut black) = start_game(addr).await;

    drop(white);
    assert_eq!(black.recv().await, ServerMessage::OpponentLeft);
    black.expect_eof().await;
}

#[tokio::test]
async fn test_chat_and_bad_lines() {
    let addr = start_server().await;
    let (mut white, mut black) = start_game(addr).await;

    black.send_raw(b"this is not json\n").await;
    assert!(matches!(black.recv().await, ServerMessage::Error { .. }));

    black
        .send(&ClientMessage::Chat {
            text: "have fun".to_string(),
        })
        .await;
    assert_eq!(
        white.recv().await,
        ServerMessage::Chat {
            from: "bob".to_string(),
            text: "have fun".to_string()
        }
    );

    // The session is still live after both
    exchange(&mut white, &mut black, "d2d4", Side::White).await;
}

#[tokio::test]
async fn test_invalid_utf8_line_keeps_connection() {
    let addr = start_server().await;
    let (mut white, mut black) = start_game(addr).await;

    black.send_raw(b"\xff\xfe\n").await;
    assert!(matches!(black.recv().await, ServerMessage::Error { .. }));

    exchange(&mut white, &mut black, "e2e4", Side::White).await;
}

#[tokio::test]
async fn test_invalid_utf8_while_queued_keeps_place() {
    let addr = start_server().await;
    let mut white = TestClient::join(addr, "alice").await;
    assert_eq!(white.recv().await, ServerMessage::Queued { pos: 1 });

    white.send_raw(b"\xff\xfe\n").await;
    assert!(matches!(white.recv().await, ServerMessage::Error { .. }));

    let _black = TestClient::join(addr, "bob").await;
    assert!(matches!(
        white.recv().await,
        ServerMessage::Start {
            color: Side::White,
            ..
        }
    ));
}

#[tokio::test]
async fn test_overlong_line_ends_connection() {
    let addr = start_server().await;
    let (mut white, mut black) = start_game(addr).await;

    // The server may hang up before the whole write lands
    let flood = vec![b'x'; MAX_LINE_BYTES * 2];
    let _ = black.writer.write_all(&flood).await;

    assert_eq!(white.recv().await, ServerMessage::OpponentLeft);
    white.expect_eof().await;
}

#[tokio::test]
async fn test_name_reusable_after_leaving_queue() {
    let addr = start_server().await;
    let mut first = TestClient::join(addr, "carol").await;
    assert_eq!(first.recv().await, ServerMessage::Queued { pos: 1 });
    drop(first);

    // The server notices the closed socket asynchronously
    let mut accepted = false;
    for _ in 0..50 {
        let mut retry = TestClient::connect(addr).await;
        retry.hello("carol").await;
        if retry.recv().await == (ServerMessage::Welcome { ok: true }) {
            accepted = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(accepted, "name was never released");
}
