//! TCP transport
//!
//! One task per connection. Each connection reads newline-delimited JSON
//! [`ClientMessage`]s and has a companion writer task draining its outbound
//! queue, so sessions never wait on a slow socket.

use std::net::SocketAddr;
use std::sync::Arc;

use shared::protocol::{decode_slice, encode_line, ClientMessage, ServerMessage};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{ServerError, ServerResult};
use crate::registry::{Enqueued, SeatBinding, SessionRegistry};
use crate::session::{SeatSink, SessionState};

/// Longest inbound line accepted, newline included
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// Newline-delimited reader over raw bytes with a length cap
///
/// Lines are returned undecoded so that invalid UTF-8 surfaces as a message
/// decode error rather than a read failure. `next_line` is cancel safe: a
/// partial line stays buffered until the rest arrives.
struct LineReader {
    inner: BufReader<OwnedReadHalf>,
    pending: Vec<u8>,
}

impl LineReader {
    fn new(read_half: OwnedReadHalf) -> Self {
        LineReader {
            inner: BufReader::new(read_half),
            pending: Vec::new(),
        }
    }

    /// Next line including its newline, `None` at end of stream
    async fn next_line(&mut self) -> ServerResult<Option<Vec<u8>>> {
        loop {
            let available = self.inner.fill_buf().await?;
            if available.is_empty() {
                return Ok(None);
            }

            let (take, complete) = match available.iter().position(|&b| b == b'\n') {
                Some(end) => (end + 1, true),
                None => (available.len(), false),
            };
            self.pending.extend_from_slice(&available[..take]);
            self.inner.consume(take);

            if self.pending.len() > MAX_LINE_BYTES {
                return Err(ServerError::LineTooLong {
                    limit: MAX_LINE_BYTES,
                });
            }
            if complete {
                return Ok(Some(std::mem::take(&mut self.pending)));
            }
        }
    }
}

/// Accept connections until the listener fails permanently
///
/// Accept errors are logged and skipped; each connection's own errors end
/// only that connection.
pub async fn serve(listener: TcpListener, registry: Arc<SessionRegistry>) -> ServerResult<()> {
    info!(addr = %listener.local_addr()?, "chess server listening");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(error = %err, "failed to accept connection");
                continue;
            }
        };

        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            debug!(%peer, "connection opened");
            match handle_connection(stream, peer, registry).await {
                Ok(()) => debug!(%peer, "connection closed"),
                Err(err) => info!(%peer, error = %err, "connection ended"),
            }
        });
    }
}

/// Drive one client from handshake to the end of its game
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    registry: Arc<SessionRegistry>,
) -> ServerResult<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = LineReader::new(read_half);

    let name = handshake(&mut lines, &mut write_half).await?;
    if let Err(err) = registry.register(&name) {
        write_message(&mut write_half, &ServerMessage::Welcome { ok: false }).await?;
        return Err(err);
    }
    info!(%peer, name = %name, "player connected");

    let (tx, rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_loop(write_half, rx));

    let result = play(&name, &mut lines, tx, &registry).await;
    registry.release(&name);

    // The writer stops once every sender for this seat is gone
    match writer.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => debug!(name = %name, error = %err, "writer stopped"),
        Err(err) => warn!(name = %name, error = %err, "writer task failed"),
    }
    info!(%peer, name = %name, "player disconnected");
    result
}

async fn handshake(lines: &mut LineReader, writer: &mut OwnedWriteHalf) -> ServerResult<String> {
    let line = lines
        .next_line()
        .await?
        .ok_or(ServerError::ConnectionClosed)?;

    match decode_slice::<ClientMessage>(&line) {
        Ok(ClientMessage::Hello { name }) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        _ => {
            write_message(
                writer,
                &ServerMessage::Error {
                    message: "expected hello".to_string(),
                },
            )
            .await?;
            Err(ServerError::HandshakeExpected {
                received: String::from_utf8_lossy(&line).trim_end().to_string(),
            })
        }
    }
}

async fn play(
    name: &str,
    lines: &mut LineReader,
    tx: SeatSink,
    registry: &SessionRegistry,
) -> ServerResult<()> {
    send(&tx, ServerMessage::Welcome { ok: true });

    let binding = match registry.enqueue(name, tx.clone()) {
        Enqueued::Paired(binding) => binding,
        Enqueued::Waiting { ticket, .. } => match wait_for_opponent(name, lines, &tx, registry, ticket).await? {
            Some(binding) => binding,
            None => return Ok(()),
        },
    };

    let id = binding.session.id();
    let result = run_seat(name, lines, &tx, &binding).await;
    registry.finish(id);
    result
}

/// Wait in the queue; `None` if the player left before being paired
async fn wait_for_opponent(
    name: &str,
    lines: &mut LineReader,
    tx: &SeatSink,
    registry: &SessionRegistry,
    mut ticket: tokio::sync::oneshot::Receiver<SeatBinding>,
) -> ServerResult<Option<SeatBinding>> {
    loop {
        tokio::select! {
            paired = &mut ticket => return Ok(paired.ok()),
            line = lines.next_line() => {
                let leaving = match line {
                    Ok(Some(line)) => matches!(decode_slice::<ClientMessage>(&line), Ok(ClientMessage::Resign)),
                    Ok(None) => true,
                    Err(err) => {
                        debug!(name, error = %err, "read failed while queued");
                        true
                    }
                };
                if !leaving {
                    send(tx, ServerMessage::Error {
                        message: "waiting for an opponent".to_string(),
                    });
                    continue;
                }
                if registry.leave_queue(name) {
                    return Ok(None);
                }
                // Paired between the read and the dequeue
                if let Ok(binding) = ticket.await {
                    binding.session.disconnect(binding.seat);
                    registry.finish(binding.session.id());
                }
                return Ok(None);
            }
        }
    }
}

/// Forward the seat's messages until the game ends or the peer goes away
async fn run_seat(
    name: &str,
    lines: &mut LineReader,
    tx: &SeatSink,
    binding: &SeatBinding,
) -> ServerResult<()> {
    let mut status = binding.session.subscribe();
    if *status.borrow_and_update() == SessionState::Finished {
        return Ok(());
    }

    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() || *status.borrow() == SessionState::Finished {
                    return Ok(());
                }
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => match decode_slice::<ClientMessage>(&line) {
                    Ok(message) => {
                        binding.session.submit(binding.seat, message);
                    }
                    Err(err) => {
                        debug!(name, error = %err, "undecodable line");
                        send(tx, ServerMessage::Error {
                            message: format!("invalid message: {err}"),
                        });
                    }
                },
                Ok(None) => {
                    binding.session.disconnect(binding.seat);
                    return Ok(());
                }
                Err(err) => {
                    binding.session.disconnect(binding.seat);
                    return Err(err);
                }
            }
        }
    }
}

async fn write_loop(
    mut writer: OwnedWriteHalf,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
) -> ServerResult<()> {
    while let Some(message) = rx.recv().await {
        write_message(&mut writer, &message).await?;
    }
    writer.shutdown().await?;
    Ok(())
}

async fn write_message(writer: &mut OwnedWriteHalf, message: &ServerMessage) -> ServerResult<()> {
    writer.write_all(encode_line(message)?.as_bytes()).await?;
    Ok(())
}

fn send(tx: &SeatSink, message: ServerMessage) {
    if tx.send(message).is_err() {
        debug!("outbound queue closed");
    }
}
