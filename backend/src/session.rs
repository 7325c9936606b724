//! Game sessions
//!
//! A [`GameSession`] is the protocol state machine for one match: it owns the
//! position, knows which seat plays which color, and turns each inbound
//! message into the outbound [`Delivery`] list the two seats should see.
//!
//! A [`SessionHandle`] is the transaction boundary. Both seats' connection
//! tasks call into the same handle; every call takes the session lock, runs
//! one transaction, and pushes the resulting messages to the seats' outbound
//! queues before the lock is released. Concurrent submissions are therefore
//! applied one at a time in arrival order, and both seats observe the events
//! of one transaction before any event of the next.
//!
//! ## Lifecycle
//!
//! ```text
//! AwaitingStart --start()--> Active --mate / stalemate / resign / disconnect--> Finished
//! ```
//!
//! Illegal and malformed moves are answered to the submitting seat only and
//! leave both the position and the lifecycle untouched.

use chess_engine::api::{apply_move, check_move, is_in_check, termination};
use chess_engine::notation::parse_move;
use chess_engine::{Color, IllegalReason, Position, Termination};
use parking_lot::Mutex;
use shared::protocol::{ClientMessage, Outcome, ServerMessage, Side};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Outbound queue of one seat
pub type SeatSink = mpsc::UnboundedSender<ServerMessage>;

/// One of the two participant slots
///
/// The host is the player who waited in the queue and plays white; the guest
/// joined second and plays black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    Host,
    Guest,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::Host, Seat::Guest];

    pub fn other(self) -> Seat {
        match self {
            Seat::Host => Seat::Guest,
            Seat::Guest => Seat::Host,
        }
    }

    fn index(self) -> usize {
        match self {
            Seat::Host => 0,
            Seat::Guest => 1,
        }
    }
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingStart,
    Active,
    Finished,
}

/// A message addressed to one seat
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub seat: Seat,
    pub message: ServerMessage,
}

#[derive(Debug, Clone)]
struct Player {
    name: String,
    color: Color,
}

pub fn side(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn outcome(termination: Termination) -> Outcome {
    match termination {
        Termination::Checkmate => Outcome::Checkmate,
        Termination::Stalemate => Outcome::Stalemate,
    }
}

/// Protocol state machine for one match
#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    position: Position,
    players: [Player; 2],
    state: SessionState,
}

impl GameSession {
    /// Bind two players to a fresh position; the host plays white
    pub fn new(id: Uuid, host: impl Into<String>, guest: impl Into<String>) -> Self {
        GameSession {
            id,
            position: Position::new(),
            players: [
                Player {
                    name: host.into(),
                    color: Color::White,
                },
                Player {
                    name: guest.into(),
                    color: Color::Black,
                },
            ],
            state: SessionState::AwaitingStart,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn color_of(&self, seat: Seat) -> Color {
        self.players[seat.index()].color
    }

    pub fn name_of(&self, seat: Seat) -> &str {
        &self.players[seat.index()].name
    }

    /// Activate the session and greet both seats
    pub fn start(&mut self) -> Vec<Delivery> {
        if self.state != SessionState::AwaitingStart {
            return Vec::new();
        }
        self.state = SessionState::Active;
        info!(
            session = %self.id,
            white = %self.name_of(Seat::Host),
            black = %self.name_of(Seat::Guest),
            "game started"
        );

        let mut out: Vec<Delivery> = Seat::ALL
            .iter()
            .map(|&seat| Delivery {
                seat,
                message: ServerMessage::Start {
                    color: side(self.color_of(seat)),
                    opponent: self.name_of(seat.other()).to_string(),
                },
            })
            .collect();
        out.extend(self.broadcast(self.snapshot()));
        out
    }

    /// Dispatch one inbound message from `seat`
    pub fn handle(&mut self, seat: Seat, message: ClientMessage) -> Vec<Delivery> {
        match message {
            ClientMessage::Move { uci } => self.submit_move(seat, &uci),
            ClientMessage::Chat { text } => self.chat(seat, text),
            ClientMessage::Resign => self.resign(seat),
            ClientMessage::Hello { .. } => vec![Delivery {
                seat,
                message: ServerMessage::Error {
                    message: "already seated in a game".to_string(),
                },
            }],
        }
    }

    /// Run one move transaction
    pub fn submit_move(&mut self, seat: Seat, text: &str) -> Vec<Delivery> {
        if self.state != SessionState::Active {
            return Vec::new();
        }

        let color = self.color_of(seat);
        if color != self.position.side_to_move() {
            return self.reject(seat, text, IllegalReason::NotYourTurn);
        }

        let mv = match parse_move(text) {
            Ok(mv) => mv,
            Err(err) => {
                debug!(session = %self.id, error = %err, "malformed move");
                return self.reject(seat, text, IllegalReason::MalformedMove);
            }
        };

        if let Err(reason) = check_move(&self.position, &mv, color) {
            return self.reject(seat, text, reason);
        }

        let result = match apply_move(&mut self.position, &mv) {
            Ok(result) => result,
            Err(err) => {
                warn!(session = %self.id, error = %err, "legal move failed to apply");
                return vec![Delivery {
                    seat,
                    message: ServerMessage::Error {
                        message: err.to_string(),
                    },
                }];
            }
        };

        // Echo the move as played, with the promotion that actually happened
        let played = self.position.history().last().copied().unwrap_or(mv);
        info!(session = %self.id, player = %self.name_of(seat), mv = %played, "move accepted");
        let mut out = self.broadcast(ServerMessage::MoveOk {
            uci: played.to_string(),
            by: side(color),
        });

        match termination(&self.position) {
            Some(how) => {
                self.state = SessionState::Finished;
                info!(session = %self.id, result = %result, how = %how, "game over");
                out.extend(self.broadcast(ServerMessage::Result {
                    outcome: outcome(how),
                    winner: result.winner().map(side),
                }));
            }
            None => out.extend(self.broadcast(self.snapshot())),
        }
        out
    }

    /// Relay chat text to the other seat
    pub fn chat(&mut self, seat: Seat, text: String) -> Vec<Delivery> {
        if self.state != SessionState::Active {
            return Vec::new();
        }
        vec![Delivery {
            seat: seat.other(),
            message: ServerMessage::Chat {
                from: self.name_of(seat).to_string(),
                text,
            },
        }]
    }

    /// End the game because `seat` resigned or disconnected
    pub fn resign(&mut self, seat: Seat) -> Vec<Delivery> {
        if self.state != SessionState::Active {
            return Vec::new();
        }
        self.state = SessionState::Finished;
        info!(session = %self.id, player = %self.name_of(seat), "player left");
        vec![Delivery {
            seat: seat.other(),
            message: ServerMessage::OpponentLeft,
        }]
    }

    fn snapshot(&self) -> ServerMessage {
        ServerMessage::State {
            fen: self.position.to_fen(),
            turn: side(self.position.side_to_move()),
            check: is_in_check(&self.position),
        }
    }

    fn broadcast(&self, message: ServerMessage) -> Vec<Delivery> {
        Seat::ALL
            .iter()
            .map(|&seat| Delivery {
                seat,
                message: message.clone(),
            })
            .collect()
    }

    fn reject(&self, seat: Seat, text: &str, reason: IllegalReason) -> Vec<Delivery> {
        debug!(session = %self.id, player = %self.name_of(seat), text, reason = reason.code(), "move rejected");
        vec![Delivery {
            seat,
            message: ServerMessage::Illegal {
                reason: reason.code().to_string(),
            },
        }]
    }
}

/// Shared, lock-guarded session plus the seats' outbound queues
#[derive(Debug)]
pub struct SessionHandle {
    id: Uuid,
    session: Mutex<GameSession>,
    sinks: [SeatSink; 2],
    status: watch::Sender<SessionState>,
}

impl SessionHandle {
    pub fn new(session: GameSession, host: SeatSink, guest: SeatSink) -> Self {
        let (status, _) = watch::channel(session.state());
        SessionHandle {
            id: session.id(),
            session: Mutex::new(session),
            sinks: [host, guest],
            status,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Lifecycle updates, for connection tasks that must stop on game end
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.status.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.session.lock().state()
    }

    /// Copy of the current position
    pub fn position(&self) -> Position {
        self.session.lock().position().clone()
    }

    pub fn start(&self) -> SessionState {
        self.transact(|session| session.start())
    }

    /// Submit one inbound message from `seat`
    pub fn submit(&self, seat: Seat, message: ClientMessage) -> SessionState {
        self.transact(|session| session.handle(seat, message))
    }

    /// The connection behind `seat` is gone
    pub fn disconnect(&self, seat: Seat) -> SessionState {
        self.transact(|session| session.resign(seat))
    }

    fn transact<F>(&self, f: F) -> SessionState
    where
        F: FnOnce(&mut GameSession) -> Vec<Delivery>,
    {
        let mut session = self.session.lock();
        for delivery in f(&mut session) {
            if self.sinks[delivery.seat.index()]
                .send(delivery.message)
                .is_err()
            {
                debug!(session = %self.id, seat = ?delivery.seat, "seat outbound queue closed");
            }
        }
        let state = session.state();
        self.status.send_if_modified(|current| {
            let changed = *current != state;
            *current = state;
            changed
        });
        state
    }
}
