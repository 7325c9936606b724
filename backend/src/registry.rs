//! Session registry
//!
//! Owns every piece of cross-connection state: the set of names in use, the
//! FIFO queue of players waiting for an opponent and the map of running
//! sessions. All operations go through one lock.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use shared::protocol::ServerMessage;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::session::{GameSession, Seat, SeatSink, SessionHandle};

/// Which seat a connection holds in which session
#[derive(Debug, Clone)]
pub struct SeatBinding {
    pub seat: Seat,
    pub session: Arc<SessionHandle>,
}

/// Outcome of joining the matchmaking queue
#[derive(Debug)]
pub enum Enqueued {
    /// Nobody was waiting; `ticket` resolves once an opponent arrives
    ///
    /// A `queued` message has already been pushed to the player's sink.
    Waiting {
        pos: usize,
        ticket: oneshot::Receiver<SeatBinding>,
    },
    /// Paired with the longest-waiting player and the game has started
    Paired(SeatBinding),
}

#[derive(Debug)]
struct Waiting {
    name: String,
    sink: SeatSink,
    ticket: oneshot::Sender<SeatBinding>,
}

#[derive(Debug, Default)]
struct RegistryState {
    names: HashSet<String>,
    queue: VecDeque<Waiting>,
    sessions: HashMap<Uuid, Arc<SessionHandle>>,
}

#[derive(Debug, Default)]
pub struct SessionRegistry {
    inner: Mutex<RegistryState>,
}

fn name_key(name: &str) -> String {
    name.to_lowercase()
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a player name for the lifetime of a connection
    ///
    /// Names are compared case-insensitively.
    pub fn register(&self, name: &str) -> ServerResult<()> {
        let mut inner = self.inner.lock();
        if !inner.names.insert(name_key(name)) {
            return Err(ServerError::NameTaken {
                name: name.to_string(),
            });
        }
        debug!(name, "name registered");
        Ok(())
    }

    pub fn release(&self, name: &str) {
        self.inner.lock().names.remove(&name_key(name));
    }

    /// Queue a player, or pair them with whoever has waited longest
    ///
    /// The waiting player takes white. The session is created and started
    /// before this returns, so both seats already have their `start`
    /// messages queued.
    pub fn enqueue(&self, name: &str, sink: SeatSink) -> Enqueued {
        let mut inner = self.inner.lock();

        // Skip waiters whose connection went away without leaving the queue
        let host = loop {
            match inner.queue.pop_front() {
                Some(waiting) if waiting.ticket.is_closed() => {
                    debug!(name = %waiting.name, "dropping stale queue entry");
                }
                other => break other,
            }
        };

        let Some(host) = host else {
            let (ticket, receiver) = oneshot::channel();
            let pos = inner.queue.len() + 1;
            // Sent under the lock so it always precedes `start`
            let _ = sink.send(ServerMessage::Queued { pos });
            inner.queue.push_back(Waiting {
                name: name.to_string(),
                sink,
                ticket,
            });
            info!(name, pos, "player queued");
            return Enqueued::Waiting {
                pos,
                ticket: receiver,
            };
        };

        let id = Uuid::new_v4();
        let handle = Arc::new(SessionHandle::new(
            GameSession::new(id, host.name.as_str(), name),
            host.sink,
            sink,
        ));
        inner.sessions.insert(id, Arc::clone(&handle));
        info!(session = %id, white = %host.name, black = name, "players paired");

        handle.start();
        let host_binding = SeatBinding {
            seat: Seat::Host,
            session: Arc::clone(&handle),
        };
        if host.ticket.send(host_binding).is_err() {
            warn!(session = %id, name = %host.name, "host left while being paired");
            handle.disconnect(Seat::Host);
        }

        Enqueued::Paired(SeatBinding {
            seat: Seat::Guest,
            session: handle,
        })
    }

    /// Remove a waiting player; `false` if they were already paired
    pub fn leave_queue(&self, name: &str) -> bool {
        let mut inner = self.inner.lock();
        let key = name_key(name);
        let before = inner.queue.len();
        inner.queue.retain(|waiting| name_key(&waiting.name) != key);
        let removed = inner.queue.len() != before;
        if removed {
            debug!(name, "player left the queue");
        }
        removed
    }

    /// Forget a session once it has finished
    pub fn finish(&self, id: Uuid) {
        if self.inner.lock().sessions.remove(&id).is_some() {
            info!(session = %id, "session closed");
        }
    }

    pub fn session(&self, id: Uuid) -> Option<Arc<SessionHandle>> {
        self.inner.lock().sessions.get(&id).cloned()
    }

    pub fn waiting_count(&self) -> usize {
        self.inner.lock().queue.len()
    }

    pub fn active_sessions(&self) -> usize {
        self.inner.lock().sessions.len()
    }
}
