//! Two-player chess server
//!
//! Players connect over TCP, say hello with a name and are paired in arrival
//! order. Each pair plays one game through a [`session::SessionHandle`];
//! the [`registry::SessionRegistry`] tracks names, the waiting queue and
//! running sessions.

pub mod config;
pub mod error;
pub mod registry;
pub mod server;
pub mod session;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use registry::SessionRegistry;
pub use server::serve;
