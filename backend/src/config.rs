//! Command-line and environment configuration

use std::net::SocketAddr;

use clap::Parser;

/// Settings for the game server binary
///
/// Every option can also come from the environment (or a `.env` file).
#[derive(Parser, Debug, Clone)]
#[command(name = "backend", version, about = "Pairs players into chess matches over TCP")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "CHESS_BIND", default_value = "127.0.0.1:12345")]
    pub bind: SocketAddr,
}
