//! Wire protocol shared by the game server and its clients

pub mod protocol;
