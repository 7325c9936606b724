//! Application messages exchanged between players and the game server
//!
//! Every message is one JSON object on its own line, discriminated by a
//! snake_case `"type"` field:
//!
//! ```text
//! {"type":"move","uci":"e2e4"}
//! {"type":"move_ok","uci":"e2e4","by":"white"}
//! ```

use serde::{Deserialize, Serialize};

/// A side as it appears on the wire
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

/// How a game ended
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Checkmate,
    Stalemate,
}

/// Client → Server
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// First message on a connection: claim a player name
    Hello { name: String },
    /// Coordinate move text, e.g. `e2e4` or `e7e8q`
    Move { uci: String },
    Chat { text: String },
    Resign,
}

/// Server → Client
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome { ok: bool },
    Queued { pos: usize },
    Start { color: Side, opponent: String },
    State { fen: String, turn: Side, check: bool },
    MoveOk { uci: String, by: Side },
    Illegal { reason: String },
    Result { outcome: Outcome, winner: Option<Side> },
    OpponentLeft,
    Chat { from: String, text: String },
    Error { message: String },
}

/// Encode a message as one newline-terminated JSON line
pub fn encode_line<T: Serialize>(message: &T) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

/// Decode one JSON line (trailing whitespace allowed)
pub fn decode_line<'a, T: Deserialize<'a>>(line: &'a str) -> serde_json::Result<T> {
    serde_json::from_str(line.trim_end())
}

/// Decode one raw line as read off a socket
///
/// Bytes that are not valid UTF-8 are a decode error like any other.
pub fn decode_slice<'a, T: Deserialize<'a>>(line: &'a [u8]) -> serde_json::Result<T> {
    serde_json::from_slice(line.trim_ascii_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn to_value<T: Serialize>(msg: &T) -> Value {
        serde_json::to_value(msg).expect("Should serialize")
    }

    #[test]
    fn test_client_hello_decodes() {
        let msg: ClientMessage = decode_line(r#"{"type":"hello","name":"alice"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Hello {
                name: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_client_move_decodes_with_newline() {
        let msg: ClientMessage = decode_line("{\"type\":\"move\",\"uci\":\"e2e4\"}\r\n").unwrap();
        assert_eq!(
            msg,
            ClientMessage::Move {
                uci: "e2e4".to_string()
            }
        );
    }

    #[test]
    fn test_client_resign_unit_variant() {
        let msg: ClientMessage = decode_line(r#"{"type":"resign"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Resign);
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(decode_line::<ClientMessage>(r#"{"type":"castle"}"#).is_err());
        assert!(decode_line::<ClientMessage>("not json").is_err());
    }

    #[test]
    fn test_decode_slice() {
        let msg: ClientMessage = decode_slice(b"{\"type\":\"resign\"}\n").unwrap();
        assert_eq!(msg, ClientMessage::Resign);
        assert!(decode_slice::<ClientMessage>(b"\xff\xfe\n").is_err());
    }

    #[test]
    fn test_move_ok_shape() {
        let msg = ServerMessage::MoveOk {
            uci: "e2e4".to_string(),
            by: Side::White,
        };
        assert_eq!(
            to_value(&msg),
            json!({"type": "move_ok", "uci": "e2e4", "by": "white"})
        );
    }

    #[test]
    fn test_state_shape() {
        let msg = ServerMessage::State {
            fen: "8/8/8/8/8/8/8/8 b - - 0 1".to_string(),
            turn: Side::Black,
            check: true,
        };
        assert_eq!(
            to_value(&msg),
            json!({"type": "state", "fen": "8/8/8/8/8/8/8/8 b - - 0 1", "turn": "black", "check": true})
        );
    }

    #[test]
    fn test_result_shape_with_and_without_winner() {
        let mate = ServerMessage::Result {
            outcome: Outcome::Checkmate,
            winner: Some(Side::Black),
        };
        assert_eq!(
            to_value(&mate),
            json!({"type": "result", "outcome": "checkmate", "winner": "black"})
        );

        let stalemate = ServerMessage::Result {
            outcome: Outcome::Stalemate,
            winner: None,
        };
        assert_eq!(
            to_value(&stalemate),
            json!({"type": "result", "outcome": "stalemate", "winner": null})
        );
    }

    #[test]
    fn test_opponent_left_shape() {
        assert_eq!(
            to_value(&ServerMessage::OpponentLeft),
            json!({"type": "opponent_left"})
        );
    }

    #[test]
    fn test_encode_line_is_single_line() {
        let line = encode_line(&ServerMessage::Chat {
            from: "bob".to_string(),
            text: "multi\nline".to_string(),
        })
        .unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);

        let decoded: ServerMessage = decode_line(&line).unwrap();
        assert_eq!(
            decoded,
            ServerMessage::Chat {
                from: "bob".to_string(),
                text: "multi\nline".to_string()
            }
        );
    }
}
