use anyhow::Result;
use axum::extract::ws::{Message, Utf8Bytes};
use opsboard_model::{ClientMessage, ServerMessage};

/// Convert a ServerMessage to a WebSocket message.
pub fn server_to_websocket(msg: &ServerMessage) -> Result<Message> {
    let json = serde_json::to_string(msg)?;
    Ok(Message::Text(Utf8Bytes::from(json)))
}

/// Parse a WebSocket message into a ClientMessage.
pub fn client_from_websocket(msg: &Message) -> Result<ClientMessage> {
    match msg {
        Message::Text(text) => {
            let client_msg: ClientMessage = serde_json::from_str(text.as_str())?;
            Ok(client_msg)
        }
        Message::Binary(bin) => {
            let client_msg: ClientMessage = serde_json::from_slice(bin.as_ref())?;
            Ok(client_msg)
        }
        _ => Err(anyhow::anyhow!("unsupported message type")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsboard_model::Snapshot;

    #[test]
    fn init_converts_to_text_frame() {
        let msg = server_to_websocket(&ServerMessage::Init(Snapshot::default()))
            .unwrap();
        match msg {
            Message::Text(text) => assert!(text.as_str().contains("\"init\"")),
            other => panic!("expected text frame, got {other:?}"),
        }
    }

    #[test]
    fn client_messages_parse_from_text_frames() {
        let frame = Message::Text(Utf8Bytes::from(
            r#"{"event":"workerToggleStatus","name":"Sarah Connor"}"#,
        ));
        let msg = client_from_websocket(&frame).unwrap();
        assert_eq!(
            msg,
            ClientMessage::WorkerToggleStatus {
                name: "Sarah Connor".to_owned()
            }
        );
    }

    #[test]
    fn control_frames_are_rejected() {
        assert!(client_from_websocket(&Message::Pong(Vec::new().into())).is_err());
    }
}
