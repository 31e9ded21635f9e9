pub mod handle_websocket;
pub mod login;
