use axum::extract::ws::{CloseFrame, Message};
use log::{debug, info};

use crate::drivers::websocket::WebsocketConnection;

impl WebsocketConnection {
    /// The stream is one way; client frames are only logged.
    pub fn handle_received(&self, data: Message) -> anyhow::Result<()> {
        match data {
            Message::Text(text) => debug!("ignoring text from client({}): {}", self.addr, text),
            Message::Binary(bin) => debug!(
                "ignoring {} bytes of binary from client({})",
                bin.len(),
                self.addr
            ),
            Message::Close(close) => self.handle_closing(close.as_ref()),
            _ => {}
        }
        Ok(())
    }

    pub fn handle_closing(&self, msg: Option<&CloseFrame>) {
        info!(
            "websocket close from client({}), with reason: {}",
            self.addr,
            msg.map(|f| f.reason.to_string()).unwrap_or_default()
        );
    }
}
