use axum::extract::ws::{close_code, CloseFrame, Message, Utf8Bytes, WebSocket};
use futures::{SinkExt, StreamExt};
use log::{debug, info};
use paperdash_protocol::event::Event;
use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::{atomic, Arc};
use tokio::select;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc::{error::SendError, unbounded_channel, UnboundedSender};

use crate::app::AppState;

pub struct WebsocketConnection {
    #[allow(dead_code)]
    pub app_state: AppState,

    pub sender: UnboundedSender<Message>,
    pub addr: SocketAddr,
}

impl WebsocketConnection {
    fn new(
        app_state: AppState,
        sender: UnboundedSender<Message>,
        addr: SocketAddr,
    ) -> WebsocketConnection {
        WebsocketConnection {
            app_state,
            sender,
            addr,
        }
    }
}

/// `{"type":"log",...}` or `{"type":"status",...}` as a text frame.
pub fn event_frame(event: &Event) -> anyhow::Result<Message> {
    Ok(Message::Text(Utf8Bytes::from(serde_json::to_string(event)?)))
}

impl WebsocketConnection {
    pub fn send(&self, msg: Message) -> Result<(), SendError<Message>> {
        self.sender.send(msg)
    }

    pub fn send_event(&self, event: &Event) -> anyhow::Result<()> {
        self.send(event_frame(event)?)?;
        Ok(())
    }
}

/// Live console subscribers.
pub struct WsConnManager {
    id: AtomicUsize,
    connections: scc::HashMap<usize, Arc<WebsocketConnection>, ahash::RandomState>,
}

impl Default for WsConnManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WsConnManager {
    pub fn new() -> Self {
        Self {
            id: AtomicUsize::new(0),
            connections: scc::HashMap::default(),
        }
    }
}

impl WsConnManager {
    fn add(&self, conn: Arc<WebsocketConnection>) -> usize {
        let id = self.id.fetch_add(1, atomic::Ordering::Relaxed);
        let _ = self.connections.insert(id, conn);
        id
    }

    pub fn count(&self) -> usize {
        self.connections.len()
    }

    pub async fn serve_connection(
        &self,
        ws: WebSocket,
        app_state: AppState,
        peer_addr: SocketAddr,
    ) -> anyhow::Result<()> {
        let (mut outgoing, mut incoming) = ws.split();

        let (outgoing_tx, mut outgoing_rx) = unbounded_channel();

        let ws_conn = Arc::new(WebsocketConnection::new(
            app_state.clone(),
            outgoing_tx,
            peer_addr,
        ));

        let supervisor = &app_state.supervisor;
        let (status, backlog, mut events) =
            supervisor.subscribe(supervisor.console_config().replay);
        ws_conn.send_event(&Event::from(status))?;
        for entry in &backlog {
            ws_conn.send_event(&Event::from(entry))?;
        }

        let stop_notify = app_state.stop_notify.clone();
        let ws_conn_clone = ws_conn.clone();

        let connection_loop = async move {
            let cancel = stop_notify.notified();
            tokio::pin!(cancel);

            loop {
                select! {
                    // read
                    msg = incoming.next() => {
                        if let Some(Ok(m)) = msg {
                            ws_conn_clone.handle_received(m)?
                        }
                        else {
                            break;
                        }
                    }

                    // write
                    msg = outgoing_rx.recv() => {
                        if let Some(m) = msg {
                             match m {
                                Message::Close(_) => {
                                    outgoing.send(m).await?;
                                    outgoing.close().await?;
                                    break;
                                }
                                _ => outgoing.send(m).await?,
                            }
                        }
                        else {
                            break;
                        }
                    }

                    // console
                    event = events.recv() => match event {
                        Ok(event) => outgoing.send(event_frame(&Event::from(&event))?).await?,
                        Err(RecvError::Lagged(skipped)) => {
                            debug!("websocket {} lagged, skipped {} events", peer_addr, skipped);
                        }
                        Err(RecvError::Closed) => break,
                    },

                    // cancel
                    _ = &mut cancel => {
                        outgoing.send(Message::Close(Some(CloseFrame{
                            code: close_code::NORMAL,
                            reason: "daemon closed".into()
                        }))).await?;
                        info!("websocket connection from {} closed", peer_addr);
                        break;
                    }
                }
            }
            anyhow::Ok(())
        };
        let id = self.add(ws_conn);
        let rv = tokio::spawn(connection_loop).await?;
        self.connections.remove(&id);
        rv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperdash_protocol::management::server::{LogEntry, ServerStatus};

    fn text(message: Message) -> String {
        match message {
            Message::Text(text) => text.to_string(),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn frames_are_plain_json() {
        let status = event_frame(&Event::from(ServerStatus::Stopping)).unwrap();
        assert_eq!(text(status), r#"{"type":"status","status":"stopping"}"#);

        let entry = LogEntry::new(1, "Server stopped with code 0");
        let log = text(event_frame(&Event::from(&entry)).unwrap());
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["type"], "log");
        assert!(value["message"]
            .as_str()
            .unwrap()
            .ends_with("] Server stopped with code 0"));
    }
}
