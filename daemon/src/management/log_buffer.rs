use paperdash_protocol::event::Event;
use paperdash_protocol::management::server::{LogEntry, ServerStatus};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

const BROADCAST_CAPACITY: usize = 1024;

/// What subscribers of the console receive.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    Log(LogEntry),
    Status(ServerStatus),
}

impl From<&ConsoleEvent> for Event {
    fn from(event: &ConsoleEvent) -> Self {
        match event {
            ConsoleEvent::Log(entry) => Event::from(entry),
            ConsoleEvent::Status(status) => Event::from(*status),
        }
    }
}

struct Ring {
    entries: VecDeque<LogEntry>,
    next_seq: u64,
}

/// Bounded console history plus a fan-out channel for new lines.
///
/// Appending and publishing happen under the same lock, so a subscriber that
/// takes a snapshot and a receiver together sees every entry exactly once.
/// Slow receivers lag and skip entries instead of holding up the producer.
pub struct LogBuffer {
    ring: Mutex<Ring>,
    capacity: usize,
    tx: broadcast::Sender<ConsoleEvent>,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            ring: Mutex::new(Ring {
                entries: VecDeque::with_capacity(capacity),
                next_seq: 1,
            }),
            capacity,
            tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ring> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn append(&self, message: impl Into<String>) -> LogEntry {
        let mut ring = self.lock();
        let entry = LogEntry::new(ring.next_seq, message);
        ring.next_seq += 1;
        if ring.entries.len() == self.capacity {
            ring.entries.pop_front();
        }
        ring.entries.push_back(entry.clone());
        // no receivers is fine
        let _ = self.tx.send(ConsoleEvent::Log(entry.clone()));
        entry
    }

    pub fn publish_status(&self, status: ServerStatus) {
        let _guard = self.lock();
        let _ = self.tx.send(ConsoleEvent::Status(status));
    }

    /// The most recent `limit` entries, oldest first; all of them on `None`.
    pub fn snapshot(&self, limit: Option<usize>) -> Vec<LogEntry> {
        Self::tail(&self.lock(), limit)
    }

    /// Entries appended after `seq`, oldest first.
    pub fn entries_after(&self, seq: u64) -> Vec<LogEntry> {
        let ring = self.lock();
        let newer = ring.entries.iter().rev().take_while(|e| e.seq > seq).count();
        ring.entries.iter().skip(ring.entries.len() - newer).cloned().collect()
    }

    /// Sequence number the next appended entry will get.
    pub fn next_seq(&self) -> u64 {
        self.lock().next_seq
    }

    pub fn subscribe(&self, replay: usize) -> (Vec<LogEntry>, broadcast::Receiver<ConsoleEvent>) {
        let ring = self.lock();
        (Self::tail(&ring, Some(replay)), self.tx.subscribe())
    }

    /// Drops the history. Sequence numbers keep growing.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn tail(ring: &Ring, limit: Option<usize>) -> Vec<LogEntry> {
        let limit = limit.unwrap_or(ring.entries.len()).min(ring.entries.len());
        ring.entries
            .iter()
            .skip(ring.entries.len() - limit)
            .cloned()
            .collect()
    }
}
