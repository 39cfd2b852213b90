//! Event Definitions
//!
//! An [`Event`] is one Send or Receive action stamped with the owning
//! process's vector clock at that moment. Events are built once by a trace
//! source and never mutated afterwards.

use crate::domain::clock::{ProcessId, VectorClock};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an event: its position in the trace
///
/// Graph edges reference events by this index, never by pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub usize);

impl EventId {
    /// Create a new EventId
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Convert to array index
    #[inline(always)]
    pub const fn as_index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e-{:02}", self.0)
    }
}

/// Kind of message-passing action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Message handed to the transport
    Send,
    /// Message delivered to its destination
    Receive,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Send => f.pad("SEND"),
            EventKind::Receive => f.pad("RECV"),
        }
    }
}

/// A recorded Send or Receive action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    kind: EventKind,
    process: ProcessId,
    clock: VectorClock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message_id: Option<u64>,
}

impl Event {
    /// Create an event
    pub fn new(
        kind: EventKind,
        process: impl Into<ProcessId>,
        clock: VectorClock,
        message_id: Option<u64>,
    ) -> Self {
        Self {
            kind,
            process: process.into(),
            clock,
            message_id,
        }
    }

    /// Create a Send event
    pub fn send(process: impl Into<ProcessId>, clock: VectorClock, message_id: Option<u64>) -> Self {
        Self::new(EventKind::Send, process, clock, message_id)
    }

    /// Create a Receive event
    pub fn receive(process: impl Into<ProcessId>, clock: VectorClock, message_id: Option<u64>) -> Self {
        Self::new(EventKind::Receive, process, clock, message_id)
    }

    /// Send or Receive
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Process that recorded this event
    #[inline]
    pub fn process(&self) -> &ProcessId {
        &self.process
    }

    /// Clock snapshot taken when the event happened
    #[inline]
    pub fn clock(&self) -> &VectorClock {
        &self.clock
    }

    /// Correlation id linking a Receive to its Send
    #[inline]
    pub fn message_id(&self) -> Option<u64> {
        self.message_id
    }

    /// True if this event is a Send
    #[inline]
    pub fn is_send(&self) -> bool {
        self.kind == EventKind::Send
    }

    /// Check if this event happens-before another
    #[inline]
    pub fn happens_before(&self, other: &Event) -> bool {
        self.clock.happens_before(&other.clock)
    }

    /// Short `KIND:PROCESS` label
    pub fn label(&self) -> String {
        format!("{}:{}", self.kind, self.process)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message_id {
            Some(id) => write!(f, "Msg-{id} {:<4} on {}, VClock: {}", self.kind, self.process, self.clock),
            None => write!(f, "{:<4} on {}, VClock: {}", self.kind, self.process, self.clock),
        }
    }
}
