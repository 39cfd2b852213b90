//! Trace container
//!
//! A [`Trace`] is an append-only, indexed sequence of events. The index of an
//! event is its [`EventId`]; trace order itself carries no causal meaning.

use super::event::{Event, EventId};
use crate::domain::clock::ProcessId;
use crate::error::TraceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered sequence of recorded events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    events: Vec<Event>,
}

impl Trace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty trace with room for `capacity` events
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Append an event and return its id
    pub fn push(&mut self, event: Event) -> EventId {
        let id = EventId(self.events.len());
        self.events.push(event);
        id
    }

    /// Number of events
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the trace holds no events
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Look up an event by id
    #[inline]
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.as_index())
    }

    /// All events as a slice
    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Iterate events with their ids
    pub fn iter(&self) -> impl Iterator<Item = (EventId, &Event)> + '_ {
        self.events.iter().enumerate().map(|(i, e)| (EventId(i), e))
    }

    /// Distinct processes in order of first appearance
    pub fn processes(&self) -> Vec<ProcessId> {
        let mut seen: Vec<ProcessId> = Vec::new();
        for event in &self.events {
            if !seen.contains(event.process()) {
                seen.push(event.process().clone());
            }
        }
        seen
    }

    /// Copy of this trace sorted by clock sum, then process id
    ///
    /// The sort is stable, so events with equal keys keep their relative
    /// order. Causally earlier events always have a strictly smaller clock
    /// sum, which makes the result a linear extension of happens-before.
    pub fn sorted_by_clock_sum(&self) -> Trace {
        let mut events = self.events.clone();
        events.sort_by(|a, b| {
            a.clock()
                .sum()
                .cmp(&b.clock().sum())
                .then_with(|| a.process().cmp(b.process()))
        });
        Trace { events }
    }

    /// Pairs of events on different processes whose clocks are equivalent
    ///
    /// A clock-respecting source never produces these; they are reported so
    /// the caller can decide how to treat them.
    pub fn duplicate_clocks(&self) -> Vec<(EventId, EventId)> {
        let mut duplicates = Vec::new();
        for (i, a) in self.events.iter().enumerate() {
            for (j, b) in self.events.iter().enumerate().skip(i + 1) {
                if a.process() != b.process() && a.clock().equivalent(b.clock()) {
                    duplicates.push((EventId(i), EventId(j)));
                }
            }
        }
        duplicates
    }

    /// Reject traces larger than `max_events`
    pub fn check_budget(&self, max_events: usize) -> Result<(), TraceError> {
        if self.events.len() > max_events {
            return Err(TraceError::TooLarge {
                len: self.events.len(),
                max: max_events,
            });
        }
        Ok(())
    }
}

impl From<Vec<Event>> for Trace {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl FromIterator<Event> for Trace {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, event) in self.iter() {
            writeln!(f, "{id}: {event}")?;
        }
        Ok(())
    }
}
