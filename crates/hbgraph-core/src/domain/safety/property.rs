//! Safety properties
//!
//! A property pairs a *precondition* selecting trigger events with a
//! *postcondition* that must hold for every event in a trigger's causal
//! future.

use crate::domain::clock::ProcessId;
use crate::domain::trace::{Event, EventId, EventKind};

/// Precondition / postcondition pair checked over causal futures
pub trait SafetyProperty {
    /// Does `event` start a check?
    fn precondition(&self, event: &Event) -> bool;

    /// Must hold for every descendant `future` of `trigger`
    fn postcondition(
        &self,
        trigger: EventId,
        trigger_event: &Event,
        future: EventId,
        future_event: &Event,
    ) -> bool;
}

/// Property built from two closures, see [`property_fn`]
#[derive(Clone)]
pub struct FnProperty<Pre, Post> {
    pre: Pre,
    post: Post,
}

/// Build a [`SafetyProperty`] from a precondition and a postcondition closure
///
/// ```rust
/// use hbgraph_core::domain::safety::{property_fn, SafetyProperty};
/// use hbgraph_core::domain::trace::Event;
///
/// let sends_stay_ordered = property_fn(
///     |e: &Event| e.is_send(),
///     |_, trigger: &Event, _, future: &Event| trigger.happens_before(future),
/// );
/// # let _ = &sends_stay_ordered;
/// ```
pub fn property_fn<Pre, Post>(pre: Pre, post: Post) -> FnProperty<Pre, Post>
where
    Pre: Fn(&Event) -> bool,
    Post: Fn(EventId, &Event, EventId, &Event) -> bool,
{
    FnProperty { pre, post }
}

impl<Pre, Post> SafetyProperty for FnProperty<Pre, Post>
where
    Pre: Fn(&Event) -> bool,
    Post: Fn(EventId, &Event, EventId, &Event) -> bool,
{
    #[inline]
    fn precondition(&self, event: &Event) -> bool {
        (self.pre)(event)
    }

    #[inline]
    fn postcondition(
        &self,
        trigger: EventId,
        trigger_event: &Event,
        future: EventId,
        future_event: &Event,
    ) -> bool {
        (self.post)(trigger, trigger_event, future, future_event)
    }
}

/// Every causal descendant of a trigger happens-after it
///
/// Holds on any graph produced by the builder; a violation means the graph
/// was assembled from adjacency that disagrees with the clocks.
#[derive(Clone)]
pub struct CausalFutureProperty<F> {
    trigger: F,
}

impl<F> CausalFutureProperty<F>
where
    F: Fn(&Event) -> bool,
{
    /// Check the causal future of every event matching `trigger`
    pub fn new(trigger: F) -> Self {
        Self { trigger }
    }
}

impl<F> SafetyProperty for CausalFutureProperty<F>
where
    F: Fn(&Event) -> bool,
{
    fn precondition(&self, event: &Event) -> bool {
        (self.trigger)(event)
    }

    fn postcondition(&self, _: EventId, trigger_event: &Event, _: EventId, future_event: &Event) -> bool {
        trigger_event.happens_before(future_event)
    }
}

/// Trigger matching the send of `process` whose own counter equals `count`
pub fn send_at(process: impl Into<ProcessId>, count: u64) -> impl Fn(&Event) -> bool + Clone + Send + Sync {
    let process = process.into();
    move |event: &Event| {
        event.kind() == EventKind::Send
            && event.process() == &process
            && event.clock().get(&process) == count
    }
}
