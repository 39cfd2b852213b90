//! Safety checking over causal futures
//!
//! # Algorithm
//!
//! For every event satisfying the precondition (a *trigger*), walk its
//! descendants with an explicit stack. A per-trigger visited set ensures each
//! descendant is evaluated once even when reachable along several paths. The
//! trigger itself is never evaluated.
//!
//! On a reduced graph the walk touches each descendant through its retained
//! edges only, which keeps the stack short on dense traces.

use crate::domain::graph::{CausalGraph, NodeSet};
use crate::domain::trace::EventId;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

use super::property::SafetyProperty;

/// How many violations to collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// Stop at the first violation
    #[default]
    FailFast,
    /// Check every trigger, first offending descendant per trigger
    Exhaustive,
}

/// A descendant on which the postcondition failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Event that satisfied the precondition
    pub trigger: EventId,
    /// Descendant that failed the postcondition
    pub offending: EventId,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "postcondition violated: trigger {}, offending {}",
            self.trigger, self.offending
        )
    }
}

/// Outcome of a safety check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SafetyVerdict {
    /// No descendant of any trigger violated the postcondition
    Holds,
    /// First violation found (lowest trigger id)
    Violated(Violation),
}

/// Result of a safety check with work counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyReport {
    /// Overall verdict
    pub verdict: SafetyVerdict,
    /// Every violation found, ordered by trigger id
    pub violations: Vec<Violation>,
    /// Events that satisfied the precondition and were walked
    pub triggers_checked: usize,
    /// Postcondition evaluations
    pub descendants_evaluated: usize,
}

impl SafetyReport {
    /// True if the property holds
    #[inline]
    pub fn holds(&self) -> bool {
        matches!(self.verdict, SafetyVerdict::Holds)
    }

    fn collect<I>(results: I, mode: CheckMode) -> Self
    where
        I: IntoIterator<Item = TriggerOutcome>,
    {
        let mut violations = Vec::new();
        let mut triggers_checked = 0;
        let mut descendants_evaluated = 0;

        for outcome in results {
            triggers_checked += 1;
            descendants_evaluated += outcome.evaluated;
            if let Some(offending) = outcome.offending {
                let violation = Violation {
                    trigger: outcome.trigger,
                    offending,
                };
                warn!(trigger = %violation.trigger, offending = %violation.offending, "safety violation");
                violations.push(violation);
                if mode == CheckMode::FailFast {
                    break;
                }
            }
        }

        let verdict = violations
            .first()
            .map_or(SafetyVerdict::Holds, |&v| SafetyVerdict::Violated(v));

        debug!(
            triggers = triggers_checked,
            evaluated = descendants_evaluated,
            violations = violations.len(),
            "safety check complete"
        );

        Self {
            verdict,
            violations,
            triggers_checked,
            descendants_evaluated,
        }
    }
}

/// Walk result for one trigger
#[derive(Debug, Clone, Copy)]
struct TriggerOutcome {
    trigger: EventId,
    offending: Option<EventId>,
    evaluated: usize,
}

impl CausalGraph {
    /// Check `property` over every trigger, stopping at the first violation
    pub fn check_safety<P>(&self, property: &P) -> SafetyReport
    where
        P: SafetyProperty + ?Sized,
    {
        self.check_safety_with(property, CheckMode::FailFast)
    }

    /// Check `property` in the given mode
    ///
    /// Triggers are visited by ascending id.
    pub fn check_safety_with<P>(&self, property: &P, mode: CheckMode) -> SafetyReport
    where
        P: SafetyProperty + ?Sized,
    {
        let mut visited = NodeSet::new(self.node_count());
        let mut stack = Vec::new();

        let outcomes = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, event)| property.precondition(event))
            .filter_map(|(t, _)| self.walk_future(EventId(t), property, &mut visited, &mut stack, None));

        SafetyReport::collect(outcomes, mode)
    }

    /// Check `property` with triggers walked concurrently on the rayon pool
    ///
    /// The report equals the one [`check_safety_with`](Self::check_safety_with)
    /// returns for the same mode, counters included. Under
    /// [`CheckMode::FailFast`] the lowest violating trigger seen so far is
    /// shared between workers: triggers above it are never started, and walks
    /// already running above it are abandoned.
    pub fn check_parallel<P>(&self, property: &P, mode: CheckMode) -> SafetyReport
    where
        P: SafetyProperty + Sync + ?Sized,
    {
        let n = self.node_count();
        let cutoff = AtomicUsize::new(usize::MAX);
        let shared = match mode {
            CheckMode::FailFast => Some(&cutoff),
            CheckMode::Exhaustive => None,
        };

        // Every trigger below the final cutoff is walked to completion, so the
        // in-order fold sees exactly the triggers a sequential pass would.
        let outcomes: Vec<TriggerOutcome> = (0..n)
            .into_par_iter()
            .filter(|&t| t <= cutoff.load(Ordering::Acquire))
            .filter(|&t| property.precondition(&self.events[t]))
            .map_init(
                || (NodeSet::new(n), Vec::new()),
                |(visited, stack), t| {
                    let outcome = self.walk_future(EventId(t), property, visited, stack, shared)?;
                    if let (Some(cutoff), Some(_)) = (shared, outcome.offending) {
                        cutoff.fetch_min(t, Ordering::AcqRel);
                    }
                    Some(outcome)
                },
            )
            .flatten()
            .collect();

        let winner = cutoff.load(Ordering::Acquire);
        SafetyReport::collect(
            outcomes.into_iter().filter(|o| o.trigger.as_index() <= winner),
            mode,
        )
    }

    /// Evaluate the postcondition on every descendant of `trigger`
    ///
    /// Returns at the first failing descendant. With a `cutoff`, gives up
    /// (`None`) as soon as a lower trigger is known to violate.
    fn walk_future<P>(
        &self,
        trigger: EventId,
        property: &P,
        visited: &mut NodeSet,
        stack: &mut Vec<EventId>,
        cutoff: Option<&AtomicUsize>,
    ) -> Option<TriggerOutcome>
    where
        P: SafetyProperty + ?Sized,
    {
        let trigger_event = &self.events[trigger.as_index()];
        visited.clear();
        stack.clear();
        stack.extend_from_slice(self.successors(trigger));

        let mut evaluated = 0;
        while let Some(node) = stack.pop() {
            if cutoff.is_some_and(|c| c.load(Ordering::Acquire) < trigger.as_index()) {
                return None;
            }
            if visited.contains(node.as_index()) {
                continue;
            }
            visited.insert(node.as_index());

            evaluated += 1;
            let future_event = &self.events[node.as_index()];
            if !property.postcondition(trigger, trigger_event, node, future_event) {
                return Some(TriggerOutcome {
                    trigger,
                    offending: Some(node),
                    evaluated,
                });
            }

            stack.extend(
                self.successors(node)
                    .iter()
                    .filter(|v| !visited.contains(v.as_index())),
            );
        }

        Some(TriggerOutcome {
            trigger,
            offending: None,
            evaluated,
        })
    }
}
