//! Synthetic Trace Generator
//!
//! Manufactures plausible asynchronous message-passing traces for tests,
//! benchmarks and the CLI. Randomness comes from an explicit, seedable
//! `ChaCha8Rng`, so a `(processes, seed, num_events)` triple always yields
//! the same trace.
//!
//! # Model
//!
//! Each step picks a process uniformly at random. If that process has
//! undelivered inbound messages it receives one of them (chosen at random)
//! with probability 1/2; otherwise it sends a new message to a different,
//! randomly chosen process.
//!
//! ```text
//! Send:    clock[p] += 1                      → SEND event
//! Receive: clock = max(clock, msg.clock)      → RECV event
//!          clock[p] += 1
//! ```

use super::event::Event;
use super::trace_log::Trace;
use crate::domain::clock::{ProcessId, VectorClock};
use crate::error::TraceError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// A message that has been sent but not yet received
#[derive(Debug, Clone)]
struct InFlight {
    message_id: u64,
    clock: VectorClock,
}

/// Seedable generator of clock-respecting traces
#[derive(Debug, Clone)]
pub struct TraceGenerator {
    processes: Vec<ProcessId>,
    rng: ChaCha8Rng,
}

impl TraceGenerator {
    /// Create a generator seeded with `seed`
    ///
    /// Duplicate process names are collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InsufficientProcesses`] when fewer than two
    /// distinct processes are given, since every send needs a receiver other
    /// than the sender.
    pub fn new<I, P>(processes: I, seed: u64) -> Result<Self, TraceError>
    where
        I: IntoIterator<Item = P>,
        P: Into<ProcessId>,
    {
        Self::with_rng(processes, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a generator driven by an existing RNG
    ///
    /// # Errors
    ///
    /// Same as [`TraceGenerator::new`].
    pub fn with_rng<I, P>(processes: I, rng: ChaCha8Rng) -> Result<Self, TraceError>
    where
        I: IntoIterator<Item = P>,
        P: Into<ProcessId>,
    {
        let mut distinct: Vec<ProcessId> = Vec::new();
        for process in processes {
            let process = process.into();
            if !distinct.contains(&process) {
                distinct.push(process);
            }
        }

        if distinct.len() < 2 {
            return Err(TraceError::InsufficientProcesses {
                count: distinct.len(),
            });
        }

        Ok(Self {
            processes: distinct,
            rng,
        })
    }

    /// Processes this generator schedules
    pub fn processes(&self) -> &[ProcessId] {
        &self.processes
    }

    /// Generate a trace of exactly `num_events` events
    ///
    /// Consecutive calls continue the same random stream but start from
    /// fresh (all-zero) clocks.
    pub fn generate(&mut self, num_events: usize) -> Trace {
        let n = self.processes.len();
        let mut clocks: Vec<VectorClock> =
            vec![VectorClock::zero(self.processes.iter().cloned()); n];
        let mut pending: Vec<Vec<InFlight>> = vec![Vec::new(); n];
        let mut trace = Trace::with_capacity(num_events);
        let mut next_message_id = 0u64;

        while trace.len() < num_events {
            let p = self.rng.gen_range(0..n);
            let receive = !pending[p].is_empty() && self.rng.gen_range(0..2) == 0;

            if receive {
                let slot = self.rng.gen_range(0..pending[p].len());
                let message = pending[p].remove(slot);

                let clock = &mut clocks[p];
                clock.merge(&message.clock);
                clock.tick(&self.processes[p]);

                trace.push(Event::receive(
                    self.processes[p].clone(),
                    clock.clone(),
                    Some(message.message_id),
                ));
            } else {
                // Uniform over every process except `p`.
                let mut receiver = self.rng.gen_range(0..n - 1);
                if receiver >= p {
                    receiver += 1;
                }

                let clock = &mut clocks[p];
                clock.tick(&self.processes[p]);

                let message_id = next_message_id;
                next_message_id += 1;

                pending[receiver].push(InFlight {
                    message_id,
                    clock: clock.clone(),
                });
                trace.push(Event::send(
                    self.processes[p].clone(),
                    clock.clone(),
                    Some(message_id),
                ));
            }
        }

        let undelivered: usize = pending.iter().map(Vec::len).sum();
        debug!(
            events = trace.len(),
            messages = next_message_id,
            undelivered,
            "generated synthetic trace"
        );

        trace
    }
}
