//! # Ticker: periodic driver for a hub.
//!
//! The bus never schedules itself. [`Ticker`] is the async loop that turns
//! wall-clock time into ticks: each period it drains the subscriptions it
//! owns, then sweeps the hub.
//!
//! ## Loop
//! ```text
//! loop {
//!   select! {
//!     token.cancelled()  ─► break
//!     interval.tick()    ─► ticks += 1
//!                           ├─ every `drain_every` ticks: drain owned subscriptions
//!                           └─ hub.tick()  (bus sweep + response sweep)
//!   }
//! }
//! on exit: final drain of every owned subscription
//! ```
//!
//! ## Rules
//! - Draining happens **before** the sweep of the same tick, so an event created
//!   with lifetime 1 is still observable by the next drain.
//! - A panicking listener is isolated: the panic is caught and logged, other
//!   subscriptions are still drained. Its queued events for that drain are lost.
//! - Missed ticks are delayed, not burst.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tokio::select;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::core::hub::Hub;
use crate::listeners::{Drain, Listener, Subscription};

/// Totals collected over one [`Ticker::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickerReport {
    /// Ticks processed.
    pub ticks: u64,
    /// Events and responses evicted by sweeps.
    pub evicted: usize,
    /// Events handed to listeners.
    pub handled: usize,
    /// Drains aborted by a listener panic.
    pub panicked: usize,
}

/// Async tick driver owning a set of subscriptions.
pub struct Ticker {
    hub: Hub,
    drains: Vec<Box<dyn Drain + Send>>,
}

impl Ticker {
    /// Creates a ticker for `hub` with no subscriptions.
    pub fn new(hub: Hub) -> Self {
        Self {
            hub,
            drains: Vec::new(),
        }
    }

    /// Hands a subscription to the ticker; it is drained on the configured cadence.
    pub fn with_subscription<L>(self, sub: Subscription<L>) -> Self
    where
        L: Listener + Send + 'static,
    {
        self.with_drain(Box::new(sub))
    }

    /// Hands any type-erased drain to the ticker.
    pub fn with_drain(mut self, drain: Box<dyn Drain + Send>) -> Self {
        self.drains.push(drain);
        self
    }

    /// Number of owned subscriptions.
    pub fn len(&self) -> usize {
        self.drains.len()
    }

    /// True when the ticker owns no subscriptions.
    pub fn is_empty(&self) -> bool {
        self.drains.is_empty()
    }

    /// Spawns [`Ticker::run`] on the current tokio runtime.
    pub fn spawn(self, token: CancellationToken) -> JoinHandle<TickerReport> {
        tokio::spawn(self.run(token))
    }

    /// Runs until `token` is cancelled, then drains once more and returns totals.
    pub async fn run(mut self, token: CancellationToken) -> TickerReport {
        let mut report = TickerReport::default();
        let drain_every = self.hub.config().drain_interval().map(u64::from);

        let mut interval = time::interval(self.hub.config().tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the first sweep waits one full period.
        interval.tick().await;

        debug!(
            tick = ?self.hub.config().tick,
            subscriptions = self.drains.len(),
            "ticker started"
        );

        loop {
            select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    report.ticks += 1;
                    if drain_every.is_some_and(|every| report.ticks % every == 0) {
                        self.drain_all(&mut report);
                    }
                    report.evicted += self.hub.tick().total();
                }
            }
        }

        self.drain_all(&mut report);
        debug!(
            ticks = report.ticks,
            evicted = report.evicted,
            handled = report.handled,
            "ticker stopped"
        );
        report
    }

    fn drain_all(&mut self, report: &mut TickerReport) {
        for drain in &mut self.drains {
            let name = drain.name();
            match catch_unwind(AssertUnwindSafe(|| drain.drain())) {
                Ok(handled) => report.handled += handled,
                Err(panic_err) => {
                    report.panicked += 1;
                    let info = panic_message(&*panic_err);
                    error!(listener = name, panic = %info, "listener panicked while draining");
                }
            }
        }
    }
}

/// Text of a caught panic payload; `panic!` produces `&'static str` or `String`.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
