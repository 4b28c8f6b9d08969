//! Debounce
//!
//! Per-field cancel-and-restart deferral. Every schedule invalidates the
//! previous ticket, so only the last write in a burst commits.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;

use crate::domain::{DocumentResult, StoreError};

/// Source of delays (gloo timers in the browser, instant in tests)
pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Single outstanding deferred task per field
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Rc<Cell<u64>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a new quiet period, superseding any pending one
    pub fn schedule(&self) -> Ticket {
        let issued = self.generation.get().wrapping_add(1);
        self.generation.set(issued);
        Ticket {
            generation: self.generation.clone(),
            issued,
            delay: self.delay,
        }
    }

    /// Drop whatever is pending
    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

/// Claim on the most recent quiet period
#[derive(Debug)]
pub struct Ticket {
    generation: Rc<Cell<u64>>,
    issued: u64,
    delay: Duration,
}

impl Ticket {
    /// Still the latest schedule and not cancelled
    pub fn is_current(&self) -> bool {
        self.generation.get() == self.issued
    }

    /// Wait out the delay; true if nothing superseded this ticket meanwhile
    pub async fn settle(&self, timer: &dyn Timer) -> bool {
        timer.sleep(self.delay).await;
        self.is_current()
    }
}

/// A persistence step that runs once its field has been quiet long enough
pub struct DeferredWrite {
    field: &'static str,
    ticket: Ticket,
    timer: Rc<dyn Timer>,
    commit: Box<dyn FnOnce() -> Result<(), StoreError>>,
}

impl DeferredWrite {
    pub fn new(
        field: &'static str,
        ticket: Ticket,
        timer: Rc<dyn Timer>,
        commit: impl FnOnce() -> Result<(), StoreError> + 'static,
    ) -> Self {
        Self {
            field,
            ticket,
            timer,
            commit: Box::new(commit),
        }
    }

    /// Sleep, then commit unless superseded
    ///
    /// Returns whether the write actually happened.
    pub async fn run(self) -> DocumentResult<bool> {
        if !self.ticket.settle(self.timer.as_ref()).await {
            log::debug!("[doc] deferred {} write superseded", self.field);
            return Ok(false);
        }
        (self.commit)()?;
        log::debug!("[doc] deferred {} write committed", self.field);
        Ok(true)
    }
}
