//! Test doubles for the host capabilities.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use super::{Capabilities, Confirm, PendingAction, PrintSurface, Timer};

/// Answers from a queue, defaulting to yes, and records every question
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<PendingAction>>,
}

impl ScriptedConfirm {
    pub fn answer(&self, yes: bool) {
        self.answers.borrow_mut().push_back(yes);
    }

    pub fn asked(&self) -> Vec<PendingAction> {
        self.asked.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, action: &PendingAction) -> bool {
        self.asked.borrow_mut().push(action.clone());
        self.answers.borrow_mut().pop_front().unwrap_or(true)
    }
}

/// Timer whose sleeps complete immediately
pub struct InstantTimer;

impl Timer for InstantTimer {
    fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        async {}.boxed_local()
    }
}

#[derive(Default)]
pub struct RecordingPrinter {
    pub prints: Cell<usize>,
}

impl PrintSurface for RecordingPrinter {
    fn print(&self) {
        self.prints.set(self.prints.get() + 1);
    }
}

pub struct Harness {
    pub confirm: Rc<ScriptedConfirm>,
    pub printer: Rc<RecordingPrinter>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            confirm: Rc::new(ScriptedConfirm::default()),
            printer: Rc::new(RecordingPrinter::default()),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            confirm: self.confirm.clone(),
            timer: Rc::new(InstantTimer),
            printer: self.printer.clone(),
        }
    }
}
