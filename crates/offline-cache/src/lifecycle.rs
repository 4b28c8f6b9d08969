//! Service Worker Lifecycle
//!
//! Install/activate state machine for one worker version.

use std::cell::Cell;

use crate::error::{CacheError, CacheResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Script evaluated, nothing run yet
    Parsed,
    Installing,
    /// Precache committed; waiting to activate
    Installed,
    Activating,
    /// Serving fetches from this version's generation
    Activated,
    /// Failed install or replaced; never serves
    Redundant,
}

impl WorkerState {
    pub fn can_transition(self, to: WorkerState) -> bool {
        use WorkerState::*;
        matches!(
            (self, to),
            (Parsed, Installing)
                | (Installing, Installed)
                | (Installing, Redundant)
                // A restarted worker can resume activation without reinstalling
                | (Parsed, Activating)
                | (Installed, Activating)
                | (Activating, Activated)
                | (Activating, Redundant)
                | (Activated, Redundant)
        )
    }
}

/// Current state with checked transitions
#[derive(Debug)]
pub struct Lifecycle {
    state: Cell<WorkerState>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            state: Cell::new(WorkerState::Parsed),
        }
    }
}

impl Lifecycle {
    pub fn state(&self) -> WorkerState {
        self.state.get()
    }

    pub fn transition(&self, to: WorkerState) -> CacheResult<()> {
        let from = self.state.get();
        if !from.can_transition(to) {
            return Err(CacheError::InvalidState { from, to });
        }
        log::debug!("[sw] {:?} -> {:?}", from, to);
        self.state.set(to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let lifecycle = Lifecycle::default();
        for next in [
            WorkerState::Installing,
            WorkerState::Installed,
            WorkerState::Activating,
            WorkerState::Activated,
        ] {
            lifecycle.transition(next).unwrap();
        }
        assert_eq!(lifecycle.state(), WorkerState::Activated);
    }

    #[test]
    fn test_redundant_cannot_activate() {
        let lifecycle = Lifecycle::default();
        lifecycle.transition(WorkerState::Installing).unwrap();
        lifecycle.transition(WorkerState::Redundant).unwrap();
        assert_eq!(
            lifecycle.transition(WorkerState::Activating),
            Err(CacheError::InvalidState {
                from: WorkerState::Redundant,
                to: WorkerState::Activating
            })
        );
    }

    #[test]
    fn test_cannot_skip_install_step() {
        assert!(!WorkerState::Installing.can_transition(WorkerState::Activated));
        assert!(!WorkerState::Activated.can_transition(WorkerState::Installing));
    }
}
