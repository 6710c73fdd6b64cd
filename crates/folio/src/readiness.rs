//! Readiness gate
//!
//! Two-of-two join between "page resources loaded" and "preloader has been
//! on screen long enough". Whichever signal arrives second fires the
//! cascade. The cascade is stored as an `FnOnce` and taken when it runs, so
//! it can fire at most once no matter how often the signals repeat.

use std::fmt;

/// Which readiness signals have been observed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessState {
    pub resources_loaded: bool,
    pub minimum_time_elapsed: bool,
}

impl ReadinessState {
    pub fn is_ready(&self) -> bool {
        self.resources_loaded && self.minimum_time_elapsed
    }
}

/// The two completion conditions of the preloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    ResourcesLoaded,
    MinimumTimeElapsed,
}

pub struct ReadinessGate<F: FnOnce()> {
    state: ReadinessState,
    cascade: Option<F>,
}

impl<F: FnOnce()> ReadinessGate<F> {
    pub fn new(cascade: F) -> Self {
        Self {
            state: ReadinessState::default(),
            cascade: Some(cascade),
        }
    }

    pub fn state(&self) -> ReadinessState {
        self.state
    }

    pub fn has_fired(&self) -> bool {
        self.cascade.is_none()
    }

    /// Record that every page resource has loaded. Returns true if this call fired the cascade.
    pub fn notify_resources_loaded(&mut self) -> bool {
        self.notify(Signal::ResourcesLoaded)
    }

    /// Record that the minimum display time has elapsed. Returns true if this call fired the cascade.
    pub fn notify_minimum_time_elapsed(&mut self) -> bool {
        self.notify(Signal::MinimumTimeElapsed)
    }

    fn notify(&mut self, signal: Signal) -> bool {
        match self.record(signal) {
            Some(cascade) => {
                cascade();
                true
            }
            None => false,
        }
    }

    /// Set the flag for `signal` and hand back the cascade if this completed the join.
    ///
    /// Lets a caller holding the gate behind a `RefCell` release the borrow
    /// before running the cascade.
    pub fn record(&mut self, signal: Signal) -> Option<F> {
        let flag = match signal {
            Signal::ResourcesLoaded => &mut self.state.resources_loaded,
            Signal::MinimumTimeElapsed => &mut self.state.minimum_time_elapsed,
        };
        if !*flag {
            tracing::debug!(?signal, "readiness signal");
            *flag = true;
        }
        if !self.state.is_ready() {
            return None;
        }
        let cascade = self.cascade.take();
        if cascade.is_some() {
            tracing::info!("readiness: both signals in, starting cascade");
        }
        cascade
    }
}

impl<F: FnOnce()> fmt::Debug for ReadinessGate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("state", &self.state)
            .field("fired", &self.has_fired())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_gate() -> (ReadinessGate<impl FnOnce()>, Rc<Cell<u32>>) {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        (ReadinessGate::new(move || counter.set(counter.get() + 1)), fired)
    }

    #[test]
    fn test_load_then_timer_fires_once() {
        let (mut gate, fired) = counting_gate();
        assert!(!gate.notify_resources_loaded());
        assert_eq!(fired.get(), 0);
        assert!(gate.notify_minimum_time_elapsed());
        assert_eq!(fired.get(), 1);
        assert!(gate.has_fired());
    }

    #[test]
    fn test_timer_then_load_fires_once() {
        let (mut gate, fired) = counting_gate();
        assert!(!gate.notify_minimum_time_elapsed());
        assert!(gate.notify_resources_loaded());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_repeated_notifications_never_refire() {
        let (mut gate, fired) = counting_gate();
        gate.notify_resources_loaded();
        gate.notify_resources_loaded();
        assert_eq!(fired.get(), 0);
        gate.notify_minimum_time_elapsed();
        gate.notify_minimum_time_elapsed();
        gate.notify_resources_loaded();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_state_is_monotonic() {
        let (mut gate, _) = counting_gate();
        assert_eq!(gate.state(), ReadinessState::default());
        gate.notify_minimum_time_elapsed();
        assert!(gate.state().minimum_time_elapsed);
        assert!(!gate.state().resources_loaded);
        gate.notify_resources_loaded();
        assert!(gate.state().is_ready());
    }

    #[test]
    fn test_record_hands_out_cascade_once() {
        let mut gate = ReadinessGate::new(|| ());
        assert!(gate.record(Signal::ResourcesLoaded).is_none());
        assert!(gate.record(Signal::MinimumTimeElapsed).is_some());
        assert!(gate.record(Signal::MinimumTimeElapsed).is_none());
        assert!(gate.record(Signal::ResourcesLoaded).is_none());
        assert!(gate.has_fired());
    }
}
