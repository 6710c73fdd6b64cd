//! Project tab filtering
//!
//! Switching tabs hides every project card, waits for the pane transition,
//! then reveals the new pane's cards one after another. Each switch bumps a
//! generation counter so reveals still queued from an earlier switch are
//! dropped instead of flashing cards of the wrong pane.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::FolioConfig;
use crate::host::{Dom, Scheduler};

/// Class marking both an active pane and a revealed project card.
pub const SHOWN_CLASS: &str = "show";

/// Reveal delay for each of `count` items.
pub fn stagger_delays(count: usize, stagger_ms: u32) -> Vec<u32> {
    (0..count)
        .map(|index| u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(stagger_ms))
        .collect()
}

pub struct ProjectFilter<H: Dom + Scheduler + 'static> {
    host: Rc<H>,
    config: Rc<FolioConfig>,
    generation: Rc<Cell<u64>>,
}

impl<H: Dom + Scheduler + 'static> Clone for ProjectFilter<H> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            config: self.config.clone(),
            generation: self.generation.clone(),
        }
    }
}

impl<H: Dom + Scheduler + 'static> ProjectFilter<H> {
    pub fn new(host: Rc<H>, config: Rc<FolioConfig>) -> Self {
        Self {
            host,
            config,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Reveal the default pane's cards if that pane starts out active.
    pub fn reveal_initial(&self) -> bool {
        let Some(pane) = self.host.query(&self.config.selectors.default_project_pane) else {
            return false;
        };
        if !self.host.has_class(&pane, SHOWN_CLASS) {
            return false;
        }
        self.reveal_pane(&pane, self.generation.get());
        true
    }

    /// Switch to the pane matched by `target` (a tab's `data-bs-target`).
    ///
    /// Returns false, touching nothing, when the pane does not exist.
    pub fn switch_to(&self, target: &str) -> bool {
        let Some(pane) = self.host.query(target) else {
            tracing::debug!(pane = target, "project pane not found");
            return false;
        };

        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        for item in self.host.query_all(&self.config.selectors.project_items) {
            self.host.remove_class(&item, SHOWN_CLASS);
        }

        let filter = self.clone();
        self.host.set_timeout(
            self.config.filter.switch_delay_ms,
            Box::new(move || filter.reveal_pane(&pane, generation)),
        );
        true
    }

    fn reveal_pane(&self, pane: &H::Element, generation: u64) {
        if self.generation.get() != generation {
            return;
        }
        let items = self
            .host
            .query_within(pane, &self.config.selectors.project_items);
        let delays = stagger_delays(items.len(), self.config.filter.stagger_ms);
        for (item, delay) in items.into_iter().zip(delays) {
            let host = self.host.clone();
            let current = self.generation.clone();
            self.host.set_timeout(
                delay,
                Box::new(move || {
                    if current.get() == generation {
                        host.add_class(&item, SHOWN_CLASS);
                    }
                }),
            );
        }
    }
}
