//! Page bootstrap
//!
//! Every feature on the page is started from one ordered list. A feature
//! that fails to start is logged and skipped; the rest still run.

use crate::error::Result;

type Initializer<'a> = Box<dyn FnOnce() -> Result<()> + 'a>;

#[derive(Default)]
pub struct Bootstrap<'a> {
    features: Vec<(&'static str, Initializer<'a>)>,
}

/// Outcome of [`Bootstrap::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub started: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
}

impl BootstrapReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<'a> Bootstrap<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a feature. Features start in registration order.
    pub fn register(mut self, name: &'static str, init: impl FnOnce() -> Result<()> + 'a) -> Self {
        self.features.push((name, Box::new(init)));
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn run(self) -> BootstrapReport {
        let mut report = BootstrapReport::default();
        for (name, init) in self.features {
            match init() {
                Ok(()) => {
                    tracing::debug!(feature = name, "feature started");
                    report.started.push(name);
                }
                Err(err) => {
                    tracing::error!(feature = name, error = %err, "feature failed to start");
                    report.failed.push((name, err.to_string()));
                }
            }
        }
        tracing::info!(
            started = report.started.len(),
            failed = report.failed.len(),
            "page bootstrap complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioError;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[test]
    fn test_runs_in_registration_order() {
        let order = RefCell::new(Vec::new());
        let report = Bootstrap::new()
            .register("a", || {
                order.borrow_mut().push("a");
                Ok(())
            })
            .register("b", || {
                order.borrow_mut().push("b");
                Ok(())
            })
            .run();

        assert_eq!(*order.borrow(), vec!["a", "b"]);
        assert_eq!(report.started, vec!["a", "b"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_failure_does_not_stop_later_features() {
        let ran_after = RefCell::new(false);
        let report = Bootstrap::new()
            .register("contact", || Err(FolioError::missing("#contactForm")))
            .register("navbar", || {
                *ran_after.borrow_mut() = true;
                Ok(())
            })
            .run();

        assert!(*ran_after.borrow());
        assert_eq!(report.started, vec!["navbar"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "contact");
        assert!(report.failed[0].1.contains("#contactForm"));
    }

    #[test]
    fn test_empty_bootstrap() {
        let bootstrap = Bootstrap::new();
        assert!(bootstrap.is_empty());
        assert_eq!(bootstrap.run(), BootstrapReport::default());
    }
}
