//! Folio - portfolio page behavior
//!
//! Host-agnostic core of the portfolio front end:
//! - Preloader readiness gate and the one-shot animation cascade
//! - Section reveals and numeric counters
//! - Navbar scroll behavior, scroll spy and scroll-to-top
//! - Contact form validation and local submission log
//! - Project tab filtering
//!
//! Browser APIs are reached through the traits in [`host`]; the
//! `folio-web` crate implements them on `web-sys`.
//!
//! # Example
//!
//! ```no_run
//! use std::rc::Rc;
//! use folio::{FolioConfig, Host, start_sequence};
//!
//! fn boot<H: Host>(host: Rc<H>) {
//!     let config = Rc::new(FolioConfig::default());
//!     start_sequence(host, config);
//! }
//! ```

pub mod bootstrap;
pub mod config;
pub mod contact;
pub mod counter;
pub mod error;
pub mod filter;
pub mod format;
pub mod host;
pub mod navbar;
pub mod readiness;
pub mod reveal;
pub mod scroll_top;
pub mod sequencer;

#[cfg(test)]
pub(crate) mod testing;

pub use bootstrap::{Bootstrap, BootstrapReport};
pub use config::FolioConfig;
pub use error::{FolioError, Result};
pub use host::{Dom, Host, PageSignals, Scheduler, WatchControl};
pub use readiness::ReadinessGate;
pub use sequencer::{run_cascade, start_sequence};
