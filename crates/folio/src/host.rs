//! Host traits
//!
//! The page behavior only needs a small slice of the browser: element
//! lookup and class toggles, timers and animation frames, the page load
//! signal, transition completion and viewport intersection. Each concern is
//! one trait so tests can fake the whole surface with a virtual clock.

use crate::format;

/// Returned by an intersection callback to keep or drop its subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchControl {
    Keep,
    Release,
}

/// Element queries and presentation state
pub trait Dom {
    type Element: Clone + 'static;

    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    /// Descendants of `parent` matching `selector`.
    fn query_within(&self, parent: &Self::Element, selector: &str) -> Vec<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    fn set_text(&self, element: &Self::Element, text: &str);
    /// Set the inline `display` style.
    fn set_display(&self, element: &Self::Element, display: &str);

    /// Format a counter value with the visitor's digit grouping.
    fn format_number(&self, value: u64) -> String {
        format::group_thousands(value)
    }
}

/// Deferred work on the event loop
pub trait Scheduler {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
    /// Run `callback` before the next repaint with a high-resolution timestamp in ms.
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>);
}

/// One-shot and observer notifications from the page
pub trait PageSignals: Dom {
    /// True once every page resource has finished loading.
    fn is_document_complete(&self) -> bool;
    fn on_load(&self, callback: Box<dyn FnOnce()>);
    fn on_transition_end_once(&self, element: &Self::Element, callback: Box<dyn FnOnce()>);
    /// Deliver intersection changes for `element`; the callback receives
    /// whether at least `threshold` of the element is in the viewport.
    fn watch_intersection(
        &self,
        element: &Self::Element,
        threshold: f64,
        callback: Box<dyn FnMut(bool) -> WatchControl>,
    );
    /// Jump to the top and stop the browser restoring the previous offset.
    fn reset_scroll(&self);
}

/// Everything the sequencer needs.
pub trait Host: Dom + Scheduler + PageSignals + 'static {}

impl<T> Host for T where T: Dom + Scheduler + PageSignals + 'static {}
