//! In-memory host with a virtual clock for driving the page behavior in tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

use crate::host::{Dom, PageSignals, Scheduler, WatchControl};

#[derive(Default)]
struct FakeElement {
    selectors: Vec<String>,
    parent: Option<usize>,
    classes: BTreeSet<String>,
    attributes: HashMap<String, String>,
    text: String,
    display: Option<String>,
}

struct Timer {
    due: f64,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

struct Watcher {
    element: usize,
    threshold: f64,
    callback: Box<dyn FnMut(bool) -> WatchControl>,
}

#[derive(Default)]
pub(crate) struct FakeHost {
    elements: RefCell<Vec<FakeElement>>,
    now: Cell<f64>,
    document_complete: Cell<bool>,
    load_listeners: RefCell<Vec<Box<dyn FnOnce()>>>,
    timers: RefCell<Vec<Timer>>,
    next_seq: Cell<u64>,
    frames: RefCell<Vec<Box<dyn FnOnce(f64)>>>,
    transitions: RefCell<Vec<(usize, Box<dyn FnOnce()>)>>,
    watchers: RefCell<Vec<Watcher>>,
    scroll_resets: Cell<u32>,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add an element matched by each of `selectors`.
    pub(crate) fn add(&self, selectors: &[&str]) -> usize {
        self.insert(None, selectors)
    }

    pub(crate) fn add_child(&self, parent: usize, selectors: &[&str]) -> usize {
        self.insert(Some(parent), selectors)
    }

    fn insert(&self, parent: Option<usize>, selectors: &[&str]) -> usize {
        let mut elements = self.elements.borrow_mut();
        elements.push(FakeElement {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            parent,
            ..FakeElement::default()
        });
        elements.len() - 1
    }

    pub(crate) fn set_attribute(&self, element: usize, name: &str, value: &str) {
        self.elements.borrow_mut()[element]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub(crate) fn classes(&self, element: usize) -> Vec<String> {
        self.elements.borrow()[element].classes.iter().cloned().collect()
    }

    pub(crate) fn text(&self, element: usize) -> String {
        self.elements.borrow()[element].text.clone()
    }

    pub(crate) fn display(&self, element: usize) -> Option<String> {
        self.elements.borrow()[element].display.clone()
    }

    pub(crate) fn now(&self) -> f64 {
        self.now.get()
    }

    pub(crate) fn set_document_complete(&self, complete: bool) {
        self.document_complete.set(complete);
    }

    pub(crate) fn load_listener_count(&self) -> usize {
        self.load_listeners.borrow().len()
    }

    pub(crate) fn fire_load(&self) {
        self.document_complete.set(true);
        let listeners = std::mem::take(&mut *self.load_listeners.borrow_mut());
        for listener in listeners {
            listener();
        }
    }

    /// Move the clock forward, running every timer that falls due on the way.
    pub(crate) fn advance(&self, ms: f64) {
        let deadline = self.now.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let earliest = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= deadline)
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
                    .map(|(i, _)| i);
                earliest.map(|i| timers.remove(i))
            };
            match next {
                Some(timer) => {
                    self.now.set(timer.due.max(self.now.get()));
                    (timer.callback)();
                }
                None => break,
            }
        }
        self.now.set(deadline);
    }

    pub(crate) fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub(crate) fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Run every frame callback requested so far with `timestamp`.
    pub(crate) fn run_frame(&self, timestamp: f64) {
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        for frame in frames {
            frame(timestamp);
        }
    }

    pub(crate) fn finish_transition(&self, element: usize) {
        let pending = std::mem::take(&mut *self.transitions.borrow_mut());
        let mut fired = Vec::new();
        let mut kept = Vec::new();
        for (target, callback) in pending {
            if target == element {
                fired.push(callback);
            } else {
                kept.push((target, callback));
            }
        }
        self.transitions.borrow_mut().extend(kept);
        for callback in fired {
            callback();
        }
    }

    pub(crate) fn watcher_count(&self, element: usize) -> usize {
        self.watchers
            .borrow()
            .iter()
            .filter(|w| w.element == element)
            .count()
    }

    pub(crate) fn watcher_threshold(&self, element: usize) -> Option<f64> {
        self.watchers
            .borrow()
            .iter()
            .find(|w| w.element == element)
            .map(|w| w.threshold)
    }

    /// Deliver an intersection change for `element` to its watchers.
    pub(crate) fn intersect(&self, element: usize, intersecting: bool) {
        let watchers = std::mem::take(&mut *self.watchers.borrow_mut());
        let mut kept = Vec::new();
        for mut watcher in watchers {
            if watcher.element == element
                && (watcher.callback)(intersecting) == WatchControl::Release
            {
                continue;
            }
            kept.push(watcher);
        }
        let mut current = self.watchers.borrow_mut();
        kept.append(&mut current);
        *current = kept;
    }

    pub(crate) fn scroll_resets(&self) -> u32 {
        self.scroll_resets.get()
    }

    fn matches(&self, index: usize, selector: &str) -> bool {
        self.elements.borrow()[index]
            .selectors
            .iter()
            .any(|s| s == selector)
    }

    fn is_descendant(&self, index: usize, ancestor: usize) -> bool {
        let elements = self.elements.borrow();
        let mut cursor = elements[index].parent;
        while let Some(parent) = cursor {
            if parent == ancestor {
                return true;
            }
            cursor = elements[parent].parent;
        }
        false
    }
}

impl Dom for FakeHost {
    type Element = usize;

    fn query(&self, selector: &str) -> Option<usize> {
        let count = self.elements.borrow().len();
        (0..count).find(|&i| self.matches(i, selector))
    }

    fn query_all(&self, selector: &str) -> Vec<usize> {
        let count = self.elements.borrow().len();
        (0..count).filter(|&i| self.matches(i, selector)).collect()
    }

    fn query_within(&self, parent: &usize, selector: &str) -> Vec<usize> {
        let count = self.elements.borrow().len();
        (0..count)
            .filter(|&i| self.matches(i, selector) && self.is_descendant(i, *parent))
            .collect()
    }

    fn attribute(&self, element: &usize, name: &str) -> Option<String> {
        self.elements.borrow()[*element].attributes.get(name).cloned()
    }

    fn add_class(&self, element: &usize, class: &str) {
        self.elements.borrow_mut()[*element]
            .classes
            .insert(class.to_string());
    }

    fn remove_class(&self, element: &usize, class: &str) {
        self.elements.borrow_mut()[*element].classes.remove(class);
    }

    fn has_class(&self, element: &usize, class: &str) -> bool {
        self.elements.borrow()[*element].classes.contains(class)
    }

    fn set_text(&self, element: &usize, text: &str) {
        self.elements.borrow_mut()[*element].text = text.to_string();
    }

    fn set_display(&self, element: &usize, display: &str) {
        self.elements.borrow_mut()[*element].display = Some(display.to_string());
    }
}

impl Scheduler for FakeHost {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + f64::from(delay_ms),
            seq,
            callback,
        });
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        self.frames.borrow_mut().push(callback);
    }
}

impl PageSignals for FakeHost {
    fn is_document_complete(&self) -> bool {
        self.document_complete.get()
    }

    fn on_load(&self, callback: Box<dyn FnOnce()>) {
        self.load_listeners.borrow_mut().push(callback);
    }

    fn on_transition_end_once(&self, element: &usize, callback: Box<dyn FnOnce()>) {
        self.transitions.borrow_mut().push((*element, callback));
    }

    fn watch_intersection(
        &self,
        element: &usize,
        threshold: f64,
        callback: Box<dyn FnMut(bool) -> WatchControl>,
    ) {
        self.watchers.borrow_mut().push(Watcher {
            element: *element,
            threshold,
            callback,
        });
    }

    fn reset_scroll(&self) {
        self.scroll_resets.set(self.scroll_resets.get() + 1);
    }
}
