//! `web-sys` implementation of the folio host traits.

use std::cell::RefCell;
use std::rc::Rc;

use folio::host::{Dom, PageSignals, Scheduler, WatchControl};
use folio::reveal;
use folio::{FolioError, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, ScrollBehavior,
    ScrollRestoration, ScrollToOptions, Window,
};

/// Convert a thrown JS value into a host error.
pub(crate) fn js_error(value: JsValue) -> FolioError {
    FolioError::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Attach `handler` to `target` for the lifetime of the page.
pub(crate) fn listen<F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::<dyn FnMut(_)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

fn listen_once(target: &web_sys::EventTarget, event: &str, callback: Box<dyn FnOnce()>) {
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let handler = Closure::once_into_js(move || callback());
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        handler.unchecked_ref(),
        &options,
    ) {
        tracing::warn!(event, error = ?err, "failed to attach one-shot listener");
    }
}

fn elements(list: Option<NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

type Watchers = Rc<RefCell<Vec<(Element, Box<dyn FnMut(bool) -> WatchControl>)>>>;

/// One observer per threshold, shared by every element watched at it.
struct SharedObserver {
    threshold: f64,
    observer: IntersectionObserver,
    watchers: Watchers,
    _handler: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl SharedObserver {
    fn new(threshold: f64) -> Result<Self> {
        let watchers: Watchers = Rc::default();
        let delivered = watchers.clone();
        let handler = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    let visible = reveal::meets_threshold(
                        entry.is_intersecting(),
                        entry.intersection_ratio(),
                        threshold,
                    );
                    let mut watchers = delivered.borrow_mut();
                    let Some(index) = watchers.iter().position(|(element, _)| *element == target)
                    else {
                        continue;
                    };
                    if (watchers[index].1)(visible) == WatchControl::Release {
                        watchers.swap_remove(index);
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer = IntersectionObserver::new_with_options(handler.as_ref().unchecked_ref(), &init)
            .map_err(js_error)?;
        Ok(Self {
            threshold,
            observer,
            watchers,
            _handler: handler,
        })
    }
}

pub struct WebHost {
    window: Window,
    document: Document,
    observers: RefCell<Vec<SharedObserver>>,
}

impl WebHost {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| FolioError::Host("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| FolioError::Host("no document".into()))?;
        Ok(Self {
            window,
            document,
            observers: RefCell::new(Vec::new()),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    pub fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    pub fn scroll_to_top_smooth(&self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

impl Dom for WebHost {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector).ok())
    }

    fn query_within(&self, parent: &Element, selector: &str) -> Vec<Element> {
        elements(parent.query_selector_all(selector).ok())
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn add_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_display(&self, element: &Element, display: &str) {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property("display", display);
        }
    }

    /// Group with the browser's default locale via `Number.prototype.toLocaleString`.
    fn format_number(&self, value: u64) -> String {
        let number = js_sys::Number::new(&JsValue::from_f64(value as f64));
        js_sys::Reflect::get(&number, &"toLocaleString".into())
            .ok()
            .and_then(|method| method.dyn_into::<js_sys::Function>().ok())
            .and_then(|method| method.call0(&number).ok())
            .and_then(|formatted| formatted.as_string())
            .unwrap_or_else(|| folio::format::group_thousands(value))
    }
}

impl Scheduler for WebHost {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let handler = Closure::once_into_js(move || callback());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(handler.unchecked_ref(), delay)
        {
            tracing::warn!(error = ?err, "setTimeout failed");
        }
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        let handler = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        if let Err(err) = self.window.request_animation_frame(handler.unchecked_ref()) {
            tracing::warn!(error = ?err, "requestAnimationFrame failed");
        }
    }
}

impl PageSignals for WebHost {
    fn is_document_complete(&self) -> bool {
        self.document.ready_state() == "complete"
    }

    fn on_load(&self, callback: Box<dyn FnOnce()>) {
        listen_once(&self.window, "load", callback);
    }

    fn on_transition_end_once(&self, element: &Element, callback: Box<dyn FnOnce()>) {
        listen_once(element, "transitionend", callback);
    }

    fn watch_intersection(
        &self,
        element: &Element,
        threshold: f64,
        callback: Box<dyn FnMut(bool) -> WatchControl>,
    ) {
        let mut observers = self.observers.borrow_mut();
        let index = match observers
            .iter()
            .position(|shared| shared.threshold.to_bits() == threshold.to_bits())
        {
            Some(index) => index,
            None => match SharedObserver::new(threshold) {
                Ok(shared) => {
                    observers.push(shared);
                    observers.len() - 1
                }
                Err(err) => {
                    tracing::warn!(error = %err, "IntersectionObserver unavailable");
                    return;
                }
            },
        };
        let shared = &observers[index];
        shared.watchers.borrow_mut().push((element.clone(), callback));
        shared.observer.observe(element);
    }

    fn reset_scroll(&self) {
        if let Ok(history) = self.window.history() {
            let _ = history.set_scroll_restoration(ScrollRestoration::Manual);
        }
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
