//! Preloader sequencer
//!
//! Joins the page load signal with the minimum display timer and, once both
//! are in, runs the animation cascade:
//! 1. fade the preloader out and hide it when its transition ends
//! 2. entrance classes on the navbar and hero
//! 3. hide every section and reveal it when it scrolls into view
//! 4. count every numeric counter up to its target

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::FolioConfig;
use crate::counter::{self, CounterAnimation};
use crate::host::Host;
use crate::navbar;
use crate::readiness::{ReadinessGate, Signal};
use crate::reveal::{self, SectionVisibility};

pub const OVERLAY_FADE_CLASS: &str = "fade-out";
pub const IMAGE_ENTRANCE_CLASS: &str = "animate-img";
pub const INFO_ENTRANCE_CLASS: &str = "animate-info";

pub type Cascade = Box<dyn FnOnce()>;
pub type SharedGate = Rc<RefCell<ReadinessGate<Cascade>>>;

/// Arm the readiness gate. Call once, from the page entry point.
///
/// If the document has already finished loading, the load flag is set
/// right away; a load listener registered now would never be called.
pub fn start_sequence<H: Host>(host: Rc<H>, config: Rc<FolioConfig>) -> SharedGate {
    let cascade: Cascade = {
        let host = host.clone();
        let config = config.clone();
        Box::new(move || run_cascade(&host, &config))
    };
    let gate: SharedGate = Rc::new(RefCell::new(ReadinessGate::new(cascade)));

    if host.is_document_complete() {
        signal(&gate, Signal::ResourcesLoaded);
    } else {
        let gate = gate.clone();
        host.on_load(Box::new(move || signal(&gate, Signal::ResourcesLoaded)));
    }

    {
        let gate = gate.clone();
        host.set_timeout(
            config.min_display_ms,
            Box::new(move || signal(&gate, Signal::MinimumTimeElapsed)),
        );
    }

    gate
}

fn signal(gate: &SharedGate, signal: Signal) {
    let cascade = gate.borrow_mut().record(signal);
    if let Some(cascade) = cascade {
        cascade();
    }
}

/// Run every step of the cascade. Missing elements are skipped.
pub fn run_cascade<H: Host>(host: &Rc<H>, config: &FolioConfig) {
    let selectors = &config.selectors;

    host.reset_scroll();

    if let Some(overlay) = host.query(&selectors.preloader) {
        host.add_class(&overlay, OVERLAY_FADE_CLASS);
        let fade_host = host.clone();
        let faded = overlay.clone();
        host.on_transition_end_once(
            &overlay,
            Box::new(move || fade_host.set_display(&faded, "none")),
        );
    }

    let entrances = [
        (&selectors.navbar, navbar::ENTRANCE_CLASS),
        (&selectors.hero_image, IMAGE_ENTRANCE_CLASS),
        (&selectors.hero_info, INFO_ENTRANCE_CLASS),
    ];
    for (selector, class) in entrances {
        match host.query(selector) {
            Some(element) => host.add_class(&element, class),
            None => tracing::trace!(selector = %selector, "entrance target absent"),
        }
    }

    let sections = host.query_all(&selectors.sections);
    for section in &sections {
        watch_section(host, section.clone(), config.reveal_threshold);
    }

    let mut counters = 0usize;
    for element in host.query_all(&selectors.counters) {
        let target = host
            .attribute(&element, &selectors.counter_target_attribute)
            .and_then(|raw| CounterAnimation::parse_target(&raw));
        let Some(target) = target else {
            tracing::debug!("counter without a numeric target, skipping");
            continue;
        };
        host.add_class(&element, counter::START_CLASS);
        animate_counter(
            host.clone(),
            element,
            CounterAnimation::new(target, config.counter_duration_ms),
        );
        counters += 1;
    }

    tracing::info!(sections = sections.len(), counters, "animation cascade started");
}

fn watch_section<H: Host>(host: &Rc<H>, section: H::Element, threshold: f64) {
    host.add_class(&section, reveal::HIDDEN_CLASS);

    let mut visibility = SectionVisibility::default();
    let reveal_host = host.clone();
    let revealed = section.clone();
    host.watch_intersection(
        &section,
        threshold,
        Box::new(move |intersecting| {
            if visibility.observe(intersecting) {
                reveal_host.add_class(&revealed, reveal::SHOWN_CLASS);
            }
            visibility.control()
        }),
    );
}

fn animate_counter<H: Host>(host: Rc<H>, element: H::Element, mut animation: CounterAnimation) {
    let frame_host = host.clone();
    host.request_frame(Box::new(move |timestamp| {
        let frame = animation.tick(timestamp);
        frame_host.set_text(&element, &frame_host.format_number(frame.value));
        if !frame.settled {
            animate_counter(frame_host, element, animation);
        }
    }));
}
