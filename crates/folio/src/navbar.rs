//! Navbar scroll behavior
//!
//! The navbar has three looks: resting at the top of the page, a compact
//! scrolled style, and hidden while the visitor scrolls down far into the
//! page. [`NavbarBehavior`] owns the last scroll offset so the direction of
//! travel can be worked out on each scroll event.
//!
//! Also holds the mobile collapse toggle and the scroll spy that marks the
//! nav link of the section currently in view.

use crate::config::NavbarConfig;
use crate::host::Dom;

pub const ENTRANCE_CLASS: &str = "animate-navbar";
pub const SCROLLED_CLASS: &str = "scroll-nav";
pub const HIDDEN_CLASS: &str = "nav-hidden";
pub const OPEN_CLASS: &str = "nav-open";
pub const ACTIVE_LINK_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarMode {
    Top,
    Scrolled,
    Hidden,
}

impl NavbarMode {
    /// Apply this mode's classes to the navbar element.
    pub fn apply<D: Dom>(self, dom: &D, navbar: &D::Element) {
        match self {
            NavbarMode::Top => {
                dom.remove_class(navbar, SCROLLED_CLASS);
                dom.remove_class(navbar, HIDDEN_CLASS);
                dom.add_class(navbar, ENTRANCE_CLASS);
            }
            NavbarMode::Scrolled => {
                dom.remove_class(navbar, HIDDEN_CLASS);
                dom.add_class(navbar, SCROLLED_CLASS);
            }
            NavbarMode::Hidden => {
                dom.add_class(navbar, HIDDEN_CLASS);
                dom.remove_class(navbar, SCROLLED_CLASS);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavbarBehavior {
    compact_offset: f64,
    hide_offset: f64,
    last_scroll_top: f64,
}

impl NavbarBehavior {
    pub fn new(config: &NavbarConfig) -> Self {
        Self {
            compact_offset: config.compact_offset,
            hide_offset: config.hide_offset,
            last_scroll_top: 0.0,
        }
    }

    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }

    /// Handle a scroll event at offset `y`.
    ///
    /// Returns the mode to apply, or `None` when the navbar keeps its
    /// current look (between the compact and hide offsets, or overscroll
    /// above the top).
    pub fn on_scroll(&mut self, y: f64) -> Option<NavbarMode> {
        let mode = if y == 0.0 {
            Some(NavbarMode::Top)
        } else if y > 0.0 && y <= self.compact_offset {
            Some(NavbarMode::Scrolled)
        } else if y > self.hide_offset {
            if y > self.last_scroll_top {
                Some(NavbarMode::Hidden)
            } else {
                Some(NavbarMode::Scrolled)
            }
        } else {
            None
        };
        self.last_scroll_top = y.max(0.0);
        mode
    }
}

/// Mobile menu opened or closed.
pub fn set_open<D: Dom>(dom: &D, navbar: &D::Element, open: bool) {
    if open {
        dom.add_class(navbar, OPEN_CLASS);
    } else {
        dom.remove_class(navbar, OPEN_CLASS);
    }
}

/// Position of a section on the page, for the scroll spy.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: Option<String>,
    pub top: f64,
    pub height: f64,
}

/// The last section whose (offset-adjusted) span contains `y`.
pub fn current_section(sections: &[SectionBounds], y: f64, offset: f64) -> Option<&SectionBounds> {
    sections
        .iter()
        .rev()
        .find(|section| {
            let top = section.top - offset;
            y >= top && y < top + section.height
        })
}

/// Whether a nav link pointing at `href` should be marked active.
///
/// Nothing is active when no section with an id is current.
pub fn link_is_active(href: &str, current: Option<&SectionBounds>) -> bool {
    match current.and_then(|section| section.id.as_deref()) {
        Some(id) if !id.is_empty() => href.contains(id),
        _ => false,
    }
}
